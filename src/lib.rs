//! History Pager: time-windowed pagination for deployment history lists
//!
//! Incremental cursor pagination over a remote list API, walking fixed-width
//! time windows backward from "now". Shared by the deployment, deployment
//! trace and event lists, together with the rule that picks which stage of a
//! deployment to highlight.

pub mod clock;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod lists;
pub mod logging;
pub mod pagination;
pub mod session;
pub mod stage;

pub use error::PagerError;
pub use fetcher::{Page, PageFetcher, PageRequest};
pub use pagination::{FetchedPage, NextPage, PaginationEngine, PaginationState};
pub use session::ListSession;
pub use stage::select_active_stage;
