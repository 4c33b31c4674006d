//! Pagination Engine
//!
//! Time-windowed cursor pagination shared by every list flavor. The engine
//! never mutates state in place: each call takes the previous
//! [`PaginationState`] by reference and hands back the next one inside the
//! returned [`FetchedPage`].

pub mod engine;
pub mod state;

pub use engine::PaginationEngine;
pub use state::{FetchedPage, NextPage, PaginationState};
