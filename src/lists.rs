//! List flavors
//!
//! Each flavor contributes only what differs between the three lists: its
//! caller filter, the backend options it converts to, and the record shape.
//! Window and cursor handling is shared through [`open_session`].

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::PagerConfig;
use crate::error::PagerError;
use crate::fetcher::PageFetcher;
use crate::filter::FilterOptions;
use crate::pagination::PaginationEngine;
use crate::session::ListSession;

pub mod deployments;
pub mod events;
pub mod traces;

pub use deployments::{Deployment, DeploymentFilterOptions, ListDeploymentsOptions};
pub use events::{Event, EventFilterOptions, ListEventsOptions};
pub use traces::{DeploymentTrace, DeploymentTraceFilterOptions, DeploymentTraceRes, ListDeploymentTracesOptions};

/// Open a session for `filter` on the wall clock
pub fn open_session<Q, F>(
    fetcher: F,
    filter: &Q,
    config: PagerConfig,
) -> Result<ListSession<F>, PagerError>
where
    Q: FilterOptions,
    F: PageFetcher<Options = Q::Request>,
{
    open_session_with_clock(fetcher, filter, config, Arc::new(SystemClock))
}

/// Open a session for `filter` on a caller-supplied clock
pub fn open_session_with_clock<Q, F>(
    fetcher: F,
    filter: &Q,
    config: PagerConfig,
    clock: Arc<dyn Clock>,
) -> Result<ListSession<F>, PagerError>
where
    Q: FilterOptions,
    F: PageFetcher<Options = Q::Request>,
{
    let options = filter.to_request()?;
    let engine = PaginationEngine::with_clock(fetcher, options, config, clock)?;
    Ok(ListSession::new(filter.query_key(), engine))
}
