//! Values passed between consecutive page requests of one session.

use serde::{Deserialize, Serialize};

/// Where the next request of a session starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Continuation token; empty means "start of window"
    #[serde(default)]
    pub cursor: String,

    /// Inclusive lower bound of the active window, unix seconds.
    /// `None` falls back to `now - horizon` on the next request.
    #[serde(default)]
    pub min_updated_at: Option<i64>,

    /// Whether the fetch that produced this state filled a full page
    #[serde(default)]
    pub has_more: bool,

    /// Windows entered so far, counting the current one
    #[serde(default = "default_windows_entered")]
    pub windows_entered: u32,
}

fn default_windows_entered() -> u32 {
    1
}

impl PaginationState {
    /// State resuming at a known window without a cursor
    pub fn at_window(min_updated_at: i64) -> Self {
        Self {
            cursor: String::new(),
            min_updated_at: Some(min_updated_at),
            has_more: false,
            windows_entered: 1,
        }
    }
}

/// What the session may do after a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextPage {
    /// Request again with this state. Its window may be older than the last one.
    Continue(PaginationState),
    /// The window bound was reached while walking back; nothing more will be requested
    Exhausted {
        /// Lower bound of the last window that was scanned
        oldest_min_updated_at: i64,
        windows_entered: u32,
    },
}

impl NextPage {
    pub fn state(&self) -> Option<&PaginationState> {
        match self {
            NextPage::Continue(state) => Some(state),
            NextPage::Exhausted { .. } => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, NextPage::Exhausted { .. })
    }
}

/// Result of one successful page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage<R> {
    /// Records in backend order
    pub records: Vec<R>,
    /// Page size that was requested
    pub page_size: u32,
    /// Window bound that was requested
    pub min_updated_at: i64,
    /// Backend cursor, or the previous one when the backend returned none
    pub cursor: String,
    /// `records.len() >= page_size`
    pub has_more: bool,
    pub next: NextPage,
}

impl<R> FetchedPage<R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
