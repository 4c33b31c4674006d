//! Page Fetcher contract
//!
//! The pager never talks to the backend itself. Each list flavor binds an
//! implementation of [`PageFetcher`] (a gRPC stub, an HTTP client, an in-memory
//! fake) and the engine only sees requests and pages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One request to the backend list API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest<O> {
    /// Filter options, passed through unmodified for the whole session
    pub options: O,
    /// Always greater than zero
    pub page_size: u32,
    /// Opaque continuation token; empty means "start of window"
    pub cursor: String,
    /// Inclusive lower bound on record update time, unix seconds
    pub page_min_updated_at: i64,
}

/// One page of records as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<R> {
    pub items: Vec<R>,
    /// Empty when the backend has nothing further in this window. Not relied upon.
    #[serde(default)]
    pub cursor: String,
}

impl<R> Page<R> {
    pub fn new(items: Vec<R>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            cursor: cursor.into(),
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            cursor: String::new(),
        }
    }
}

/// Backend list endpoint for one record flavor
///
/// Retries, timeouts and authentication belong to the implementation. Whatever
/// error it returns is handed to the caller untouched.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Backend-side filter options
    type Options: Clone + Send + Sync;
    type Record: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch(
        &self,
        request: PageRequest<Self::Options>,
    ) -> Result<Page<Self::Record>, Self::Error>;
}

#[async_trait]
impl<T> PageFetcher for std::sync::Arc<T>
where
    T: PageFetcher + ?Sized,
{
    type Options = T::Options;
    type Record = T::Record;
    type Error = T::Error;

    async fn fetch(
        &self,
        request: PageRequest<Self::Options>,
    ) -> Result<Page<Self::Record>, Self::Error> {
        (**self).fetch(request).await
    }
}
