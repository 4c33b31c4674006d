//! Request derivation and window advancement for one session.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::{Clock, WindowClock};
use crate::config::PagerConfig;
use crate::error::PagerError;
use crate::fetcher::{PageFetcher, PageRequest};
use crate::pagination::state::{FetchedPage, NextPage, PaginationState};

/// Drives a [`PageFetcher`] through consecutive windows
///
/// Page size policy: the first request of a session asks for
/// `first_page_size`, every later one for `subsequent_page_size`, whatever
/// happened to the window in between.
///
/// A page shorter than the requested size closes its window. The next state
/// then points at the window immediately older, exactly `horizon_seconds`
/// wide, so windows chain backward without gaps. The bound only ever moves
/// back in time.
pub struct PaginationEngine<F: PageFetcher> {
    fetcher: F,
    options: F::Options,
    config: PagerConfig,
    clock: WindowClock,
}

impl<F: PageFetcher> PaginationEngine<F> {
    /// Engine on the wall clock
    pub fn new(fetcher: F, options: F::Options, config: PagerConfig) -> Result<Self, PagerError> {
        config.validate().map_err(PagerError::ConfigError)?;
        let clock = WindowClock::system(config.horizon_seconds);
        Ok(Self {
            fetcher,
            options,
            config,
            clock,
        })
    }

    /// Engine on a caller-supplied clock
    pub fn with_clock(
        fetcher: F,
        options: F::Options,
        config: PagerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PagerError> {
        config.validate().map_err(PagerError::ConfigError)?;
        let clock = WindowClock::new(clock, config.horizon_seconds);
        Ok(Self {
            fetcher,
            options,
            config,
            clock,
        })
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn options(&self) -> &F::Options {
        &self.options
    }

    /// Request the page following `prior`, or the first page when `prior` is `None`
    ///
    /// Fetcher errors are returned as-is and `prior` stays valid, so the same
    /// logical page can be retried by calling again with the same state.
    pub async fn fetch_page(
        &self,
        prior: Option<&PaginationState>,
    ) -> Result<FetchedPage<F::Record>, F::Error> {
        let request = self.build_request(prior);
        let page_size = request.page_size;
        let min_updated_at = request.page_min_updated_at;
        let request_cursor = request.cursor.clone();
        let windows_entered = prior.map(|s| s.windows_entered.max(1)).unwrap_or(1);

        debug!(
            page_size,
            min_updated_at,
            cursor_present = !request_cursor.is_empty(),
            windows_entered,
            "Requesting page"
        );

        let page = match self.fetcher.fetch(request).await {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, min_updated_at, "Page fetch failed");
                return Err(err);
            }
        };

        let cursor = if page.cursor.is_empty() {
            request_cursor
        } else {
            page.cursor
        };
        let records = page.items;
        let has_more = records.len() >= page_size as usize;
        let next = self.advance(prior, min_updated_at, &cursor, has_more, windows_entered);

        Ok(FetchedPage {
            records,
            page_size,
            min_updated_at,
            cursor,
            has_more,
            next,
        })
    }

    fn build_request(&self, prior: Option<&PaginationState>) -> PageRequest<F::Options> {
        let (cursor, min_updated_at) = match prior {
            None => (String::new(), self.clock.initial_min_updated_at()),
            Some(state) => (
                state.cursor.clone(),
                state
                    .min_updated_at
                    .unwrap_or_else(|| self.clock.initial_min_updated_at()),
            ),
        };

        PageRequest {
            options: self.options.clone(),
            page_size: self.config.page_size(prior.is_none()),
            cursor,
            page_min_updated_at: min_updated_at,
        }
    }

    fn advance(
        &self,
        prior: Option<&PaginationState>,
        min_updated_at: i64,
        cursor: &str,
        has_more: bool,
        windows_entered: u32,
    ) -> NextPage {
        if has_more {
            let min_updated_at = prior
                .and_then(|s| s.min_updated_at)
                .unwrap_or(min_updated_at);
            return NextPage::Continue(PaginationState {
                cursor: cursor.to_string(),
                min_updated_at: Some(min_updated_at),
                has_more: true,
                windows_entered,
            });
        }

        if let Some(limit) = self.config.window_limit() {
            if windows_entered >= limit {
                warn!(
                    windows_entered,
                    oldest_min_updated_at = min_updated_at,
                    "Window limit reached, session exhausted"
                );
                return NextPage::Exhausted {
                    oldest_min_updated_at: min_updated_at,
                    windows_entered,
                };
            }
        }

        let shifted = self.clock.previous_window(min_updated_at);
        debug!(from = min_updated_at, to = shifted, "Window exhausted, shifting back");

        // The backend has no upper bound, so an empty cursor would replay the newer window
        NextPage::Continue(PaginationState {
            cursor: cursor.to_string(),
            min_updated_at: Some(shifted),
            has_more: false,
            windows_entered: windows_entered.saturating_add(1),
        })
    }
}
