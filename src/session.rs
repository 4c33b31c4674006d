//! List sessions
//!
//! A [`ListSession`] is one infinite-scroll list: it owns the single chain of
//! pagination states for its filter and accumulates the pages fetched so far.
//! All fetching goes through `&mut self`, so at most one request is in flight
//! per session. Dropping a pending fetch future abandons it without touching
//! the session.

use futures::Stream;
use tracing::debug;

use crate::fetcher::PageFetcher;
use crate::filter::QueryKey;
use crate::pagination::{FetchedPage, NextPage, PaginationEngine, PaginationState};

pub struct ListSession<F: PageFetcher> {
    key: QueryKey,
    engine: PaginationEngine<F>,
    pages: Vec<FetchedPage<F::Record>>,
    next: Option<NextPage>,
}

impl<F: PageFetcher> ListSession<F> {
    pub fn new(key: QueryKey, engine: PaginationEngine<F>) -> Self {
        Self {
            key,
            engine,
            pages: Vec::new(),
            next: None,
        }
    }

    /// Identity of this list: flavor plus filter
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn engine(&self) -> &PaginationEngine<F> {
        &self.engine
    }

    /// Pages fetched so far, oldest request first
    pub fn pages(&self) -> &[FetchedPage<F::Record>] {
        &self.pages
    }

    /// All records fetched so far, in display order
    pub fn records(&self) -> impl Iterator<Item = &F::Record> {
        self.pages.iter().flat_map(|page| page.records.iter())
    }

    pub fn record_count(&self) -> usize {
        self.pages.iter().map(FetchedPage::len).sum()
    }

    /// State the next request would start from; `None` before the first page or once exhausted
    pub fn next_state(&self) -> Option<&PaginationState> {
        self.next.as_ref().and_then(NextPage::state)
    }

    /// Whether the window bound stopped the session
    pub fn is_exhausted(&self) -> bool {
        self.next.as_ref().is_some_and(NextPage::is_exhausted)
    }

    /// Fetch and keep the next page. Returns `None` once the session is exhausted.
    ///
    /// On error nothing is recorded; calling again retries the same page.
    pub async fn fetch_next_page(
        &mut self,
    ) -> Result<Option<&FetchedPage<F::Record>>, F::Error> {
        match self.advance().await? {
            Some(page) => {
                self.pages.push(page);
                Ok(self.pages.last())
            }
            None => Ok(None),
        }
    }

    /// Keep fetching until at least `target` records are loaded, the session is
    /// exhausted, or `max_requests` requests have been made. Returns the number
    /// of records loaded.
    ///
    /// Under-full pages shift the window, so filling a viewport may take
    /// several requests.
    pub async fn fill_to(&mut self, target: usize, max_requests: usize) -> Result<usize, F::Error> {
        let mut requests = 0;
        while self.record_count() < target && requests < max_requests {
            if self.fetch_next_page().await?.is_none() {
                break;
            }
            requests += 1;
        }
        debug!(
            query = %self.key,
            records = self.record_count(),
            requests,
            "Fill finished"
        );
        Ok(self.record_count())
    }

    /// Forget every page and start over from "now"
    pub fn reset(&mut self) {
        self.pages.clear();
        self.next = None;
    }

    /// Consume the session as a stream of pages' records
    ///
    /// The stream ends only when the session is exhausted. An error is yielded
    /// without advancing, so polling again retries the same page. With an
    /// unbounded window limit it never ends on its own.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<F::Record>, F::Error>> {
        futures::stream::unfold(self, |mut session| async move {
            match session.advance().await {
                Ok(Some(page)) => Some((Ok(page.records), session)),
                Ok(None) => None,
                Err(err) => Some((Err(err), session)),
            }
        })
    }

    async fn advance(&mut self) -> Result<Option<FetchedPage<F::Record>>, F::Error> {
        let prior = match &self.next {
            None => None,
            Some(NextPage::Continue(state)) => Some(state),
            Some(NextPage::Exhausted { .. }) => return Ok(None),
        };
        let page = self.engine.fetch_page(prior).await?;
        self.next = Some(page.next.clone());
        Ok(Some(page))
    }
}
