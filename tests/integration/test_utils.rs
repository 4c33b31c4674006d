//! In-memory list backend shared by the integration tests

use std::sync::Mutex;

use async_trait::async_trait;
use history_pager::lists::{Deployment, ListDeploymentsOptions};
use history_pager::{Page, PageFetcher, PageRequest};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("backend error: {0}")]
pub struct BackendError(pub String);

/// Deployments held newest first; cursors are the `updated_at` of the last item served
pub struct InMemoryDeployments {
    deployments: Vec<Deployment>,
    requests: Mutex<Vec<PageRequest<ListDeploymentsOptions>>>,
    failures: Mutex<Vec<usize>>,
}

impl InMemoryDeployments {
    pub fn new(mut deployments: Vec<Deployment>) -> Self {
        deployments.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Self {
            deployments,
            requests: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// One deployment per timestamp, ids `d<timestamp>`
    pub fn at(timestamps: &[i64]) -> Self {
        Self::new(timestamps.iter().map(|ts| deployment(*ts)).collect())
    }

    /// Fail the request with this zero-based index
    pub fn fail_request(&self, index: usize) {
        self.failures.lock().unwrap().push(index);
    }

    pub fn requests(&self) -> Vec<PageRequest<ListDeploymentsOptions>> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn deployment(updated_at: i64) -> Deployment {
    Deployment {
        id: format!("d{}", updated_at),
        application_id: "app-1".to_string(),
        updated_at,
        ..Default::default()
    }
}

#[async_trait]
impl PageFetcher for InMemoryDeployments {
    type Options = ListDeploymentsOptions;
    type Record = Deployment;
    type Error = BackendError;

    async fn fetch(
        &self,
        request: PageRequest<ListDeploymentsOptions>,
    ) -> Result<Page<Deployment>, BackendError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        if self.failures.lock().unwrap().contains(&index) {
            return Err(BackendError(format!("request {} refused", index)));
        }

        let before: Option<i64> = if request.cursor.is_empty() {
            None
        } else {
            Some(request.cursor.parse().map_err(|_| BackendError("bad cursor".into()))?)
        };

        let items: Vec<Deployment> = self
            .deployments
            .iter()
            .filter(|d| d.updated_at >= request.page_min_updated_at)
            .filter(|d| before.map_or(true, |ts| d.updated_at < ts))
            .filter(|d| {
                request.options.application_ids.is_empty()
                    || request.options.application_ids.contains(&d.application_id)
            })
            .take(request.page_size as usize)
            .cloned()
            .collect();

        let cursor = items
            .last()
            .map(|d| d.updated_at.to_string())
            .unwrap_or_default();
        Ok(Page::new(items, cursor))
    }
}
