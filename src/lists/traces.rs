//! Deployment trace list

use serde::{Deserialize, Serialize};

use crate::config::PagerConfig;
use crate::error::PagerError;
use crate::fetcher::PageFetcher;
use crate::filter::{self, FilterOptions, ListKind};
use crate::lists::deployments::Deployment;
use crate::session::ListSession;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeploymentTraceFilterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDeploymentTracesOptions {
    pub commit_hash: String,
}

impl FilterOptions for DeploymentTraceFilterOptions {
    type Request = ListDeploymentTracesOptions;

    const KIND: ListKind = ListKind::DeploymentTraces;

    fn to_request(&self) -> Result<ListDeploymentTracesOptions, PagerError> {
        Ok(ListDeploymentTracesOptions {
            commit_hash: filter::or_empty(&self.commit_hash),
        })
    }
}

/// A commit that triggered deployments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTrace {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub commit_hash: String,
    #[serde(default)]
    pub commit_url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub commit_timestamp: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// One trace with the deployments it produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTraceRes {
    pub trace: DeploymentTrace,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
}

pub fn deployment_traces_session<F>(
    fetcher: F,
    filter: &DeploymentTraceFilterOptions,
    config: PagerConfig,
) -> Result<ListSession<F>, PagerError>
where
    F: PageFetcher<Options = ListDeploymentTracesOptions, Record = DeploymentTraceRes>,
{
    super::open_session(fetcher, filter, config)
}
