//! Deployment list

use serde::{Deserialize, Serialize};

use crate::config::PagerConfig;
use crate::error::PagerError;
use crate::fetcher::PageFetcher;
use crate::filter::{self, FilterOptions, LabelPair, ListKind};
use crate::session::ListSession;
use crate::stage::{HasStages, Stage};

/// Deployment list filter as the UI holds it
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeploymentFilterOptions {
    /// Numeric deployment status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Numeric application kind code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    /// `"key:value"` strings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Backend-side deployment list options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDeploymentsOptions {
    pub application_name: String,
    pub application_ids: Vec<String>,
    pub kinds: Vec<i32>,
    pub statuses: Vec<i32>,
    pub labels: Vec<LabelPair>,
}

impl FilterOptions for DeploymentFilterOptions {
    type Request = ListDeploymentsOptions;

    const KIND: ListKind = ListKind::Deployments;

    fn to_request(&self) -> Result<ListDeploymentsOptions, PagerError> {
        Ok(ListDeploymentsOptions {
            application_name: filter::or_empty(&self.application_name),
            application_ids: filter::single(&self.application_id),
            kinds: filter::parse_code_filter("kind", self.kind.as_deref())?,
            statuses: filter::parse_code_filter("status", self.status.as_deref())?,
            labels: filter::parse_labels(self.labels.as_slice()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub application_id: String,
    #[serde(default)]
    pub application_name: String,
    #[serde(default)]
    pub kind: i32,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl HasStages for Deployment {
    fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

/// Open a deployment list session
pub fn deployments_session<F>(
    fetcher: F,
    filter: &DeploymentFilterOptions,
    config: PagerConfig,
) -> Result<ListSession<F>, PagerError>
where
    F: PageFetcher<Options = ListDeploymentsOptions, Record = Deployment>,
{
    super::open_session(fetcher, filter, config)
}
