//! Event list

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::PagerConfig;
use crate::error::PagerError;
use crate::fetcher::PageFetcher;
use crate::filter::{self, FilterOptions, LabelPair, ListKind};
use crate::session::ListSession;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventFilterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Numeric event status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// `"key:value"` strings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsOptions {
    pub name: String,
    pub statuses: Vec<i32>,
    pub labels: Vec<LabelPair>,
}

impl FilterOptions for EventFilterOptions {
    type Request = ListEventsOptions;

    const KIND: ListKind = ListKind::Events;

    fn to_request(&self) -> Result<ListEventsOptions, PagerError> {
        Ok(ListEventsOptions {
            name: filter::or_empty(&self.name),
            statuses: filter::parse_code_filter("status", self.status.as_deref())?,
            labels: filter::parse_labels(self.labels.as_slice()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub status_description: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

pub fn events_session<F>(
    fetcher: F,
    filter: &EventFilterOptions,
    config: PagerConfig,
) -> Result<ListSession<F>, PagerError>
where
    F: PageFetcher<Options = ListEventsOptions, Record = Event>,
{
    super::open_session(fetcher, filter, config)
}
