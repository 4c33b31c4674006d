//! Filter options
//!
//! Caller-facing filters arrive in the loose shape a URL query string can
//! carry (optional strings, `"key:value"` label strings). Each list flavor
//! converts its filter once, when the session opens, into the options the
//! backend expects; the engine then passes those through untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PagerError;

/// The three list flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListKind {
    #[serde(rename = "deployment")]
    Deployments,
    DeploymentTraces,
    Events,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Deployments => "deployment",
            ListKind::DeploymentTraces => "deployment-traces",
            ListKind::Events => "events",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one list session: two sessions share nothing unless their keys are equal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryKey {
    pub kind: ListKind,
    pub filter: serde_json::Value,
}

impl QueryKey {
    pub fn new(kind: ListKind, filter: serde_json::Value) -> Self {
        Self { kind, filter }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.filter)
    }
}

/// Conversion from a caller filter to backend request options
pub trait FilterOptions: Serialize {
    type Request: Clone + Send + Sync;

    const KIND: ListKind;

    fn to_request(&self) -> Result<Self::Request, PagerError>;

    fn query_key(&self) -> QueryKey {
        // Filters are plain data; a serialization failure degrades to a kind-only key.
        let filter = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        QueryKey::new(Self::KIND, filter)
    }
}

/// A `key:value` label selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelPair {
    pub key: String,
    pub value: String,
}

impl LabelPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for LabelPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

impl FromStr for LabelPair {
    type Err = PagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label_pair(s).ok_or_else(|| {
            PagerError::InvalidFilterFormat(format!(
                "label '{}' must be exactly one non-empty key and value separated by ':'",
                s
            ))
        })
    }
}

/// Lenient label parsing: anything but exactly two non-empty parts yields `None`
pub fn parse_label_pair(label: &str) -> Option<LabelPair> {
    let mut parts = label.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => {
            Some(LabelPair::new(key, value))
        }
        _ => None,
    }
}

/// Parse every well-formed label, silently dropping the rest
pub fn parse_labels<S: AsRef<str>>(labels: &[S]) -> Vec<LabelPair> {
    labels
        .iter()
        .filter_map(|label| parse_label_pair(label.as_ref()))
        .collect()
}

/// Turn an optional numeric filter (status, kind) into a zero- or one-element code list
pub fn parse_code_filter(field: &str, value: Option<&str>) -> Result<Vec<i32>, PagerError> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(value) => value,
    };
    value.parse::<i32>().map(|code| vec![code]).map_err(|_| {
        PagerError::InvalidFilterFormat(format!("{} '{}' is not a numeric code", field, value))
    })
}

/// Optional string to backend string, defaulting to empty
pub(crate) fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Optional string to a zero- or one-element list
pub(crate) fn single(value: &Option<String>) -> Vec<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| vec![v.to_string()])
        .unwrap_or_default()
}
