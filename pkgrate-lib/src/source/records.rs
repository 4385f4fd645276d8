//! Raw records returned by the hosting API, with only the fields we need.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An issue or pull-request review comment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentRecord {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pull request as listed by the pulls endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRecord {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

/// Creation and merge timestamps of a merged pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    pub created_at: DateTime<Utc>,
    pub merged_at: DateTime<Utc>,
}

impl PullRecord {
    /// Returns the merge record if this pull request has been merged.
    #[must_use]
    pub fn merge(&self) -> Option<MergeRecord> {
        self.merged_at.map(|merged_at| MergeRecord {
            created_at: self.created_at,
            merged_at,
        })
    }
}

/// Issue state: open or closed
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Minimal issue info. The issues endpoint also lists pull requests, which
/// carry a `pull_request` object.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    pub state: IssueState,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl IssueRecord {
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// A repository contributor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributorRecord {
    #[serde(default)]
    pub login: Option<String>,
    pub contributions: u64,
}

/// The license detected for a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRecord {
    pub spdx_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LicenseEnvelope {
    pub license: Option<LicenseBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LicenseBody {
    pub spdx_id: Option<String>,
}

/// The repository README
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReadmeRecord {
    pub size: u64,
}
