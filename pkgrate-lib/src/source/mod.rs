//! Evidence collection from the repository hosting service
//!
//! This module is a pure I/O adapter: it issues authenticated requests against
//! the hosting REST API and hands back raw, time-stamped records. It holds no
//! scoring logic.
//!
//! # Implementation Model
//!
//! Metrics depend on the [`MetricSource`] trait rather than on HTTP, so scoring
//! code can be exercised against in-memory sources. [`HostingSource`] is the
//! production implementation. Each read returns a [`SourceResult`]:
//! - `Ok` with an empty list or `None` when the service legitimately has no
//!   matching record (e.g. a repository without issues)
//! - `Err(`[`SourceError`]`)` when the service could not be reached, answered
//!   with a non-success status, returned an unexpected payload, or refused the
//!   request because the quota is exhausted
//!
//! All requests from all concurrent ratings go through one shared
//! [`Throttler`], which bounds in-flight requests and pauses dispatch until the
//! advertised reset time after a rate-limit response. Reads are never retried.

mod client;
#[cfg(test)]
pub(crate) mod fake_source;
mod hosting_source;
mod metric_source;
mod records;
mod repo_spec;
mod source_error;
mod throttler;

pub use client::RateLimitInfo;
pub use hosting_source::{HostingSource, SourceSettings};
pub use metric_source::{MetricSource, SourceResult};
pub use records::{CommentRecord, ContributorRecord, IssueRecord, IssueState, LicenseRecord, MergeRecord, PullRecord, ReadmeRecord};
pub use repo_spec::RepoSpec;
pub use source_error::SourceError;
pub use throttler::Throttler;
