//! In-memory [`MetricSource`] for unit tests.

use super::metric_source::{MetricSource, SourceResult};
use super::{CommentRecord, ContributorRecord, IssueRecord, LicenseRecord, MergeRecord, ReadmeRecord, RepoSpec, SourceError};
use chrono::{DateTime, Duration, TimeZone, Utc};
use core::sync::atomic::{AtomicUsize, Ordering};
use futures::future::BoxFuture;

#[derive(Debug)]
pub struct FakeSource {
    pub issue_comments: SourceResult<Vec<CommentRecord>>,
    pub pull_request_comments: SourceResult<Vec<CommentRecord>>,
    pub latest_merged_pull: SourceResult<Option<MergeRecord>>,
    pub license: SourceResult<Option<LicenseRecord>>,
    pub contributors: SourceResult<Vec<ContributorRecord>>,
    pub issues: SourceResult<Vec<IssueRecord>>,
    pub readme: SourceResult<Option<ReadmeRecord>>,
    pub calls: AtomicUsize,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            issue_comments: Ok(Vec::new()),
            pull_request_comments: Ok(Vec::new()),
            latest_merged_pull: Ok(None),
            license: Ok(None),
            contributors: Ok(Vec::new()),
            issues: Ok(Vec::new()),
            readme: Ok(None),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeSource {
    fn answer<'a, T: Clone + Send + 'a>(&'a self, value: &SourceResult<T>) -> BoxFuture<'a, SourceResult<T>> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        let value = value.clone();
        Box::pin(async move { value })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A fixed instant tests can offset from.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// A comment created at `t0` and updated `minutes` later.
pub fn comment_after(minutes: i64) -> CommentRecord {
    CommentRecord {
        created_at: t0(),
        updated_at: t0() + Duration::minutes(minutes),
    }
}

/// A pull request created at `t0` and merged `minutes` later.
pub fn merge_after(minutes: i64) -> MergeRecord {
    MergeRecord {
        created_at: t0(),
        merged_at: t0() + Duration::minutes(minutes),
    }
}

pub fn http_500() -> SourceError {
    SourceError::unavailable(ohno::app_err!("HTTP 500 Internal Server Error"))
}

impl MetricSource for FakeSource {
    fn issue_comments<'a>(&'a self, _repo: &'a RepoSpec, _count: u8) -> BoxFuture<'a, SourceResult<Vec<CommentRecord>>> {
        self.answer(&self.issue_comments)
    }

    fn pull_request_comments<'a>(&'a self, _repo: &'a RepoSpec, _count: u8) -> BoxFuture<'a, SourceResult<Vec<CommentRecord>>> {
        self.answer(&self.pull_request_comments)
    }

    fn latest_merged_pull<'a>(&'a self, _repo: &'a RepoSpec, _count: u8) -> BoxFuture<'a, SourceResult<Option<MergeRecord>>> {
        self.answer(&self.latest_merged_pull)
    }

    fn license<'a>(&'a self, _repo: &'a RepoSpec) -> BoxFuture<'a, SourceResult<Option<LicenseRecord>>> {
        self.answer(&self.license)
    }

    fn contributors<'a>(&'a self, _repo: &'a RepoSpec, _count: u8) -> BoxFuture<'a, SourceResult<Vec<ContributorRecord>>> {
        self.answer(&self.contributors)
    }

    fn issues<'a>(&'a self, _repo: &'a RepoSpec, _count: u8) -> BoxFuture<'a, SourceResult<Vec<IssueRecord>>> {
        self.answer(&self.issues)
    }

    fn readme<'a>(&'a self, _repo: &'a RepoSpec) -> BoxFuture<'a, SourceResult<Option<ReadmeRecord>>> {
        self.answer(&self.readme)
    }
}
