use super::{CommentRecord, ContributorRecord, IssueRecord, LicenseRecord, MergeRecord, ReadmeRecord, RepoSpec, SourceError};
use futures::future::BoxFuture;

pub type SourceResult<T> = Result<T, SourceError>;

/// Read access to the evidence a hosting service keeps about a repository.
///
/// Every read distinguishes "no matching record" (an empty list or `None`)
/// from a failure to reach or understand the service (`Err`). Implementations
/// are shared by every metric of every concurrent rating and must be safe to
/// call concurrently.
pub trait MetricSource: Send + Sync + core::fmt::Debug {
    /// The `count` most recently created issue comments, newest first.
    fn issue_comments<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Vec<CommentRecord>>>;

    /// The `count` most recently created pull-request review comments, newest first.
    fn pull_request_comments<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Vec<CommentRecord>>>;

    /// The newest merged pull request among the `count` most recently updated closed ones.
    fn latest_merged_pull<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Option<MergeRecord>>>;

    /// The license detected for the repository.
    fn license<'a>(&'a self, repo: &'a RepoSpec) -> BoxFuture<'a, SourceResult<Option<LicenseRecord>>>;

    /// Up to `count` contributors, most active first.
    fn contributors<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Vec<ContributorRecord>>>;

    /// The `count` most recent issues in any state. Pull requests are included
    /// and carry a marker.
    fn issues<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Vec<IssueRecord>>>;

    /// The repository README.
    fn readme<'a>(&'a self, repo: &'a RepoSpec) -> BoxFuture<'a, SourceResult<Option<ReadmeRecord>>>;
}
