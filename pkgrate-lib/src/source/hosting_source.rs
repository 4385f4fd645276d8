use super::client::{ApiOutcome, Client, RateLimitInfo};
use super::metric_source::{MetricSource, SourceResult};
use super::records::{LicenseEnvelope, PullRecord};
use super::{CommentRecord, ContributorRecord, IssueRecord, LicenseRecord, MergeRecord, ReadmeRecord, RepoSpec, SourceError, Throttler};
use crate::Result;
use chrono::Utc;
use core::time::Duration;
use futures::future::BoxFuture;
use ohno::EnrichableExt;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;

const LOG_TARGET: &str = "    source";

/// Connection settings for [`HostingSource`].
#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// Base API URL, e.g. `https://api.github.com`
    pub base_url: String,

    /// Personal access token sent with every request
    pub token: Option<String>,

    /// Per-HTTP-request timeout
    pub request_timeout: Duration,

    /// Maximum number of in-flight requests across all ratings
    pub max_concurrent_requests: usize,

    /// Upper bound on how long dispatch pauses after a rate-limit response
    pub max_rate_limit_wait: Duration,
}

/// Whether a 404 means "no such record" or a failure to find the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Missing {
    IsEmpty,
    IsFailure,
}

/// [`MetricSource`] backed by a GitHub-style REST API.
#[derive(Debug, Clone)]
pub struct HostingSource {
    client: Client,
    throttler: Arc<Throttler>,
    max_rate_limit_wait: Duration,
}

impl HostingSource {
    pub fn new(settings: &SourceSettings) -> Result<Self> {
        let client = Client::new(settings.token.as_deref(), settings.base_url.as_str(), settings.request_timeout)?;

        Ok(Self {
            client,
            throttler: Throttler::new(settings.max_concurrent_requests),
            max_rate_limit_wait: settings.max_rate_limit_wait,
        })
    }

    /// Construct API URL for a repository with a path suffix
    fn repo_url(&self, repo: &RepoSpec, suffix: &str) -> String {
        format!("{}/repos/{}/{}{suffix}", self.client.base_url(), repo.owner(), repo.repo())
    }

    /// GET a repository resource and decode it as JSON.
    ///
    /// Returns `Ok(None)` for a success without a body, and for a 404 when
    /// `missing` is [`Missing::IsEmpty`].
    async fn get_json<T: DeserializeOwned>(&self, repo: &RepoSpec, suffix: &str, missing: Missing) -> SourceResult<Option<T>> {
        let url = self.repo_url(repo, suffix);

        let _permit = self.throttler.acquire().await;
        log::debug!(target: LOG_TARGET, "GET {url}");

        match self.client.api_call(&url).await {
            ApiOutcome::Ok(resp, rate_limit) => {
                if let Some(rl) = rate_limit {
                    log::trace!(target: LOG_TARGET, "{} request(s) remaining until {}", rl.remaining, rl.reset_at);
                }

                // an empty repository answers some list endpoints with 204 and no body
                if resp.status() == StatusCode::NO_CONTENT {
                    return Ok(None);
                }

                let body = resp.bytes().await.map_err(|e| {
                    SourceError::unavailable(ohno::AppError::new(e).enrich_with(|| format!("reading response from '{url}'")))
                })?;

                if body.iter().all(u8::is_ascii_whitespace) {
                    return Ok(None);
                }

                match serde_json::from_slice::<T>(&body) {
                    Ok(data) => Ok(Some(data)),
                    Err(e) => Err(SourceError::malformed(
                        ohno::AppError::new(e).enrich_with(|| format!("decoding response from '{url}'")),
                    )),
                }
            }
            ApiOutcome::NotFound if missing == Missing::IsEmpty => Ok(None),
            ApiOutcome::NotFound => Err(SourceError::unavailable(ohno::app_err!("repository '{repo}' not found"))),
            ApiOutcome::RateLimited(rate_limit) => {
                self.pause_for_rate_limit(repo, rate_limit);
                Err(SourceError::RateLimited(rate_limit))
            }
            ApiOutcome::Failed(e) => Err(SourceError::unavailable(e.enrich_with(|| format!("fetching '{url}'")))),
        }
    }

    /// Pause every pending request until the quota resets, bounded by the configured maximum.
    fn pause_for_rate_limit(&self, repo: &RepoSpec, rate_limit: RateLimitInfo) {
        let now = Utc::now();
        let wait = (rate_limit.reset_at - now).to_std().unwrap_or(Duration::ZERO).min(self.max_rate_limit_wait);

        if !wait.is_zero() && self.throttler.pause_for(wait) {
            log::warn!(
                target: LOG_TARGET,
                "Hit API rate limit while reading '{repo}', pausing requests for {}s",
                wait.as_secs()
            );
        }
    }

    async fn list<T: DeserializeOwned>(&self, repo: &RepoSpec, suffix: &str) -> SourceResult<Vec<T>> {
        Ok(self.get_json::<Vec<T>>(repo, suffix, Missing::IsFailure).await?.unwrap_or_default())
    }
}

impl MetricSource for HostingSource {
    fn issue_comments<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Vec<CommentRecord>>> {
        Box::pin(async move {
            self.list(repo, &format!("/issues/comments?sort=created&direction=desc&per_page={count}"))
                .await
        })
    }

    fn pull_request_comments<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Vec<CommentRecord>>> {
        Box::pin(async move {
            self.list(repo, &format!("/pulls/comments?sort=created&direction=desc&per_page={count}"))
                .await
        })
    }

    fn latest_merged_pull<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Option<MergeRecord>>> {
        Box::pin(async move {
            let pulls: Vec<PullRecord> = self
                .list(repo, &format!("/pulls?state=closed&sort=updated&direction=desc&per_page={count}"))
                .await?;

            Ok(pulls.iter().find_map(PullRecord::merge))
        })
    }

    fn license<'a>(&'a self, repo: &'a RepoSpec) -> BoxFuture<'a, SourceResult<Option<LicenseRecord>>> {
        Box::pin(async move {
            let envelope: Option<LicenseEnvelope> = self.get_json(repo, "/license", Missing::IsEmpty).await?;

            // GitHub reports unrecognized licenses as `NOASSERTION`
            Ok(envelope
                .and_then(|e| e.license)
                .and_then(|l| l.spdx_id)
                .filter(|id| !id.is_empty() && id != "NOASSERTION")
                .map(|spdx_id| LicenseRecord { spdx_id }))
        })
    }

    fn contributors<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Vec<ContributorRecord>>> {
        Box::pin(async move { self.list(repo, &format!("/contributors?per_page={count}")).await })
    }

    fn issues<'a>(&'a self, repo: &'a RepoSpec, count: u8) -> BoxFuture<'a, SourceResult<Vec<IssueRecord>>> {
        Box::pin(async move { self.list(repo, &format!("/issues?state=all&per_page={count}")).await })
    }

    fn readme<'a>(&'a self, repo: &'a RepoSpec) -> BoxFuture<'a, SourceResult<Option<ReadmeRecord>>> {
        Box::pin(async move { self.get_json(repo, "/readme", Missing::IsEmpty).await })
    }
}
