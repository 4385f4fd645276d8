//! Thin HTTP layer over the hosting REST API
//!
//! One GET per call, classified into an [`ApiOutcome`]. Nothing is retried
//! here; pausing after a rate limit is the caller's job.

use chrono::{DateTime, Utc};
use core::time::Duration;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Quota state advertised by the `x-ratelimit-*` response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitInfo {
    /// Read the quota headers. `None` unless both are present and well formed.
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        let remaining = header("x-ratelimit-remaining")?.parse().ok()?;
        let reset_at = DateTime::from_timestamp(header("x-ratelimit-reset")?.parse().ok()?, 0)?;

        Some(Self { remaining, reset_at })
    }

    /// Assumed quota when the service throttles without saying until when.
    fn exhausted_for_an_hour(now: DateTime<Utc>) -> Self {
        Self {
            remaining: 0,
            reset_at: now + chrono::Duration::hours(1),
        }
    }
}

/// How a single API call ended
#[derive(Debug)]
pub enum ApiOutcome {
    /// 2xx, with the quota headers if present
    Ok(reqwest::Response, Option<RateLimitInfo>),

    /// 404
    NotFound,

    /// 429, or 403 with an exhausted quota
    RateLimited(RateLimitInfo),

    /// Transport error or any other status
    Failed(ohno::AppError),
}

#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Success,
    NotFound,
    RateLimited(RateLimitInfo),
    Failed,
}

/// Decide what a status code means. A 403 is only throttling when the quota
/// headers say nothing is left; otherwise it is a plain permission failure.
fn classify(status: StatusCode, quota: Option<RateLimitInfo>, now: DateTime<Utc>) -> Verdict {
    if status.is_success() {
        return Verdict::Success;
    }

    let exhausted = quota.is_some_and(|q| q.remaining == 0);
    match status {
        StatusCode::TOO_MANY_REQUESTS => Verdict::RateLimited(quota.unwrap_or_else(|| RateLimitInfo::exhausted_for_an_hour(now))),
        StatusCode::FORBIDDEN if exhausted => Verdict::RateLimited(quota.unwrap_or_else(|| RateLimitInfo::exhausted_for_an_hour(now))),
        StatusCode::NOT_FOUND => Verdict::NotFound,
        _ => Verdict::Failed,
    }
}

/// HTTP client for a GitHub-compatible REST API
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Build a client that sends `token` (if any) and gives up on a request after `request_timeout`.
    pub fn new(token: Option<&str>, base_url: impl Into<String>, request_timeout: Duration) -> crate::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("pkgrate").timeout(request_timeout);

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("token {token}"))?;
            value.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let base_url: String = base_url.into();
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn api_call(&self, url: &str) -> ApiOutcome {
        let resp = match self.http.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => return ApiOutcome::Failed(e.into()),
        };

        let quota = RateLimitInfo::from_headers(resp.headers());
        let status = resp.status();

        match classify(status, quota, Utc::now()) {
            Verdict::Success => ApiOutcome::Ok(resp, quota),
            Verdict::NotFound => ApiOutcome::NotFound,
            Verdict::RateLimited(info) => ApiOutcome::RateLimited(info),
            Verdict::Failed => ApiOutcome::Failed(ohno::app_err!("HTTP {status} from '{url}'")),
        }
    }
}
