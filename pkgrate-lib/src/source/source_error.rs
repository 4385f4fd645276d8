use super::RateLimitInfo;
use core::fmt::{Display, Formatter};
use std::sync::Arc;

/// Why a read against the hosting API did not produce data.
///
/// An empty result is not an error: reads report legitimately missing records
/// as an empty list or `None`.
#[derive(Debug, Clone)]
pub enum SourceError {
    /// Transport failure or non-success HTTP status.
    Unavailable(Arc<ohno::AppError>),

    /// The API responded but the payload did not have the expected shape.
    Malformed(Arc<ohno::AppError>),

    /// The API refused the request because the quota is exhausted.
    RateLimited(RateLimitInfo),
}

impl SourceError {
    pub(crate) fn unavailable(e: ohno::AppError) -> Self {
        Self::Unavailable(Arc::new(e))
    }

    pub(crate) fn malformed(e: ohno::AppError) -> Self {
        Self::Malformed(Arc::new(e))
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "source unavailable: {e:#}"),
            Self::Malformed(e) => write!(f, "malformed upstream data: {e:#}"),
            Self::RateLimited(rl) => write!(f, "rate limited until {}", rl.reset_at.to_rfc3339()),
        }
    }
}

impl core::error::Error for SourceError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use ohno::app_err;

    #[test]
    fn test_display_unavailable() {
        let e = SourceError::unavailable(app_err!("HTTP 500"));
        assert!(e.to_string().starts_with("source unavailable"));
        assert!(e.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_display_malformed() {
        let e = SourceError::malformed(app_err!("missing field"));
        assert!(e.to_string().starts_with("malformed upstream data"));
    }

    #[test]
    fn test_display_rate_limited() {
        let e = SourceError::RateLimited(RateLimitInfo {
            remaining: 0,
            reset_at: DateTime::from_timestamp(1_704_067_200, 0).unwrap(),
        });
        assert!(e.to_string().contains("2024-01-01"));
    }
}
