use crate::metrics::MetricName;
use crate::source::SourceError;
use core::fmt::{Display, Formatter};
use core::time::Duration;
use serde::Serialize;
use strum::Display as StrumDisplay;

/// What went wrong while a metric was collecting its evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, Serialize)]
pub enum FailureKind {
    SourceUnavailable,
    MalformedUpstreamData,
    RateLimited,
    TimedOut,
}

impl FailureKind {
    /// Whether the failure means the hosting service could not be used at all.
    #[must_use]
    pub const fn is_outage(self) -> bool {
        matches!(self, Self::SourceUnavailable | Self::RateLimited)
    }
}

/// A fetch failure that affected one metric of a rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricFailure {
    pub metric: MetricName,
    pub kind: FailureKind,
    pub message: String,

    /// Some of the metric's reads succeeded before this failure
    pub partial: bool,
}

impl MetricFailure {
    #[must_use]
    pub fn from_source(metric: MetricName, error: &SourceError) -> Self {
        let kind = match error {
            SourceError::Unavailable(_) => FailureKind::SourceUnavailable,
            SourceError::Malformed(_) => FailureKind::MalformedUpstreamData,
            SourceError::RateLimited(_) => FailureKind::RateLimited,
        };

        Self {
            metric,
            kind,
            message: error.to_string(),
            partial: false,
        }
    }

    #[must_use]
    pub const fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Whether this failure shows the hosting service could not be used at all.
    #[must_use]
    pub const fn is_outage(&self) -> bool {
        self.kind.is_outage() && !self.partial
    }

    #[must_use]
    pub fn timed_out(metric: MetricName, after: Duration) -> Self {
        Self {
            metric,
            kind: FailureKind::TimedOut,
            message: format!("timed out after {after:?}"),
            partial: false,
        }
    }
}

impl Display for MetricFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({}): {}", self.metric, self.kind, self.message)
    }
}

/// Outcome of one metric for one rating.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    pub name: MetricName,

    /// Normalized value in [0, 1]
    pub score: f64,

    /// Literal value of the metric before normalization
    pub raw: f64,

    /// Wall-clock time spent fetching and computing
    pub latency: Duration,

    pub failure: Option<MetricFailure>,
}
