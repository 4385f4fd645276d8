use super::{MetricCategory, MetricName};
use crate::source::{RepoSpec, SourceResult};
use futures::future::BoxFuture;

/// Identity and coordinates shared by every metric.
///
/// Concrete metrics embed one of these next to their own accumulators.
#[derive(Debug, Clone)]
pub struct MetricInfo {
    name: MetricName,
    category: MetricCategory,
    owner_tag: &'static str,
    repo: RepoSpec,
    fetched: bool,
}

impl MetricInfo {
    #[must_use]
    pub const fn new(name: MetricName, category: MetricCategory, owner_tag: &'static str, repo: RepoSpec) -> Self {
        Self {
            name,
            category,
            owner_tag,
            repo,
            fetched: false,
        }
    }

    #[must_use]
    pub const fn name(&self) -> MetricName {
        self.name
    }

    #[must_use]
    pub const fn category(&self) -> MetricCategory {
        self.category
    }

    /// Who is responsible for the metric's implementation, for provenance in logs.
    #[must_use]
    pub const fn owner_tag(&self) -> &'static str {
        self.owner_tag
    }

    #[must_use]
    pub const fn repo(&self) -> &RepoSpec {
        &self.repo
    }

    /// Record that a fetch has started. Returns `false` if one already did.
    pub const fn begin_fetch(&mut self) -> bool {
        !core::mem::replace(&mut self.fetched, true)
    }
}

/// A scoring unit for one quality dimension of a package.
///
/// Fetching is the impure, fallible, slow half; calculating is the pure, total,
/// fast half. The runner drives `fetch_data` for all metrics concurrently and
/// then calls `score` on each one regardless of how its fetch ended.
pub trait Metric: Send + core::fmt::Debug {
    fn info(&self) -> &MetricInfo;

    /// Perform all network reads needed to populate the accumulators.
    ///
    /// Only the first call does any work. Records the upstream legitimately
    /// lacks leave their accumulator unset. Accumulator writes happen together
    /// after every read has finished, so dropping the future part way through
    /// leaves the metric exactly as it was.
    fn fetch_data(&mut self) -> BoxFuture<'_, SourceResult<()>>;

    /// The metric's value over whichever accumulators are set.
    ///
    /// Never fails and never performs I/O. Returns 0 when nothing is set.
    fn calculate_metric(&self) -> f64;

    /// Whether some upstream read succeeded even though `fetch_data` failed.
    ///
    /// Metrics that make a single read never collect anything on failure.
    fn collected_any(&self) -> bool {
        false
    }

    /// The value normalized to [0, 1], as used for aggregation.
    fn score(&self) -> f64 {
        clamp_score(self.calculate_metric())
    }
}

/// Bound a value to [0, 1], mapping NaN and infinities to 0.
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 }
}

/// Tuning shared by every metric of a rating, injected at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSettings {
    /// Count bound for comment and merge reads
    pub result_count: u8,

    /// Count bound for contributor and issue reads
    pub sample_size: u8,

    /// Response time, in minutes, that maps to a responsiveness score of 0.5
    pub response_half_life_minutes: f64,
}

impl Default for MetricSettings {
    fn default() -> Self {
        Self {
            result_count: 1,
            sample_size: 100,
            response_half_life_minutes: 1440.0,
        }
    }
}
