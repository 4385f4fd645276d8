use super::{MetricResult, NetScoreResult, WeightTable};
use crate::metrics::clamp_score;
use crate::source::RepoSpec;
use tokio::time::Instant;

/// Combines per-metric results into a net score.
///
/// Metrics that are missing from the run contribute 0 at their full weight;
/// the remaining weights are not re-normalized, so an unavailable upstream
/// always lowers the score.
#[derive(Debug, Clone)]
pub struct Aggregator {
    weights: WeightTable,
}

impl Aggregator {
    #[must_use]
    pub const fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &WeightTable {
        &self.weights
    }

    #[must_use]
    pub fn aggregate(&self, repo: RepoSpec, mut metrics: Vec<MetricResult>) -> NetScoreResult {
        let start = Instant::now();

        metrics.sort_by_key(|m| m.name);

        let net_score: f64 = self
            .weights
            .iter()
            .map(|(name, weight)| weight * metrics.iter().find(|m| m.name == name).map_or(0.0, |m| m.score))
            .sum();

        let failures = metrics.iter().filter_map(|m| m.failure.clone()).collect();
        let slowest = metrics.iter().map(|m| m.latency).max().unwrap_or_default();

        NetScoreResult {
            repo,
            net_score: clamp_score(net_score),
            metrics,
            failures,
            latency: slowest + start.elapsed(),
        }
    }
}
