use super::{Aggregator, EvaluateError, MetricFailure, NetScoreResult, PackageRatingRequest, Runner, WeightTable};
use crate::metrics::{MetricName, MetricSettings, create_metrics};
use crate::source::MetricSource;
use core::time::Duration;
use std::collections::HashSet;
use std::sync::Arc;

const LOG_TARGET: &str = " evaluator";

/// Everything the evaluator needs besides a source.
#[derive(Debug, Clone)]
pub struct EvaluatorOptions {
    pub weights: WeightTable,
    pub metric_settings: MetricSettings,
    pub metric_timeout: Duration,

    /// Metrics that are never run; they contribute 0 at their weight
    pub disabled: HashSet<MetricName>,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            metric_settings: MetricSettings::default(),
            metric_timeout: Duration::from_secs(30),
            disabled: HashSet::new(),
        }
    }
}

/// Rates packages: builds a fresh metric set per request, runs it and
/// aggregates the results.
///
/// An evaluator may rate many packages concurrently; they share only the
/// metric source.
#[derive(Debug, Clone)]
pub struct Evaluator {
    source: Arc<dyn MetricSource>,
    metric_settings: MetricSettings,
    disabled: HashSet<MetricName>,
    runner: Runner,
    aggregator: Aggregator,
}

impl Evaluator {
    #[must_use]
    pub fn new(source: Arc<dyn MetricSource>, options: EvaluatorOptions) -> Self {
        Self {
            source,
            metric_settings: options.metric_settings,
            disabled: options.disabled,
            runner: Runner::new(options.metric_timeout),
            aggregator: Aggregator::new(options.weights),
        }
    }

    /// Rate the package hosted at `owner/name`.
    pub async fn evaluate(&self, owner: &str, name: &str) -> Result<NetScoreResult, EvaluateError> {
        let request = PackageRatingRequest::new(owner, name).map_err(EvaluateError::InvalidRequest)?;
        self.evaluate_request(&request).await
    }

    /// Rate a package given as `owner/name` or a repository URL.
    pub async fn evaluate_package(&self, identifier: &str) -> Result<NetScoreResult, EvaluateError> {
        let request = PackageRatingRequest::parse(identifier).map_err(EvaluateError::InvalidRequest)?;
        self.evaluate_request(&request).await
    }

    /// Rate an already resolved request.
    ///
    /// Fails only when every metric failed because the hosting service could
    /// not be used. Any other degradation is reported inside the rating.
    pub async fn evaluate_request(&self, request: &PackageRatingRequest) -> Result<NetScoreResult, EvaluateError> {
        let repo = request.repo();
        log::info!(target: LOG_TARGET, "Rating {request}");

        let metrics = create_metrics(repo, &self.source, &self.metric_settings, |name| !self.disabled.contains(&name));
        let results = self.runner.run(metrics).await;

        let all_unavailable = !results.is_empty()
            && results
                .iter()
                .all(|r| r.failure.as_ref().is_some_and(MetricFailure::is_outage));

        if all_unavailable {
            return Err(EvaluateError::AllSourcesUnavailable {
                repo: repo.clone(),
                failures: results.into_iter().filter_map(|r| r.failure).collect(),
            });
        }

        let rating = self.aggregator.aggregate(repo.clone(), results);
        log::info!(
            target: LOG_TARGET,
            "Rated {request}: {:.3} in {:?} ({} degraded metric(s))",
            rating.net_score,
            rating.latency,
            rating.failures.len()
        );

        Ok(rating)
    }
}
