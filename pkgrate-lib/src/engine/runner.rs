use super::{MetricFailure, MetricResult};
use crate::metrics::Metric;
use core::time::Duration;
use futures_util::future::join_all;
use tokio::time::Instant;

const LOG_TARGET: &str = "    runner";

/// Drives the metrics of one rating to completion.
///
/// Every metric fetches concurrently under its own timeout. A metric whose
/// fetch failed or timed out is still scored over whatever it managed to
/// collect, and never affects its siblings.
#[derive(Debug, Clone, Copy)]
pub struct Runner {
    metric_timeout: Duration,
}

impl Runner {
    #[must_use]
    pub const fn new(metric_timeout: Duration) -> Self {
        Self { metric_timeout }
    }

    /// Run all metrics and return one result per metric, in input order.
    pub async fn run(&self, metrics: Vec<Box<dyn Metric>>) -> Vec<MetricResult> {
        join_all(metrics.into_iter().map(|m| run_one(m, self.metric_timeout))).await
    }
}

async fn run_one(mut metric: Box<dyn Metric>, timeout: Duration) -> MetricResult {
    let name = metric.info().name();
    let start = Instant::now();

    let outcome = tokio::time::timeout(timeout, metric.fetch_data()).await;
    let failure = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(MetricFailure::from_source(name, &e).with_partial(metric.collected_any())),
        Err(_) => Some(MetricFailure::timed_out(name, timeout)),
    };

    let raw = metric.calculate_metric();
    let score = metric.score();
    let latency = start.elapsed();

    let info = metric.info();
    match &failure {
        Some(f) => log::warn!(
            target: LOG_TARGET,
            "{name} for '{}' degraded to {score:.3}: {}",
            info.repo(),
            f.message
        ),
        None => log::debug!(
            target: LOG_TARGET,
            "{name} [{}/{}] for '{}' scored {score:.3} in {latency:?}",
            info.category(),
            info.owner_tag(),
            info.repo()
        ),
    }

    MetricResult {
        name,
        score,
        raw,
        latency,
        failure,
    }
}
