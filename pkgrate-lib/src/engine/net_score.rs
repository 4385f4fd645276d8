use super::{MetricFailure, MetricResult};
use crate::metrics::MetricName;
use crate::source::RepoSpec;
use core::time::Duration;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// The rating of one package.
#[derive(Debug, Clone, PartialEq)]
pub struct NetScoreResult {
    pub repo: RepoSpec,

    /// Weighted sum of the metric scores, in [0, 1]
    pub net_score: f64,

    /// Per-metric outcomes, in metric order
    pub metrics: Vec<MetricResult>,

    /// Fetch failures that degraded some metrics
    pub failures: Vec<MetricFailure>,

    /// Slowest metric plus aggregation time
    pub latency: Duration,
}

impl NetScoreResult {
    #[must_use]
    pub fn metric(&self, name: MetricName) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.name == name)
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Round to three decimal places, as the registry displays scores and seconds.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Serializes to the registry rating shape:
/// `{"NetScore": .., "NetScoreLatency": .., "<Metric>": .., "<Metric>Latency": .., ...}`
/// with latencies in seconds.
impl Serialize for NetScoreResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + 2 * self.metrics.len()))?;
        map.serialize_entry("NetScore", &round3(self.net_score))?;
        map.serialize_entry("NetScoreLatency", &round3(self.latency.as_secs_f64()))?;

        for m in &self.metrics {
            map.serialize_entry(m.name.as_str(), &round3(m.score))?;
            map.serialize_entry(&format!("{}Latency", m.name), &round3(m.latency.as_secs_f64()))?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: MetricName, score: f64, latency_ms: u64) -> MetricResult {
        MetricResult {
            name,
            score,
            raw: score,
            latency: Duration::from_millis(latency_ms),
            failure: None,
        }
    }

    #[test]
    fn test_registry_shape() {
        let rating = NetScoreResult {
            repo: RepoSpec::new("owner", "repo").unwrap(),
            net_score: 0.612_34,
            metrics: vec![result(MetricName::RampUp, 0.25, 1500), result(MetricName::License, 1.0, 20)],
            failures: Vec::new(),
            latency: Duration::from_millis(1502),
        };

        let json = serde_json::to_value(&rating).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "NetScore": 0.612,
                "NetScoreLatency": 1.502,
                "RampUp": 0.25,
                "RampUpLatency": 1.5,
                "LicenseScore": 1.0,
                "LicenseScoreLatency": 0.02,
            })
        );
    }

    #[test]
    fn test_metric_lookup() {
        let rating = NetScoreResult {
            repo: RepoSpec::new("owner", "repo").unwrap(),
            net_score: 0.0,
            metrics: vec![result(MetricName::BusFactor, 0.4, 1)],
            failures: Vec::new(),
            latency: Duration::ZERO,
        };

        assert!(rating.metric(MetricName::BusFactor).is_some());
        assert!(rating.metric(MetricName::RampUp).is_none());
        assert!(!rating.is_degraded());
    }
}
