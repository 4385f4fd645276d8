use super::ConfigurationError;
use crate::metrics::MetricName;
use core::str::FromStr;

/// Allowed deviation of the weight sum from 1.
const SUM_TOLERANCE: f64 = 1e-6;

/// Validated per-metric weights for the net score.
///
/// Weights are non-negative, name known metrics, and sum to 1. Metrics without
/// an entry carry no weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    entries: Vec<(MetricName, f64)>,
}

impl WeightTable {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> Result<Self, ConfigurationError> {
        let mut parsed = Vec::new();
        for (name, weight) in entries {
            let Ok(metric) = MetricName::from_str(name) else {
                return Err(ConfigurationError::UnknownMetric(name.to_string()));
            };

            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidWeight { metric, weight });
            }

            if parsed.iter().any(|(m, _)| *m == metric) {
                return Err(ConfigurationError::DuplicateMetric(metric));
            }

            parsed.push((metric, weight));
        }

        let sum: f64 = parsed.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigurationError::WeightSum(sum));
        }

        parsed.sort_by_key(|(m, _)| *m);
        Ok(Self { entries: parsed })
    }

    #[must_use]
    pub fn weight(&self, metric: MetricName) -> f64 {
        self.entries.iter().find(|(m, _)| *m == metric).map_or(0.0, |(_, w)| *w)
    }

    /// Entries in metric order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, f64)> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (MetricName::RampUp, 0.15),
                (MetricName::Correctness, 0.15),
                (MetricName::BusFactor, 0.2),
                (MetricName::ResponsiveMaintainer, 0.3),
                (MetricName::License, 0.2),
            ],
        }
    }
}
