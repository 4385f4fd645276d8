use super::MetricFailure;
use crate::metrics::MetricName;
use crate::source::RepoSpec;
use core::fmt::{Display, Formatter};

/// Why a rating request produced no score at all.
///
/// Degradation of individual metrics is never an error; it is reported inside
/// the rating.
#[derive(Debug)]
pub enum EvaluateError {
    /// The package coordinates could not be resolved to a repository.
    InvalidRequest(ohno::AppError),

    /// Every metric failed because the hosting service could not be used.
    AllSourcesUnavailable { repo: RepoSpec, failures: Vec<MetricFailure> },
}

impl Display for EvaluateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidRequest(e) => write!(f, "invalid package request: {e:#}"),
            Self::AllSourcesUnavailable { repo, failures } => {
                write!(f, "could not rate '{repo}': every metric failed")?;
                if let Some(first) = failures.first() {
                    write!(f, " (first: {first})")?;
                }
                Ok(())
            }
        }
    }
}

impl core::error::Error for EvaluateError {}

/// A rejected engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    UnknownMetric(String),
    DuplicateMetric(MetricName),
    InvalidWeight { metric: MetricName, weight: f64 },
    WeightSum(f64),
    InvalidSetting { setting: &'static str, reason: String },
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownMetric(name) => write!(f, "unknown metric '{name}'"),
            Self::DuplicateMetric(name) => write!(f, "metric '{name}' is weighted more than once"),
            Self::InvalidWeight { metric, weight } => {
                write!(f, "weight {weight} for metric '{metric}' must be a non-negative number")
            }
            Self::WeightSum(sum) => write!(f, "metric weights must sum to 1, but they sum to {sum}"),
            Self::InvalidSetting { setting, reason } => write!(f, "invalid value for '{setting}': {reason}"),
        }
    }
}

impl core::error::Error for ConfigurationError {}
