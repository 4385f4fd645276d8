use crate::Result;
use crate::engine::{ConfigurationError, EvaluatorOptions, WeightTable};
use crate::metrics::{MetricName, MetricSettings};
use crate::source::SourceSettings;
use camino::{Utf8Path, Utf8PathBuf};
use core::str::FromStr;
use core::time::Duration;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the current directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "pkgrate.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the hosting REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Count bound for comment and merge reads
    #[serde(default = "default_result_count")]
    pub result_count: u8,

    /// Count bound for contributor and issue reads
    #[serde(default = "default_sample_size")]
    pub sample_size: u8,

    /// Time budget for a single metric's data collection
    #[serde(default = "default_metric_timeout", with = "humantime_serde")]
    pub metric_timeout: Duration,

    /// Time budget for a single HTTP request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Maximum number of in-flight requests
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Upper bound on a rate-limit pause
    #[serde(default = "default_max_rate_limit_wait", with = "humantime_serde")]
    pub max_rate_limit_wait: Duration,

    /// Response time that maps to a responsiveness score of 0.5
    #[serde(default = "default_response_half_life_minutes")]
    pub response_half_life_minutes: f64,

    /// Metrics that are never run
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Net score weight per metric
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<String, f64>,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

const fn default_result_count() -> u8 {
    1
}

const fn default_sample_size() -> u8 {
    100
}

const fn default_metric_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(20)
}

const fn default_max_concurrent_requests() -> usize {
    8
}

const fn default_max_rate_limit_wait() -> Duration {
    Duration::from_hours(1)
}

const fn default_response_half_life_minutes() -> f64 {
    1440.0
}

fn default_weights() -> BTreeMap<String, f64> {
    WeightTable::default().iter().map(|(name, weight)| (name.to_string(), weight)).collect()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `pkgrate.toml` in the current directory is
    /// used if it exists.
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading pkgrate configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = Utf8PathBuf::from(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading pkgrate configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        let _ = config
            .evaluator_options()
            .into_app_err_with(|| format!("validating configuration file '{final_path}'"))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate the engine settings and build evaluator options from them.
    pub fn evaluator_options(&self) -> Result<EvaluatorOptions, ConfigurationError> {
        self.validate_settings()?;

        let weights = WeightTable::new(self.weights.iter().map(|(name, weight)| (name.as_str(), *weight)))?;

        let disabled = self
            .disabled
            .iter()
            .map(|name| MetricName::from_str(name).map_err(|_e| ConfigurationError::UnknownMetric(name.clone())))
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(EvaluatorOptions {
            weights,
            metric_settings: MetricSettings {
                result_count: self.result_count,
                sample_size: self.sample_size,
                response_half_life_minutes: self.response_half_life_minutes,
            },
            metric_timeout: self.metric_timeout,
            disabled,
        })
    }

    /// Connection settings for the hosting API.
    #[must_use]
    pub fn source_settings(&self, token: Option<&str>) -> SourceSettings {
        SourceSettings {
            base_url: self.api_base_url.clone(),
            token: token.map(str::to_string),
            request_timeout: self.request_timeout,
            max_concurrent_requests: self.max_concurrent_requests,
            max_rate_limit_wait: self.max_rate_limit_wait,
        }
    }

    fn validate_settings(&self) -> Result<(), ConfigurationError> {
        let invalid = |setting: &'static str, reason: String| Err(ConfigurationError::InvalidSetting { setting, reason });

        match Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => return invalid("api_base_url", format!("unsupported scheme '{}'", url.scheme())),
            Err(e) => return invalid("api_base_url", e.to_string()),
        }

        if !(1..=100).contains(&self.result_count) {
            return invalid("result_count", format!("must be between 1 and 100, got {}", self.result_count));
        }

        if !(1..=100).contains(&self.sample_size) {
            return invalid("sample_size", format!("must be between 1 and 100, got {}", self.sample_size));
        }

        if self.metric_timeout.is_zero() {
            return invalid("metric_timeout", "must be greater than zero".to_string());
        }

        if self.request_timeout.is_zero() {
            return invalid("request_timeout", "must be greater than zero".to_string());
        }

        if self.max_concurrent_requests == 0 {
            return invalid("max_concurrent_requests", "must be at least 1".to_string());
        }

        if !self.response_half_life_minutes.is_finite() || self.response_half_life_minutes <= 0.0 {
            return invalid(
                "response_half_life_minutes",
                format!("must be a positive number, got {}", self.response_half_life_minutes),
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
