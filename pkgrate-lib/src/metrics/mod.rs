//! Scoring units, one per quality dimension of a package
//!
//! Each metric owns the evidence it needs and turns it into a score in [0, 1].
//!
//! # Implementation Model
//!
//! The core abstraction is the [`Metric`] trait, split into two halves:
//! - **`fetch_data`**: all network I/O, run at most once per instance. Results
//!   land in private accumulators, which stay unset when the upstream has no
//!   matching record.
//! - **`calculate_metric`**: pure and total over whatever accumulators are set,
//!   returning 0 when none are.
//!
//! Common identity (name, category, owner tag, repository) lives in a composed
//! [`MetricInfo`]. Metrics read through an injected
//! [`MetricSource`](crate::source::MetricSource) and tuning from
//! [`MetricSettings`], so they can be exercised without a network.
//!
//! Built-in metrics are statically registered in `metric_def.rs`;
//! [`create_metrics`] builds a fresh set for one rating request.

mod bus_factor;
mod correctness;
mod license;
mod metric;
mod metric_category;
mod metric_def;
mod metric_name;
mod ramp_up;
mod responsiveness;

pub use bus_factor::BusFactor;
pub use correctness::{Correctness, IssueCounts};
pub use license::License;
pub use metric::{Metric, MetricInfo, MetricSettings, clamp_score};
pub use metric_category::MetricCategory;
pub use metric_def::{METRIC_DEFINITIONS, MetricDef, create_metrics};
pub use metric_name::MetricName;
pub use ramp_up::RampUp;
pub use responsiveness::Responsiveness;
