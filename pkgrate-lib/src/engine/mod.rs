//! Metric aggregation engine
//!
//! Turns a package identifier into a rating by running a fresh set of metrics
//! against the hosting service and combining their scores.
//!
//! # Implementation Model
//!
//! Data flows one way:
//!
//! 1. [`Evaluator`] resolves a [`PackageRatingRequest`] and builds one metric
//!    per enabled definition
//! 2. [`Runner`] fetches all metrics concurrently, each under its own timeout,
//!    and scores every metric whether its fetch succeeded or not
//! 3. [`Aggregator`] folds the [`MetricResult`]s into a [`NetScoreResult`]
//!    using a validated [`WeightTable`]
//!
//! Individual metric failures are data, not errors: they show up as
//! [`MetricFailure`]s inside the rating and the metric contributes its neutral
//! score of 0. [`EvaluateError`] is reserved for requests that cannot be rated
//! at all.

mod aggregator;
mod error;
mod evaluator;
mod metric_result;
mod net_score;
mod rating_request;
mod runner;
mod weight_table;

pub use aggregator::Aggregator;
pub use error::{ConfigurationError, EvaluateError};
pub use evaluator::{Evaluator, EvaluatorOptions};
pub use metric_result::{FailureKind, MetricFailure, MetricResult};
pub use net_score::NetScoreResult;
pub use rating_request::PackageRatingRequest;
pub use runner::Runner;
pub use weight_table::WeightTable;
