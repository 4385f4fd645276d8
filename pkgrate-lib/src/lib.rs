#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for pkgrate
//!
//! This library consolidates all functionality for the pkgrate tool, which rates
//! the trustworthiness of open-source packages from the evidence their source
//! repositories expose.
//!
//! # Module Organization
//!
//! - [`source`]: Evidence collection from the repository hosting API
//! - [`metrics`]: Per-dimension scoring units
//! - [`engine`]: Concurrent metric runs and net score aggregation
//! - [`commands`]: Command-line interface and orchestration
//! - [`reports`]: Console and JSON rendering of ratings

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod engine;
pub mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub mod source;

pub use crate::commands::{Host, run};
