//! Command-line interface and orchestration for pkgrate
//!
//! This module implements the CLI commands and wires the hosting source, the
//! aggregation engine, and the report generators together.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **rate**: Rate one or more packages concurrently and print their scores
//!   as a console summary or as registry rating JSON
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax, engine settings, and weights
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. Rating follows these steps:
//!
//! 1. Parse arguments, initialize logging, and load configuration
//! 2. Build one shared `HostingSource` and an `Evaluator`
//! 3. Evaluate all packages concurrently
//! 4. Generate the report and signal failure through the `Host` exit code
//!
//! Configuration is a TOML file holding the engine settings and the
//! `[weights]` table; a configuration error is fatal before any request is made.

mod common;
mod config;
mod host;
mod init;
mod rate;
mod run;
mod validate;

pub use common::{ColorMode, LogLevel, OutputFormat};
pub use config::{Config, DEFAULT_CONFIG_TOML};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use rate::{RateArgs, rate_all, rate_packages};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
