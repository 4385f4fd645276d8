//! Command dispatch logic for pkgrate

use super::{InitArgs, RateArgs, ValidateArgs, init_config, rate_packages, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "pkgrate", version, author, long_about = None)]
#[command(about = "Rate the trustworthiness of open-source packages")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: PkgrateSubcommand,
}

#[derive(Subcommand, Debug)]
enum PkgrateSubcommand {
    /// Rate packages and print their scores
    Rate(Box<RateArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        PkgrateSubcommand::Rate(rate_args) => rate_packages(host, rate_args).await,
        PkgrateSubcommand::Init(init_args) => init_config(host, init_args),
        PkgrateSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
