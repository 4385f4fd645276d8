use super::Host;
use super::common::{ColorMode, LogLevel, OutputFormat, init_logging};
use super::config::Config;
use crate::Result;
use crate::engine::{Evaluator, EvaluatorOptions};
use crate::reports::{RatedPackage, generate_console, generate_json};
use crate::source::{HostingSource, MetricSource};
use camino::Utf8PathBuf;
use clap::Parser;
use futures_util::future::join_all;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use std::sync::Arc;

const LOG_TARGET: &str = "      rate";

#[derive(Parser, Debug)]
pub struct RateArgs {
    /// Packages to rate (format: `owner/name` or a repository URL)
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<String>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to configuration file (default is `pkgrate.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// How to present the ratings
    #[arg(long, value_name = "FORMAT", default_value = "console")]
    pub format: OutputFormat,

    /// Write the ratings to a file instead of the terminal
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Rate every requested package concurrently and report the results.
///
/// Exits with status 1 after reporting if any package could not be rated.
pub async fn rate_packages<H: Host>(host: &mut H, args: &RateArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(args.config.as_deref())?;
    let options = config.evaluator_options().into_app_err("building evaluator options")?;
    let source = HostingSource::new(&config.source_settings(args.github_token.as_deref()))?;

    if args.github_token.is_none() {
        log::warn!(target: LOG_TARGET, "No GitHub token provided, the anonymous API quota is very small");
    }

    let packages = rate_all(Arc::new(source), options, &args.packages).await;
    let failed = packages.iter().filter(|p| p.outcome.is_err()).count();

    let mut report = String::new();
    match args.format {
        OutputFormat::Console => {
            let use_colors = args.output.is_none() && args.color.use_colors();
            generate_console(&packages, use_colors, &mut report)?;
        }
        OutputFormat::Json => {
            generate_json(&packages, &mut report)?;
            for package in &packages {
                if let Err(e) = &package.outcome {
                    let _ = writeln!(host.error(), "Could not rate '{}': {e}", package.identifier);
                }
            }
        }
    }

    if let Some(path) = &args.output {
        fs::write(path, &report).into_app_err_with(|| format!("writing ratings to '{path}'"))?;
    } else {
        let _ = write!(host.output(), "{report}");
    }

    if failed > 0 {
        log::error!(target: LOG_TARGET, "{failed} of {} package(s) could not be rated", packages.len());
        host.exit(1);
    }

    Ok(())
}

/// Rate packages concurrently over one shared source, keeping the input order.
pub async fn rate_all(source: Arc<dyn MetricSource>, options: EvaluatorOptions, packages: &[String]) -> Vec<RatedPackage> {
    let evaluator = Evaluator::new(source, options);

    join_all(packages.iter().map(|identifier| {
        let evaluator = &evaluator;
        async move { RatedPackage::new(identifier.clone(), evaluator.evaluate_package(identifier).await) }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EvaluateError;
    use crate::source::fake_source::{FakeSource, http_500};
    use crate::source::ReadmeRecord;

    #[tokio::test]
    async fn test_rate_all_keeps_order_and_isolates_bad_requests() {
        let source = FakeSource {
            readme: Ok(Some(ReadmeRecord { size: 4096 })),
            ..FakeSource::default()
        };
        let packages = vec![
            "owner/first".to_string(),
            "not a package".to_string(),
            "https://github.com/owner/second".to_string(),
        ];

        let rated = rate_all(Arc::new(source), EvaluatorOptions::default(), &packages).await;

        assert_eq!(rated.len(), 3);
        assert_eq!(rated[0].identifier, "owner/first");
        assert_eq!(rated[0].rating().unwrap().repo.to_string(), "owner/first");
        assert!(matches!(rated[1].outcome, Err(EvaluateError::InvalidRequest(_))));
        assert_eq!(rated[2].rating().unwrap().repo.to_string(), "owner/second");
    }

    #[tokio::test]
    async fn test_rate_all_reports_outage() {
        let source = FakeSource {
            issue_comments: Err(http_500()),
            pull_request_comments: Err(http_500()),
            latest_merged_pull: Err(http_500()),
            license: Err(http_500()),
            contributors: Err(http_500()),
            issues: Err(http_500()),
            readme: Err(http_500()),
            ..FakeSource::default()
        };

        let rated = rate_all(Arc::new(source), EvaluatorOptions::default(), &["owner/repo".to_string()]).await;

        assert!(matches!(rated[0].outcome, Err(EvaluateError::AllSourcesUnavailable { .. })));
    }
}
