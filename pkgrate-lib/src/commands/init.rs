use super::Host;
use super::config::{Config, DEFAULT_CONFIG_FILE};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `pkgrate.toml` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE));

    if output.exists() && !args.force {
        bail!("configuration file '{output}' already exists, use --force to overwrite it");
    }

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    fn test_init_writes_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("pkgrate.toml")).unwrap();

        let mut host = TestHost::new();
        init_config(
            &mut host,
            &InitArgs {
                output: Some(path.clone()),
                force: false,
            },
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), super::super::config::DEFAULT_CONFIG_TOML);
        assert!(host.output_text().contains("Generated default configuration file"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("pkgrate.toml")).unwrap();
        std::fs::write(&path, "# mine\n").unwrap();

        let mut host = TestHost::new();
        let args = InitArgs {
            output: Some(path.clone()),
            force: false,
        };
        let _ = init_config(&mut host, &args).unwrap_err();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        let args = InitArgs {
            output: Some(path.clone()),
            force: true,
        };
        init_config(&mut host, &args).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
    }
}
