use dupescan::cli::{Cli, OutputFormat};
use dupescan::config::{Config, ConfigError};
use figment::Jail;
use std::path::Path;

fn cli(args: &[&str]) -> Cli {
    use clap::Parser;
    Cli::try_parse_from(std::iter::once("dupescan").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_config_load_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dupescan.toml",
            r#"
recursive = true
output = "json"
"#,
        )?;

        let config: Config = Config::figment(Some(Path::new("dupescan.toml"))).extract()?;

        assert!(config.recursive);
        assert!(!config.skip_symlinks);
        assert_eq!(config.output, OutputFormat::Json);
        Ok(())
    });
}

#[test]
fn test_config_load_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("DUPESCAN_SKIP_SYMLINKS", "true");
        jail.set_env("DUPESCAN_OUTPUT", "json");

        let config: Config = Config::figment(None).extract()?;

        assert!(config.skip_symlinks);
        assert!(!config.recursive);
        assert_eq!(config.output, OutputFormat::Json);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("dupescan.toml", "output = \"json\"")?;
        jail.set_env("DUPESCAN_OUTPUT", "text");

        let config: Config = Config::figment(Some(Path::new("dupescan.toml"))).extract()?;

        assert_eq!(config.output, OutputFormat::Text);
        Ok(())
    });
}

#[test]
fn test_cli_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("dupescan.toml", "output = \"json\"")?;

        let config = Config::load(&cli(&["-c", "dupescan.toml", "-R", "-o", "text", "/p"]))
            .map_err(|e| e.to_string())?;

        assert!(config.recursive);
        assert_eq!(config.output, OutputFormat::Text);
        Ok(())
    });
}

#[test]
fn test_explicit_malformed_file_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("dupescan.toml", "recursive = \"sometimes\"")?;

        let result = Config::load(&cli(&["-c", "dupescan.toml", "/p"]));

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        Ok(())
    });
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let result = Config::load(&cli(&["-c", "absent.toml", "/p"]));

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
        Ok(())
    });
}
