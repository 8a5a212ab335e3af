//! Configuration initialization and hierarchy management

use tracing::debug;

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};
use crate::cli::Cli;
use crate::error::ChapcatResult;
use crate::utils::logging::{LogFormat, LogLevel};

/// Build the effective configuration: CLI > Env > File > Defaults.
///
/// Environment variables arrive through clap's `env` fallbacks, so they are
/// already folded into `cli` and lose to explicit flags.
pub fn initialize_configuration(cli: &Cli) -> ChapcatResult<AppConfig> {
    let mut config = TomlConfigAdapter::load(cli.config.as_deref())?;
    apply_cli_overrides(&mut config, cli)?;
    config.validate()?;
    Ok(config)
}

/// Apply CLI (and environment) overrides on top of the file configuration
pub fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> ChapcatResult<()> {
    let mut overrides = 0;

    if let Some(level) = &cli.log_level {
        config.log.level = LogLevel::parse(level)?;
        overrides += 1;
    }
    if let Some(format) = &cli.log_format {
        config.log.format = LogFormat::parse(format)?;
        overrides += 1;
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        config.ffmpeg.binary = ffmpeg.clone();
        overrides += 1;
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.ffprobe.binary = ffprobe.clone();
        overrides += 1;
    }
    if let Some(concurrency) = cli.probe_concurrency {
        config.probe.concurrency = concurrency;
        overrides += 1;
    }

    if overrides > 0 {
        debug!("Applied {} command-line configuration overrides", overrides);
    }
    Ok(())
}
