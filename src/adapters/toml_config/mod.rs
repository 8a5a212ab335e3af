// TOML config adapter - Configuration loaded from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::concat_interactor::ProbeSettings;
use crate::domain::model::ChapterTimebase;
use crate::error::{ChapcatError, ChapcatResult};
use crate::utils::logging::LoggingConfig;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "chapcat.toml";

/// ffmpeg settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FfmpegConfig {
    /// Program name or path
    pub binary: PathBuf,
    /// Upper bound on one concatenation
    pub timeout_secs: u64,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
            timeout_secs: 6 * 60 * 60,
        }
    }
}

impl FfmpegConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// ffprobe settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FfprobeConfig {
    /// Program name or path
    pub binary: PathBuf,
    /// Upper bound on one probe
    pub timeout_secs: u64,
}

impl Default for FfprobeConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ffprobe"),
            timeout_secs: 30,
        }
    }
}

impl FfprobeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Probe batching settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Probes in flight; 0 means one per CPU
    pub concurrency: usize,
    pub fail_fast: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            concurrency: 0,
            fail_fast: false,
        }
    }
}

/// Chapter metadata settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChaptersConfig {
    /// Ticks per second in the metadata file
    pub timebase_den: u32,
    /// Extensions picked up when an input is a directory
    pub extensions: Vec<String>,
}

impl Default for ChaptersConfig {
    fn default() -> Self {
        Self {
            timebase_den: 1000,
            extensions: vec!["mp4".to_string()],
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub ffmpeg: FfmpegConfig,
    pub ffprobe: FfprobeConfig,
    pub probe: ProbeConfig,
    pub chapters: ChaptersConfig,
    pub log: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg: FfmpegConfig::default(),
            ffprobe: FfprobeConfig::default(),
            probe: ProbeConfig::default(),
            chapters: ChaptersConfig::default(),
            log: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> ChapcatResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ChapcatError::config(format!("Failed to parse TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> ChapcatResult<()> {
        let tools = [
            ("ffmpeg", &self.ffmpeg.binary, self.ffmpeg.timeout_secs),
            ("ffprobe", &self.ffprobe.binary, self.ffprobe.timeout_secs),
        ];
        for (name, binary, timeout_secs) in tools {
            if timeout_secs == 0 {
                return Err(ChapcatError::config(format!(
                    "{}.timeout_secs must be greater than zero",
                    name
                )));
            }
            if binary.as_os_str().is_empty() {
                return Err(ChapcatError::config(format!("{}.binary is empty", name)));
            }
        }
        self.timebase()?;
        if self.chapters.extensions.is_empty() {
            return Err(ChapcatError::config(
                "chapters.extensions must list at least one extension",
            ));
        }
        Ok(())
    }

    pub fn timebase(&self) -> ChapcatResult<ChapterTimebase> {
        ChapterTimebase::new(1, self.chapters.timebase_den)
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            concurrency: match self.probe.concurrency {
                0 => num_cpus::get(),
                n => n,
            },
            fail_fast: self.probe.fail_fast,
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load the configuration file.
    ///
    /// An explicit path must exist. Without one, `chapcat.toml` in the working
    /// directory is used if present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> ChapcatResult<AppConfig> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(AppConfig::default());
                }
                fallback
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ChapcatError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = AppConfig::from_toml(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize a configuration, e.g. to seed a config file
    pub fn to_toml(config: &AppConfig) -> ChapcatResult<String> {
        toml::to_string_pretty(config)
            .map_err(|e| ChapcatError::config(format!("Failed to serialize config: {}", e)))
    }
}
