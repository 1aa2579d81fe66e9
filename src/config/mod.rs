use serde::Deserialize;
use std::time::Duration;
use std::{env, fs, path::Path};

use crate::error::ConfigError;

/// Capacity applied to a freshly constructed queue.
pub const DEFAULT_MAX_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub max_len: usize,
    pub enforce_max_len: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            enforce_max_len: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressConfig {
    pub producers: usize,
    pub consumers: usize,
    pub duration: Duration,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            producers: 4,
            consumers: 4,
            duration: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub queue: QueueConfig,
    pub stress: StressConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct FileQueueConfig {
    max_len: Option<usize>,
    enforce_max_len: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct FileStressConfig {
    producers: Option<usize>,
    consumers: Option<usize>,
    duration_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct FileConfig {
    #[serde(default)]
    queue: FileQueueConfig,
    #[serde(default)]
    stress: FileStressConfig,
}

impl Config {
    /// Load configuration from an optional file path and environment variables.
    ///
    /// Precedence: built-in defaults, then the file (`path`, or `BLIPQ_CONFIG`
    /// when `path` is `None`), then `BLIPQ_*` environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let env_path = env::var("BLIPQ_CONFIG").ok();
        let effective_path = path.map(|s| s.to_string()).or(env_path);

        let file_cfg = match effective_path {
            Some(p) => Self::load_file(p)?,
            None => FileConfig::default(),
        };

        let mut cfg = Self::from_file(file_cfg);
        cfg.apply_env_overrides(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    fn load_file<P: AsRef<Path>>(path: P) -> Result<FileConfig, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let cfg: FileConfig = toml::from_str(&raw)?;
        Ok(cfg)
    }

    fn from_file(file: FileConfig) -> Self {
        let defaults = Config::default();
        Self {
            queue: QueueConfig {
                max_len: file.queue.max_len.unwrap_or(defaults.queue.max_len),
                enforce_max_len: file
                    .queue
                    .enforce_max_len
                    .unwrap_or(defaults.queue.enforce_max_len),
            },
            stress: StressConfig {
                producers: file.stress.producers.unwrap_or(defaults.stress.producers),
                consumers: file.stress.consumers.unwrap_or(defaults.stress.consumers),
                duration: file
                    .stress
                    .duration_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.stress.duration),
            },
        }
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BLIPQ_MAX_LEN") {
            self.queue.max_len = parse_var("BLIPQ_MAX_LEN", &v)?;
        }
        if let Some(v) = lookup("BLIPQ_ENFORCE_MAX_LEN") {
            self.queue.enforce_max_len = parse_var("BLIPQ_ENFORCE_MAX_LEN", &v)?;
        }
        if let Some(v) = lookup("BLIPQ_PRODUCERS") {
            self.stress.producers = parse_var("BLIPQ_PRODUCERS", &v)?;
        }
        if let Some(v) = lookup("BLIPQ_CONSUMERS") {
            self.stress.consumers = parse_var("BLIPQ_CONSUMERS", &v)?;
        }
        if let Some(v) = lookup("BLIPQ_DURATION_MS") {
            self.stress.duration = Duration::from_millis(parse_var("BLIPQ_DURATION_MS", &v)?);
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::Parse(format!("{key}: {e}")))
}

/// Load a config file without consulting the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    Ok(Config::from_file(Config::load_file(path)?))
}
