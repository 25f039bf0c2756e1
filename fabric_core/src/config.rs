use log::LevelFilter;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Tuning for the event multiplexer (simple key=value format).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxConfig {
    /// Slots added each time the table is full.
    pub grow_step: usize,
    /// Slots allocated at creation.
    pub initial_capacity: usize,
    pub log_level: LevelFilter,
}

impl Default for MuxConfig {
    fn default() -> Self {
        MuxConfig {
            grow_step: 64,
            initial_capacity: 0,
            log_level: LevelFilter::Warn,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    InvalidFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config i/o error: {}", e),
            ConfigError::InvalidFormat(line) => write!(f, "invalid config line: {}", line),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl MuxConfig {
    /// Load configuration from a key=value file.
    /// Example:
    /// grow_step=64
    /// initial_capacity=256
    /// log_level=debug
    ///
    /// Keys that are absent keep their default value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut cfg = MuxConfig::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                return Err(ConfigError::InvalidFormat(line.to_string()));
            };
            let (key, val) = (key.trim(), val.trim());
            let invalid = || ConfigError::InvalidFormat(line.to_string());

            match key {
                "grow_step" => {
                    cfg.grow_step = val.parse::<usize>().map_err(|_| invalid())?;
                    // growth has to make progress
                    if cfg.grow_step == 0 {
                        return Err(invalid());
                    }
                }
                "initial_capacity" => cfg.initial_capacity = val.parse::<usize>().map_err(|_| invalid())?,
                "log_level" => cfg.log_level = val.parse::<LevelFilter>().map_err(|_| invalid())?,
                _ => return Err(invalid()),
            }
        }

        Ok(cfg)
    }
}
