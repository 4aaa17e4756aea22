use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` directive for the binary.
    pub log_filter: String,
    pub limits: EngineLimits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLimits {
    /// Largest batch accepted at the validation boundary.
    pub max_batch_observations: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_batch_observations: 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            limits: EngineLimits::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Loads a TOML file; environment variables still take precedence.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Config =
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(filter) = var("REACHABILITY_LOG") {
            self.log_filter = filter;
        }

        if let Some(max) = var("REACHABILITY_MAX_BATCH") {
            self.limits.max_batch_observations = max
                .trim()
                .parse()
                .with_context(|| format!("invalid REACHABILITY_MAX_BATCH={:?}", max))?;
        }

        Ok(())
    }
}
