//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generator::{CharClasses, DEFAULT_LENGTH};
use crate::record::DEFAULT_ACCOUNT;
use crate::statistics::DEFAULT_RECENT_LIMIT;

/// Environment variable overriding `generator.length`.
pub const LENGTH_ENV_VAR: &str = "PWMETER_DEFAULT_LENGTH";

/// Top-level pwmeter configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PwmeterConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Defaults for password generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Default password length.
    #[serde(default = "default_length")]
    pub length: usize,
    /// Character classes enabled by default.
    #[serde(default)]
    pub classes: CharClasses,
}

/// History and statistics settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of entries shown as "recent".
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Account label used when none is given.
    #[serde(default = "default_account")]
    pub default_account: String,
}

fn default_length() -> usize {
    DEFAULT_LENGTH
}
fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}
fn default_account() -> String {
    DEFAULT_ACCOUNT.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: default_length(),
            classes: CharClasses::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            default_account: default_account(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `pwmeter.toml` in the current directory
/// 2. `~/.config/pwmeter/config.toml`
///
/// `PWMETER_DEFAULT_LENGTH` overrides the generator length.
pub fn load_config() -> Result<PwmeterConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PwmeterConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pwmeter.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PwmeterConfig::default(),
    };

    if let Ok(value) = std::env::var(LENGTH_ENV_VAR) {
        config.generator.length = value
            .trim()
            .parse()
            .with_context(|| format!("{LENGTH_ENV_VAR} must be a non-negative integer"))?;
    }

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<PwmeterConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pwmeter"))
}

/// Sample configuration written by `pwmeter init`.
pub const SAMPLE_CONFIG: &str = r#"# pwmeter configuration

[generator]
length = 12

[generator.classes]
uppercase = true
lowercase = true
digits = true
special = true

[history]
recent_limit = 5
default_account = "Unnamed Account"
"#;
