//! CLI configuration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `store.data_dir`.
pub const DATA_DIR_ENV: &str = "BREW_DATA_DIR";

/// File names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["brew.toml", ".brew.toml", "brew.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart, orders and session are kept.
    #[serde(default)]
    pub store: StoreConfig,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per key under `data_dir`.
    #[default]
    File,
    /// Nothing survives the process.
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::File => "file",
            BackendKind::Memory => "memory",
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend (default: file).
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory for the file backend (default: .brewaura).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".brewaura")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl StoreConfig {
    /// Data directory after applying the environment override, resolved
    /// against `cwd` when relative.
    pub fn resolve_data_dir(&self, cwd: &Path, env_override: Option<OsString>) -> PathBuf {
        let dir = env_override
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir.clone());

        if dir.is_absolute() {
            dir
        } else {
            cwd.join(dir)
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format of log lines on stderr (default: text).
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Pick the config: an explicit path must load, otherwise the nearest
/// config file up the directory tree, otherwise defaults.
pub fn resolve(explicit: Option<&str>, cwd: &Path) -> Result<(CliConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let path = PathBuf::from(path);
        return Ok((CliConfig::load(&path)?, Some(path)));
    }
    Ok(find_config(cwd)
        .map(|(config, path)| (config, Some(path)))
        .unwrap_or_default())
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CliConfig::load(&config_path) {
                    Ok(config) => return Some((config, config_path)),
                    Err(e) => tracing::warn!(path = %config_path.display(), "ignoring config: {e:#}"),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Generate a default brew.toml config file.
pub fn generate_default_config() -> String {
    r#"# BrewAura CLI configuration

[store]
# "file" keeps the cart, orders and session between runs; "memory" does not.
backend = "file"
data_dir = ".brewaura"

[output]
# "text" or "json"
log_format = "text"
"#
    .to_string()
}
