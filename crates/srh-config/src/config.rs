//! Configuration types and loading.
//!
//! The main entry point is [`SrhConfig`], which represents the contents of
//! `.srh/config.yaml`. Values are layered: built-in defaults, then the YAML
//! file, then `SRH_*` environment variables (`SRH_PAGE_SIZE=50` sets
//! `page-size`). Configuration is loaded with [`load_config`] and saved with
//! [`save_config`].

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Deserializer, Serialize};
use srh_core::enums::Theme;
use thiserror::Error;
use tracing::debug;

/// File name of the configuration file inside `.srh/`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "SRH_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// A layer contained invalid values.
    #[error("failed to load config: {0}")]
    Load(#[from] figment::Error),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The contents of `.srh/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SrhConfig {
    /// Board theme; `dark` and `black` select the dark palette.
    #[serde(default)]
    pub theme: Theme,

    /// Default board data file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<PathBuf>,

    /// Default board id, naming the stored rule file.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub board_id: Option<String>,

    /// Directory of stored rule files, relative to `.srh/` unless absolute.
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,

    /// Rows per page in `highlight` output.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Board columns shown in `highlight` output.
    #[serde(default = "default_preview_columns")]
    pub preview_columns: usize,

    /// Emit JSON by default.
    #[serde(default)]
    pub json: bool,
}

impl Default for SrhConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            board: None,
            board_id: None,
            rules_dir: default_rules_dir(),
            page_size: default_page_size(),
            preview_columns: default_preview_columns(),
            json: false,
        }
    }
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("rules")
}

fn default_page_size() -> usize {
    20
}

fn default_preview_columns() -> usize {
    5
}

/// Board ids are numeric in the board API; accept them unquoted.
fn string_or_number<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Uint(u64),
    }
    Ok(Option::<Raw>::deserialize(d)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Uint(n) => n.to_string(),
    }))
}

impl SrhConfig {
    /// Path of the stored rule file for `board_id`.
    pub fn rules_path(&self, srh_dir: &Path, board_id: &str) -> PathBuf {
        let dir = if self.rules_dir.is_absolute() {
            self.rules_dir.clone()
        } else {
            srh_dir.join(&self.rules_dir)
        };
        dir.join(format!("{board_id}.json"))
    }

    fn validate(self) -> Result<Self> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page-size".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Layers defaults, the file at `config_path` (if present), and `SRH_*`
/// environment variables.
pub fn figment(config_path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SrhConfig::default()))
        .merge(Yaml::file(config_path))
        .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replace('_', "-").into()))
}

/// Load configuration from `.srh/config.yaml` inside the given `.srh/`
/// directory.
///
/// A missing file yields the defaults, still overridden by the environment.
pub fn load_config(srh_dir: &Path) -> Result<SrhConfig> {
    load_config_file(&srh_dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from an explicit file path.
pub fn load_config_file(config_path: &Path) -> Result<SrhConfig> {
    debug!(path = %config_path.display(), exists = config_path.exists(), "loading config");
    let config: SrhConfig = figment(config_path).extract()?;
    config.validate()
}

/// Save configuration to `.srh/config.yaml` inside the given `.srh/` directory.
///
/// The directory is created if it does not exist.
pub fn save_config(srh_dir: &Path, config: &SrhConfig) -> Result<()> {
    std::fs::create_dir_all(srh_dir)?;

    let config_path = srh_dir.join(CONFIG_FILE_NAME);
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&config_path, yaml)?;
    debug!(path = %config_path.display(), "saved config");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
