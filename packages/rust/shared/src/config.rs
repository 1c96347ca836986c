//! Application configuration for blockport.
//!
//! User config lives at `~/.blockport/blockport.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BlockportError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "blockport.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".blockport";

// ---------------------------------------------------------------------------
// Config structs (matching blockport.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Import (fetch) policies.
    #[serde(default)]
    pub import: ImportPoliciesConfig,

    /// Navigation decorator settings.
    #[serde(default)]
    pub nav: NavConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default import output directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Default site profile name.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Default concurrent page fetches.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            profile: default_profile(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_output_dir() -> String {
    "var/import".into()
}
fn default_profile() -> String {
    "corporate".into()
}
fn default_concurrency() -> u32 {
    4
}

/// `[import]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPoliciesConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum ms between requests to the legacy host.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_ms: u64,
}

impl Default for ImportPoliciesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            rate_limit_ms: default_rate_limit(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_rate_limit() -> u64 {
    200
}

/// `[nav]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Origin the navigation fragment is fetched from.
    #[serde(default = "default_nav_origin")]
    pub origin: String,

    /// Fragment path; `.plain.html` is appended at fetch time.
    #[serde(default = "default_nav_path")]
    pub nav_path: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            origin: default_nav_origin(),
            nav_path: default_nav_path(),
        }
    }
}

fn default_nav_origin() -> String {
    "https://www.example.com".into()
}
fn default_nav_path() -> String {
    "/nav".into()
}

// ---------------------------------------------------------------------------
// Import options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime import options — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Site profile name (or a path to a profile TOML file).
    pub profile: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Rate limit in ms between requests to the legacy host.
    pub rate_limit_ms: u64,
    /// Maximum concurrent page fetches.
    pub concurrency: u32,
}

impl From<&AppConfig> for ImportOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            profile: config.defaults.profile.clone(),
            timeout_secs: config.import.timeout_secs,
            rate_limit_ms: config.import.rate_limit_ms,
            concurrency: config.defaults.concurrency,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.blockport/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| BlockportError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.blockport/blockport.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| BlockportError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| BlockportError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| BlockportError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| BlockportError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| BlockportError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
