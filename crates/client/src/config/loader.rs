//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes a few standard paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `WHISE_USERNAME`: Marketplace account username (required)
//! - `WHISE_PASSWORD`: Marketplace account password (required)
//! - `WHISE_BASE_URL`: API base URL (defaults to the production API)
//! - `WHISE_TIMEOUT_SECS`: Per-request timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./whise.toml` or `./whise.json` (current working directory)
//! 2. `../whise.toml` or `../whise.json` (parent directory)
//! 3. Next to the executable
//!
//! Every loaded configuration is validated before it is returned.

use std::path::{Path, PathBuf};

use whise_domain::{ClientConfig, Result, WhiseError};

pub const USERNAME_VAR: &str = "WHISE_USERNAME";
pub const PASSWORD_VAR: &str = "WHISE_PASSWORD";
pub const BASE_URL_VAR: &str = "WHISE_BASE_URL";
pub const TIMEOUT_VAR: &str = "WHISE_TIMEOUT_SECS";

const FILE_NAMES: [&str; 2] = ["whise.toml", "whise.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `WhiseError::Configuration` if neither source yields a valid
/// configuration.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `WhiseError::Configuration` if a required variable is missing or
/// a value is invalid.
pub fn load_from_env() -> Result<ClientConfig> {
    let username = env_var(USERNAME_VAR)?;
    let password = env_var(PASSWORD_VAR)?;

    let mut config = ClientConfig::new(username, password);

    if let Some(base_url) = optional_env_var(BASE_URL_VAR) {
        config = config.with_base_url(base_url);
    }

    if let Some(timeout) = optional_env_var(TIMEOUT_VAR) {
        let secs = timeout.parse::<u64>().map_err(|e| {
            WhiseError::Configuration(format!("Invalid {TIMEOUT_VAR} '{timeout}': {e}"))
        })?;
        config = config.with_timeout_secs(secs);
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations (see
/// [`probe_config_paths`]). Format is chosen by file extension.
///
/// # Errors
/// Returns `WhiseError::Configuration` if the file is missing, unreadable,
/// malformed or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WhiseError::Configuration(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WhiseError::Configuration(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WhiseError::Configuration(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WhiseError::Configuration(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WhiseError::Configuration(format!("Invalid JSON format: {e}"))),
        _ => Err(WhiseError::Configuration(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing `whise.toml`/`whise.json` in the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join(".."));
        dirs.insert(0, cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    optional_env_var(key).ok_or_else(|| {
        WhiseError::Configuration(format!("Missing required environment variable: {key}"))
    })
}

/// Value of `key`, treating an empty or whitespace-only value as unset.
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
