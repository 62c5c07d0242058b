//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(data_folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(data_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_data_folder())
}

/// Get configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let candidate = dirs::config_dir()
        .map(|d| d.join("productlobby").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if candidate.exists() {
        return Ok(candidate);
    }

    // System-wide fallback on Linux
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/productlobby/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config(format!(
        "Config file not found: {}",
        candidate.display()
    )))
}

/// Get OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("productlobby"))
        .unwrap_or_else(|| PathBuf::from("./productlobby_data"))
}

/// Ensure the data folder exists and return the database path inside it
pub fn ensure_data_folder(data_folder: &PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(data_folder)?;
    Ok(data_folder.join("productlobby.db"))
}

/// Read an integer setting from the settings table, falling back to a default
pub async fn setting_i64(db: &sqlx::SqlitePool, key: &str, default: i64) -> Result<i64> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await?;

    match value {
        Some(v) => v
            .parse::<i64>()
            .map_err(|e| Error::Config(format!("Setting '{}' is not an integer: {}", key, e))),
        None => Ok(default),
    }
}
