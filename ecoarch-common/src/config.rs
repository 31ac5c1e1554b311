//! Configuration loading and data folder resolution

use crate::Result;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data folder location
pub const DATA_FOLDER_ENV: &str = "ECOARCH_DATA_FOLDER";

/// Environment variable holding the scoring service credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Data folder resolution priority order:
/// 1. Environment variable (highest priority)
/// 2. `data_folder` key in the TOML config file
/// 3. OS-dependent default (fallback)
pub fn resolve_data_folder() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = load_config_value("data_folder") {
        return PathBuf::from(path);
    }

    default_data_folder()
}

/// Resolve the scoring service API key: environment variable first, then
/// the `gemini_api_key` config file key. `None` disables the scoring
/// client; every analysis then degrades to its fallback result.
pub fn resolve_api_key() -> Option<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            return Some(key);
        }
    }

    load_config_value("gemini_api_key")
}

/// Create the data folder if it does not exist yet
pub fn ensure_data_folder(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Read one string value from the platform config file, tolerating an
/// absent or malformed file
fn load_config_value(key: &str) -> Option<String> {
    let path = config_file_path()?;
    let raw = std::fs::read_to_string(path).ok()?;
    let config = toml::from_str::<toml::Value>(&raw).ok()?;
    config.get(key)?.as_str().map(str::to_string)
}

/// Platform config file path (e.g. `~/.config/ecoarch/config.toml` on Linux)
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ecoarch").join("config.toml"))
}

/// OS-dependent default data folder (e.g. `~/.local/share/ecoarch`)
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("ecoarch"))
        .unwrap_or_else(|| PathBuf::from("./ecoarch_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_folder_is_absolute_or_local() {
        let folder = default_data_folder();
        assert!(folder.to_string_lossy().contains("ecoarch"));
    }

    #[test]
    fn ensure_data_folder_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_data_folder(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
