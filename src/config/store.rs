//! Loading, saving, and mutating the JSON config file.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::config::Config;
use crate::error::ConfigError;

/// Environment variable supplying/overriding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the config directory (mainly for tests).
pub const CONFIG_DIR_ENV: &str = "ANGELIA_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.json";

/// Resolve the path of the config file.
///
/// `ANGELIA_CONFIG_DIR` takes precedence; otherwise the platform config
/// directory (e.g. `~/.config/angelia` on Linux) is used.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir).join(CONFIG_FILE_NAME));
    }

    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("angelia").join(CONFIG_FILE_NAME))
}

/// Load the configuration, creating and persisting defaults on first run.
///
/// Returns the stored config verbatim. Callers that resolve effective
/// settings run [`apply_env_override`] as an explicit follow-up step;
/// keeping the override out of the loader means `config set` can never
/// accidentally persist an environment-sourced key.
pub fn load() -> Result<Config, ConfigError> {
    let path = config_path()?;

    let config = if path.exists() {
        let data = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source,
        })?
    } else {
        debug!("No config file at {}, creating defaults", path.display());
        let config = Config::default();
        save(&config)?;
        config
    };

    Ok(config)
}

/// Replace the stored API key with `GEMINI_API_KEY` when set and non-empty.
///
/// Run-only override: the result is never persisted back to disk.
pub fn apply_env_override(config: &mut Config) {
    if let Ok(key) = env::var(API_KEY_ENV)
        && !key.is_empty()
    {
        config.api_key = Some(key);
    }
}

/// Persist the configuration, creating parent directories as needed.
///
/// Writes to a temp file in the target directory first and renames it
/// into place, so a crash mid-write never leaves a truncated config.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path()?;
    let parent = path.parent().ok_or(ConfigError::NoConfigDir)?;

    std::fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFailed {
        path: path.display().to_string(),
        source,
    })?;

    let data = serde_json::to_string_pretty(config).map_err(ConfigError::SerializeFailed)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|source| {
        ConfigError::WriteFailed {
            path: path.display().to_string(),
            source,
        }
    })?;
    tmp.write_all(data.as_bytes())
        .and_then(|()| tmp.write_all(b"\n"))
        .map_err(|source| ConfigError::WriteFailed {
            path: path.display().to_string(),
            source,
        })?;
    tmp.persist(&path).map_err(|e| ConfigError::WriteFailed {
        path: path.display().to_string(),
        source: e.error,
    })?;

    Ok(())
}

/// Set one config value and persist the result.
///
/// Only `author`, `default_type`, and `api_key` are settable;
/// `default_type` must name an existing template. Validation happens
/// before any mutation, so a failed set never writes.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "author" => config.author = value.to_string(),
        "default_type" => {
            if !config.templates.contains_key(value) {
                return Err(ConfigError::UnknownTemplate(value.to_string()));
            }
            config.default_type = value.to_string();
        }
        "api_key" => config.api_key = Some(value.to_string()),
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }

    save(config)
}
