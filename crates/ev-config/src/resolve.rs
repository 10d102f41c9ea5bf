//! Settings resolution and path discovery.
//!
//! Resolution order: environment variables → XDG config directory → system
//! config directory → built-in defaults.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::settings::Settings;

/// Where a settings file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/envveil/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
const ENV_SETTINGS_PATH: &str = "ENVVEIL_SETTINGS";
const ENV_CONFIG_DIR: &str = "ENVVEIL_CONFIG_DIR";

/// Standard settings file name.
const SETTINGS_FILENAME: &str = "settings.json";

/// Application name for XDG directories.
const APP_NAME: &str = "envveil";

/// Resolved settings file location.
#[derive(Debug, Clone, Default)]
pub struct SettingsPath {
    /// Path to settings.json (or None if not found).
    pub path: Option<PathBuf>,

    /// Source of the settings file (for diagnostics).
    pub source: ConfigSource,
}

/// Resolve the settings file path using the standard resolution order.
///
/// 1. ENVVEIL_SETTINGS environment variable (direct path)
/// 2. ENVVEIL_CONFIG_DIR environment variable + filename
/// 3. XDG config directory (~/.config/envveil/)
/// 4. System config (/etc/envveil/)
/// 5. Built-in defaults (None)
pub fn resolve_settings_path() -> SettingsPath {
    // 1. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_SETTINGS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return SettingsPath {
                path: Some(path),
                source: ConfigSource::Environment,
            };
        }
    }

    // 2. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SETTINGS_FILENAME);
        if path.exists() {
            return SettingsPath {
                path: Some(path),
                source: ConfigSource::Environment,
            };
        }
    }

    // 3. XDG config directory
    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(SETTINGS_FILENAME);
        if path.exists() {
            return SettingsPath {
                path: Some(path),
                source: ConfigSource::XdgConfig,
            };
        }
    }

    // 4. System config
    let system_path = system_config_dir().join(SETTINGS_FILENAME);
    if system_path.exists() {
        return SettingsPath {
            path: Some(system_path),
            source: ConfigSource::SystemConfig,
        };
    }

    // 5. Built-in defaults
    SettingsPath::default()
}

/// Load settings from the resolved location, falling back to defaults.
///
/// A settings file that cannot be read or parsed is reported with a warning
/// and replaced by the defaults: a broken settings file must never leave
/// secrets unprotected.
pub fn load_settings() -> (Settings, ConfigSource) {
    let resolved = resolve_settings_path();
    match resolved.path {
        Some(ref path) => match Settings::load(path) {
            Ok(settings) => (settings, resolved.source),
            Err(err) => {
                warn!(
                    "failed to load settings from {} ({}): {}; using defaults",
                    path.display(),
                    resolved.source,
                    err
                );
                (Settings::default(), ConfigSource::BuiltinDefault)
            }
        },
        None => (Settings::default(), ConfigSource::BuiltinDefault),
    }
}

/// Get the XDG config directory for envveil.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

/// Check if a config directory exists and is readable.
pub fn config_dir_exists(path: &Path) -> bool {
    path.is_dir() && path.read_dir().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(format!("{}", ConfigSource::SystemConfig), "system config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_xdg_config_dir() {
        if let Some(path) = xdg_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_system_config_dir() {
        assert_eq!(system_config_dir(), PathBuf::from("/etc/envveil"));
    }
}
