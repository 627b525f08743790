//! # App Configuration
//!
//! TOML-based configuration with environment overrides.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Load Order                             │
//! │                                                                         │
//! │  1. Built-in defaults          (always present)                         │
//! │  2. Config file (config.toml)  (overrides defaults)                     │
//! │  3. Environment variables      (overrides file)                         │
//! │                                                                         │
//! │  Default location:                                                      │
//! │  • Linux:   ~/.config/bodega/config.toml                                │
//! │  • macOS:   ~/Library/Application Support/com.bodega.inventory/         │
//! │  • Windows: %APPDATA%\bodega\inventory\config\                          │
//! │                                                                         │
//! │  Environment variables:                                                 │
//! │  • BODEGA_DB_PATH             database file location                    │
//! │  • BODEGA_MAX_CONNECTIONS     pool size                                 │
//! │  • BODEGA_SUCCESS_DISPLAY_MS  success banner duration                   │
//! │  • BODEGA_SCANNER_FORMATS     comma-separated format list               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example config.toml
//! ```toml
//! [store]
//! database_path = "/var/lib/bodega/bodega.db"
//! max_connections = 5
//!
//! [registration]
//! success_display_ms = 1500
//!
//! [scanner]
//! formats = ["qr", "ean13", "code128"]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bodega_store::StoreConfig;

use crate::error::ConfigError;
use crate::scanner::{BarcodeFormat, ScanSession};

// =============================================================================
// Store Settings
// =============================================================================

/// Where and how the document store runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Database file location.
    /// When unset, a platform data directory is used.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Connection pool size.
    /// Default: 5
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            database_path: None,
            max_connections: default_max_connections(),
        }
    }
}

// =============================================================================
// Registration Settings
// =============================================================================

/// Registration flow behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationSettings {
    /// How long the success banner stays up before the form is usable
    /// again (milliseconds).
    /// Default: 1500
    #[serde(default = "default_success_display_ms")]
    pub success_display_ms: u64,
}

fn default_success_display_ms() -> u64 {
    1500
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        RegistrationSettings {
            success_display_ms: default_success_display_ms(),
        }
    }
}

// =============================================================================
// Scanner Settings
// =============================================================================

/// Camera scanner behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerSettings {
    /// Barcode format names the camera should decode.
    /// Default: qr, ean13, code128
    #[serde(default = "default_scanner_formats")]
    pub formats: Vec<String>,
}

fn default_scanner_formats() -> Vec<String> {
    BarcodeFormat::ALL
        .iter()
        .map(|format| format.as_str().to_string())
        .collect()
}

impl Default for ScannerSettings {
    fn default() -> Self {
        ScannerSettings {
            formats: default_scanner_formats(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete app configuration.
///
/// Every section is optional in the file; missing sections fall back to
/// defaults, so an empty `config.toml` is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document store configuration.
    #[serde(default)]
    pub store: StoreSettings,

    /// Registration flow settings.
    #[serde(default)]
    pub registration: RegistrationSettings,

    /// Camera scanner settings.
    #[serde(default)]
    pub scanner: ScannerSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading app config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load app config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> Result<(), ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "App config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be greater than 0".into(),
            ));
        }

        // A banner past a minute means someone wrote seconds into a
        // milliseconds field
        if self.registration.success_display_ms > 60_000 {
            return Err(ConfigError::Invalid(format!(
                "success_display_ms {} is longer than a minute",
                self.registration.success_display_ms
            )));
        }

        if self.scanner.formats.is_empty() {
            return Err(ConfigError::Invalid(
                "scanner formats list is empty; the camera would decode nothing".into(),
            ));
        }

        for name in &self.scanner.formats {
            if BarcodeFormat::parse(name).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "'{}' is not a supported barcode format",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("BODEGA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.store.database_path = Some(PathBuf::from(path));
        }

        if let Ok(connections) = std::env::var("BODEGA_MAX_CONNECTIONS") {
            if let Ok(parsed) = connections.parse::<u32>() {
                debug!(max_connections = parsed, "Overriding pool size from environment");
                self.store.max_connections = parsed;
            }
        }

        if let Ok(display) = std::env::var("BODEGA_SUCCESS_DISPLAY_MS") {
            if let Ok(parsed) = display.parse::<u64>() {
                self.registration.success_display_ms = parsed;
            }
        }

        if let Ok(formats) = std::env::var("BODEGA_SCANNER_FORMATS") {
            debug!(formats = %formats, "Overriding scanner formats from environment");
            self.scanner.formats = formats
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bodega", "inventory").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("config.toml")
        })
    }

    /// Returns the default database file path.
    fn default_database_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bodega", "inventory")
            .map(|dirs| dirs.data_dir().join("bodega.db"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the store configuration for these settings.
    ///
    /// The database path falls back to the platform data directory, and
    /// past that to the working directory.
    pub fn store_config(&self) -> StoreConfig {
        let path = self
            .store
            .database_path
            .clone()
            .or_else(Self::default_database_path)
            .unwrap_or_else(|| PathBuf::from("bodega.db"));

        StoreConfig::new(path).max_connections(self.store.max_connections)
    }

    /// How long the success banner stays up.
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.registration.success_display_ms)
    }

    /// The configured scanner formats.
    ///
    /// Unknown names are dropped here; [`validate`](Self::validate)
    /// rejects them up front.
    pub fn scanner_formats(&self) -> Vec<BarcodeFormat> {
        self.scanner
            .formats
            .iter()
            .filter_map(|name| BarcodeFormat::parse(name))
            .collect()
    }

    /// Creates a scan session with the configured formats.
    pub fn new_scan_session(&self) -> ScanSession {
        ScanSession::with_formats(self.scanner_formats())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.store.database_path.is_none());
        assert_eq!(config.store.max_connections, 5);
        assert_eq!(config.registration.success_display_ms, 1500);
        assert_eq!(config.scanner.formats, vec!["qr", "ean13", "code128"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [registration]
            success_display_ms = 400
            "#,
        )
        .unwrap();

        assert_eq!(config.registration.success_display_ms, 400);
        assert_eq!(config.store.max_connections, 5);
        assert_eq!(config.scanner.formats.len(), 3);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.store.max_connections = 0;
        assert!(config.validate().is_err());

        config.store.max_connections = 5;
        config.registration.success_display_ms = 120_000;
        assert!(config.validate().is_err());

        config.registration.success_display_ms = 1500;
        config.scanner.formats = vec!["pdf417".to_string()];
        assert!(config.validate().is_err());

        config.scanner.formats = vec!["EAN13".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_format_list_is_invalid() {
        let mut config = AppConfig::default();
        config.scanner.formats.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_config_honors_explicit_path() {
        let mut config = AppConfig::default();
        config.store.database_path = Some(PathBuf::from("/tmp/test-bodega.db"));
        config.store.max_connections = 2;

        let store_config = config.store_config();
        assert_eq!(store_config.database_path, PathBuf::from("/tmp/test-bodega.db"));
        assert_eq!(store_config.max_connections, 2);
    }

    #[test]
    fn test_scanner_formats_parse() {
        let mut config = AppConfig::default();
        config.scanner.formats = vec!["EAN13".to_string(), "qr".to_string()];

        assert_eq!(
            config.scanner_formats(),
            vec![BarcodeFormat::Ean13, BarcodeFormat::Qr]
        );

        let session = config.new_scan_session();
        assert_eq!(session.formats().len(), 2);
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[registration]"));
        assert!(toml_str.contains("[scanner]"));
    }
}
