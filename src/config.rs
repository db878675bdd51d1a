//! Configuration for the admin console.
//!
//! Settings resolve env vars first, then the config file at
//! ~/.config/maitred/config.toml, then built-in defaults.

use serde::Deserialize;
use std::path::PathBuf;

/// Crate version, surfaced by `--version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Runtime settings
// ─────────────────────────────────────────────────────────────────────────────

/// Effective settings after all three layers resolve
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the reservation platform API
    pub api_url: String,

    /// URL of the browser login page printed when no valid session exists
    pub login_url: String,

    /// Whether to enable the TUI (can be disabled for headless session checks)
    pub enable_tui: bool,

    /// Rows requested per page from list endpoints
    pub page_size: u32,

    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Logging section
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            login_url: "http://localhost:3000/login".to_string(),
            enable_tui: true,
            page_size: 8,
            theme: "dark".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Log Rotation
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "never" => Self::Never,
            _ => Self::Daily, // Default to daily for unknown values
        }
    }

    /// Rotation name for config serialization
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Logging knobs shared by the in-app ring, stdout and the file layer
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to TUI buffer or stdout)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "maitred" -> "maitred.2024-01-15.log")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "maitred".to_string(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::from_str(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// On-disk shape
// ─────────────────────────────────────────────────────────────────────────────

/// What the config file may contain; every key optional so partial files load
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub login_url: Option<String>,
    pub page_size: Option<u32>,
    pub theme: Option<String>,

    /// The [logging] table, when present
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Path of the config file: ~/.config/maitred/config.toml.
    /// ~/.config is used on every platform, Windows included
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("maitred").join("config.toml"))
    }

    /// Write a default config file on first run so the knobs are there to
    /// find. Existing files are left alone.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional, never block startup on it
            }
        }

        // The template comes from to_toml() so the generated file always
        // parses back
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// Exits the process when the file exists but cannot be parsed or read.
    /// This is intentional - a broken config should fail fast with a clear
    /// error, not silently fall back to defaults while the user debugs the
    /// wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    // Fatal error - config exists but is invalid
                    eprintln!("\n╔══════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse config file  ║");
                    eprintln!("╚══════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, delete the file and restart maitred.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                // The file is there but unreadable, e.g. permissions
                eprintln!("\n╔══════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read config file      ║");
                eprintln!("╚══════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        let defaults = Self::default();

        // API base URL: env > file > default
        let api_url = std::env::var("MAITRED_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Login page URL: env > file > default
        let login_url = std::env::var("MAITRED_LOGIN_URL")
            .ok()
            .or(file.login_url)
            .unwrap_or(defaults.login_url);

        // The TUI toggle is a run mode, not a preference; env only
        let enable_tui = std::env::var("MAITRED_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Page size: env > file > default, clamped to something the API accepts
        let page_size = std::env::var("MAITRED_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.page_size)
            .unwrap_or(defaults.page_size)
            .clamp(1, 100);

        // Theme: env > file > default
        let theme = std::env::var("MAITRED_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            login_url,
            enable_tui,
            page_size,
            theme,
            logging,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serialization (single source of truth for the config file format)
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Serialize the config to a commented TOML template.
    ///
    /// Used for both `ensure_config_exists()` and `config --reset`, so the
    /// generated file always matches what the loader understands.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# maitred configuration
# Delete this file to regenerate defaults on next start.

# Base URL of the reservation platform API
api_url = "{api_url}"

# Browser login page printed when no valid admin session exists
login_url = "{login_url}"

# Rows requested per page from list endpoints (1-100)
page_size = {page_size}

# Theme: "dark" or "light"
theme = "{theme}"

[logging]
# Log level: trace, debug, info, warn, error
level = "{log_level}"
# Write structured JSON logs to files (in addition to the in-app log panel)
file_enabled = {file_enabled}
# Directory for log files
file_dir = "{file_dir}"
# Rotation: hourly, daily, never
file_rotation = "{file_rotation}"
# Prefix for log file names
file_prefix = "{file_prefix}"
"#,
            api_url = self.api_url,
            login_url = self.login_url,
            page_size = self.page_size,
            theme = self.theme,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that the serialized template can be parsed back.
    /// Catches TOML syntax errors in the to_toml() format string.
    #[test]
    fn test_config_roundtrip_default() {
        let config = Config::default();
        let toml_str = config.to_toml();

        let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
        assert!(
            parsed.is_ok(),
            "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
            toml_str,
            parsed.err()
        );
    }

    #[test]
    fn test_roundtrip_preserves_values() {
        let mut config = Config::default();
        config.api_url = "https://api.example.com".to_string();
        config.page_size = 20;
        config.logging.file_rotation = LogRotation::Hourly;

        let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(parsed.page_size, Some(20));
        let logging = LoggingConfig::from_file(parsed.logging);
        assert_eq!(logging.file_rotation, LogRotation::Hourly);
    }

    #[test]
    fn test_log_rotation_parse() {
        assert_eq!(LogRotation::from_str("hourly"), LogRotation::Hourly);
        assert_eq!(LogRotation::from_str("DAILY"), LogRotation::Daily);
        assert_eq!(LogRotation::from_str("never"), LogRotation::Never);
        // Unknown values fall back to daily
        assert_eq!(LogRotation::from_str("weekly"), LogRotation::Daily);
    }

    #[test]
    fn test_logging_from_file_partial() {
        let file = FileLogging {
            level: Some("debug".to_string()),
            ..Default::default()
        };
        let logging = LoggingConfig::from_file(Some(file));
        assert_eq!(logging.level, "debug");
        // Unspecified fields keep defaults
        assert!(!logging.file_enabled);
        assert_eq!(logging.file_prefix, "maitred");
    }
}
