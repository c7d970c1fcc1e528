//! Configuration management for the prediction service

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub models: ModelsConfig,
    pub sheets: SheetsConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Regression models configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing the ONNX regressor files
    pub models_dir: String,
    /// Number of threads for ONNX inference per model (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

/// Prediction log sheet configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet that receives one row per prediction
    pub spreadsheet_id: String,
    /// Worksheet (tab) the rows are appended to
    #[serde(default = "default_worksheet")]
    pub worksheet: String,
    /// JSON-encoded service account credentials. When unset, the
    /// GOOGLE_CLOUD_KEY environment variable is consulted instead.
    #[serde(default)]
    pub credentials_json: Option<String>,
}

fn default_worksheet() -> String {
    "Sheet1".to_string()
}

impl SheetsConfig {
    /// Resolve the credential blob from config or environment.
    pub fn credential_blob(&self) -> Option<String> {
        self.credentials_json
            .clone()
            .or_else(|| std::env::var("GOOGLE_CLOUD_KEY").ok())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            models: ModelsConfig {
                models_dir: "models".to_string(),
                onnx_threads: 1,
            },
            sheets: SheetsConfig {
                spreadsheet_id: String::new(),
                worksheet: default_worksheet(),
                credentials_json: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.models.models_dir, "models");
        assert_eq!(config.models.onnx_threads, 1);
        assert_eq!(config.sheets.worksheet, "Sheet1");
    }

    #[test]
    fn test_inline_credentials_take_precedence() {
        let config = SheetsConfig {
            spreadsheet_id: "sheet".to_string(),
            worksheet: default_worksheet(),
            credentials_json: Some("{\"client_email\":\"a@b\"}".to_string()),
        };

        assert_eq!(
            config.credential_blob().as_deref(),
            Some("{\"client_email\":\"a@b\"}")
        );
    }
}
