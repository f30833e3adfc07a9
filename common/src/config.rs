// Configuration management with layered configuration (file, env)

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{MAX_HOUR, MIN_HOUR};

/// Main settings structure containing all configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub form: FormConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_run_migrations() -> bool {
    true
}

/// Which event repository backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Settings for the server-rendered create form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub min_name_length: usize,
    pub selectable_days: u32,
    pub default_start_hour: i32,
    pub default_end_hour: i32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_name_length: 5,
            selectable_days: 42,
            default_start_hour: 9,
            default_end_hour: 17,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
    pub tracing_endpoint: Option<String>,
}

fn default_metrics_enabled() -> bool {
    true
}

impl Settings {
    /// Load configuration with layered precedence: defaults → file → env
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default configuration
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local configuration (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.server.request_timeout_seconds == 0 {
            return Err("Server request_timeout_seconds must be greater than 0".to_string());
        }

        if self.storage.backend == StorageBackend::Postgres {
            if self.database.url.is_empty() {
                return Err("Database URL cannot be empty".to_string());
            }
            if self.database.max_connections == 0 {
                return Err("Database max_connections must be greater than 0".to_string());
            }
            if self.database.min_connections > self.database.max_connections {
                return Err(
                    "Database min_connections cannot exceed max_connections".to_string(),
                );
            }
        }

        let form = &self.form;
        if form.selectable_days == 0 {
            return Err("Form selectable_days must be greater than 0".to_string());
        }
        if !(MIN_HOUR..MAX_HOUR).contains(&form.default_start_hour)
            || !(MIN_HOUR + 1..=MAX_HOUR).contains(&form.default_end_hour)
            || form.default_start_hour >= form.default_end_hour
        {
            return Err(format!(
                "Form default window {}..{} is not a valid time window",
                form.default_start_hour, form.default_end_hour
            ));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                request_timeout_seconds: default_request_timeout(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/meet_sync".to_string(),
                max_connections: 10,
                min_connections: 2,
                connect_timeout_seconds: 30,
                run_migrations: true,
            },
            storage: StorageConfig::default(),
            form: FormConfig::default(),
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                log_format: LogFormat::Pretty,
                metrics_enabled: true,
                tracing_endpoint: None,
            },
        }
    }
}
