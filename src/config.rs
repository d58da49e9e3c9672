//! Configuration management for the book catalog server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Plain environment variables understood for compatibility with existing
/// deployments, mapped onto their configuration keys.
const LEGACY_VARIABLES: &[(&str, &str)] = &[
    ("DATABASE_HOST", "database.host"),
    ("DATABASE_PORT_NUMBER", "database.port"),
    ("DATABASE_NAME", "database.name"),
    ("DATABASE_USER", "database.user"),
    ("DATABASE_PASSWORD", "database.password"),
    ("SERVER_PORT", "server.port"),
];

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the web UI, served under `/static`
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Leave schema creation to another process and assume the table exists
    pub skip_bootstrap: bool,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(env::vars().collect())
    }

    /// Load configuration from files and the given set of variables
    pub fn load_from(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let run_mode = vars
            .get("RUN_MODE")
            .cloned()
            .unwrap_or_else(|| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // BOOKMGR_DATABASE__MAX_CONNECTIONS=20 style variables
            .add_source(
                Environment::with_prefix("BOOKMGR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone().into_iter().collect())),
            );

        for (variable, key) in LEGACY_VARIABLES {
            let value = vars.get(*variable).filter(|v| !v.is_empty()).cloned();
            builder = builder.set_override_option(*key, value)?;
        }

        let skip_bootstrap = vars
            .get("SKIP_BOOTSTRAP")
            .filter(|v| !v.is_empty())
            .map(|v| parse_skip_flag(v));
        builder = builder.set_override_option("database.skip_bootstrap", skip_bootstrap)?;

        builder.build()?.try_deserialize()
    }
}

/// Only the exact strings `true` and `1` enable the flag; anything else leaves it off
fn parse_skip_flag(value: &str) -> bool {
    value == "true" || value == "1"
}

impl DatabaseConfig {
    /// Connection target for logging, without the password
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("./static"),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            name: "bookdb".to_string(),
            user: "root".to_string(),
            password: String::new(),
            skip_bootstrap: false,
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
