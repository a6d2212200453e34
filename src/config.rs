use std::net::SocketAddr;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Environment variable naming an extra configuration file.
pub const CONFIG_FILE_ENV: &str = "FOLIO_CONFIG";

/// Application settings.
///
/// Layered, later sources winning: built-in defaults, `folio.toml` in the
/// working directory, the file named by `FOLIO_CONFIG`, then `FOLIO__*`
/// environment variables (e.g. `FOLIO__MONGODB__URI`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub mongodb: MongoSettings,
    pub search: SearchSettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind: String,
    /// Public origin used to build absolute links in search results.
    pub public_base_url: String,
}

/// Which record store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Mongodb,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Deadline for all source queries of one search, in milliseconds.
    pub timeout_ms: u64,
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoSettings {
    /// Upsert sample content at startup.
    pub seed: bool,
}

impl Settings {
    /// Load settings from all configured sources.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?.add_source(File::with_name("folio").required(false));

        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            builder = builder.add_source(File::with_name(&path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        Self::build(builder)
    }

    /// Defaults overlaid with an inline TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::build(Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.bind", "127.0.0.1:3000")?
            .set_default("server.public_base_url", "http://localhost:3000")?
            .set_default("storage.backend", "mongodb")?
            .set_default("mongodb.uri", "mongodb://localhost:27017")?
            .set_default("mongodb.database", "folio")?
            .set_default("search.timeout_ms", 5000_i64)?
            .set_default("demo.seed", false)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;

        let base = &self.server.public_base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Message(format!(
                "server.public_base_url must be an http(s) URL, got '{base}'"
            )));
        }

        if self.search.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "search.timeout_ms must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.bind.parse().map_err(|e| {
            ConfigError::Message(format!("invalid server.bind '{}': {e}", self.server.bind))
        })
    }
}
