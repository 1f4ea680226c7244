//! Configuration management

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{
    DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_APP_NAME, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_MIN_CONNECTIONS, DEFAULT_SCHEMA_LOCK_KEY,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    pub app: AppSettings,
    #[validate(nested)]
    pub database: DatabaseSettings,
    pub schema: SchemaSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct DatabaseSettings {
    #[validate(length(min = 1, message = "database.url must be set"))]
    pub url: String,
    #[validate(range(min = 1, message = "database.max_connections must be at least 1"))]
    pub max_connections: u32,
    pub min_connections: u32,
    #[validate(range(min = 1, message = "database.acquire_timeout_secs must be at least 1"))]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchemaSettings {
    pub lock_key: i64,
}

impl DatabaseSettings {
    /// Connection URL with any `user:password@` section masked, safe for logs.
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://") else {
            return self.url.clone();
        };
        let rest = &self.url[scheme_end + 3..];
        match rest.rfind('@') {
            Some(at) => format!("{}://***@{}", &self.url[..scheme_end], &rest[at + 1..]),
            None => self.url.clone(),
        }
    }
}

impl AppConfig {
    /// Load from `config/default`, `config/{APP_ENV}` and the process environment.
    /// `.env` is read by the binary before this runs.
    ///
    /// Environment keys use `__` as the nesting separator, e.g. `DATABASE__URL`.
    pub fn load() -> Result<Self, AppError> {
        Self::load_with(&[])
    }

    /// Same as [`AppConfig::load`], with explicit key overrides (e.g. from CLI flags) applied last.
    pub fn load_with(overrides: &[(&str, &str)]) -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let mut builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true));
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        Self::from_config(builder.build()?)
    }

    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("app.env", "development")?
            .set_default("app.name", DEFAULT_APP_NAME)?
            .set_default("database.url", "")?
            .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("database.min_connections", DEFAULT_MIN_CONNECTIONS)?
            .set_default("database.acquire_timeout_secs", DEFAULT_ACQUIRE_TIMEOUT_SECS)?
            .set_default("schema.lock_key", DEFAULT_SCHEMA_LOCK_KEY)
    }
}
