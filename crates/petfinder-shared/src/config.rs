//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_JWT_AUDIENCE, DEFAULT_QR_BUCKET};
use crate::error::AppError;
use crate::types::BackendKind;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Public origin encoded into QR codes, e.g. `https://petfinder.example`.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub backend: BackendKind,
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: BackendKind,
    /// Project URL of the hosted storage API.
    pub url: Option<String>,
    pub service_key: Option<String>,
    pub bucket: String,
    pub local_root: String,
    pub public_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub audience: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus explicit overrides, without touching files or the environment.
    pub fn from_overrides(overrides: &[(&str, &str)]) -> Result<Self, AppError> {
        let mut builder = Self::with_defaults()?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "petfinder-server")?
            .set_default("app.base_url", "http://localhost:8080")?
            .set_default("database.backend", "postgres")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("storage.backend", "local")?
            .set_default("storage.bucket", DEFAULT_QR_BUCKET)?
            .set_default("storage.local_root", "data/storage")?
            .set_default("storage.public_base_url", "http://localhost:8080/storage")?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.audience", DEFAULT_JWT_AUDIENCE)
    }

    /// Rejects backend combinations that cannot be wired.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.database.backend {
            BackendKind::Postgres => {
                if self.database.url.as_deref().map_or(true, str::is_empty) {
                    return Err(AppError::InvalidConfig(
                        "database.url is required for the postgres backend".into(),
                    ));
                }
            }
            BackendKind::Memory => {}
            other => {
                return Err(AppError::InvalidConfig(format!(
                    "{} is not a database backend",
                    other.as_str()
                )))
            }
        }

        match self.storage.backend {
            BackendKind::Supabase => {
                let has_url = self.storage.url.as_deref().map_or(false, |u| !u.is_empty());
                let has_key = self.storage.service_key.as_deref().map_or(false, |k| !k.is_empty());
                if !has_url || !has_key {
                    return Err(AppError::InvalidConfig(
                        "storage.url and storage.service_key are required for the supabase backend".into(),
                    ));
                }
            }
            BackendKind::Local | BackendKind::Memory => {}
            BackendKind::Postgres => {
                return Err(AppError::InvalidConfig("postgres is not a storage backend".into()))
            }
        }

        Ok(())
    }

    pub fn scan_base_url(&self) -> &str {
        self.app.base_url.trim_end_matches('/')
    }
}
