use crate::schemas::AppState;
use anyhow::Result;
use config::{Config, Environment, File};
use moka::future::Cache;
use sea_orm::{Database, DatabaseConnection};
use serde::Deserialize;
use std::sync::{atomic::AtomicU64, Arc};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://hallmanager.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime settings, layered as defaults, then `hallmanager.toml`, then `HALL_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// HMAC secret used to sign session tokens.
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    /// Lifetime of cached hall statistics.
    pub cache_ttl_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            jwt_secret: "change-me-in-production".to_string(),
            token_ttl_days: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cache_ttl_secs: 300,
        }
    }
}

impl Settings {
    /// Load settings from the environment (and `.env`, if present).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Settings::default();

        let settings = Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("bind_address", defaults.bind_address)?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("token_ttl_days", defaults.token_ttl_days)?
            .set_default("bcrypt_cost", i64::from(defaults.bcrypt_cost))?
            .set_default("cache_ttl_secs", defaults.cache_ttl_secs as i64)?
            .add_source(File::with_name("hallmanager").required(false))
            .add_source(Environment::with_prefix("HALL").try_parsing(true))
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        debug!(
            database_url = %settings.database_url,
            bind_address = %settings.bind_address,
            token_ttl_days = settings.token_ttl_days,
            "Settings loaded"
        );
        Ok(settings)
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    pub fn with_bind_address(mut self, bind_address: impl Into<String>) -> Self {
        self.bind_address = bind_address.into();
        self
    }
}

/// Build the shared state around an already opened connection.
pub fn build_app_state(db: DatabaseConnection, settings: Settings) -> AppState {
    let cache = Cache::builder()
        .max_capacity(100)
        .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
        .build();

    AppState {
        db,
        cache,
        statistics_generation: Arc::new(AtomicU64::new(0)),
        settings: Arc::new(settings),
    }
}

/// Connect to the configured database and initialize application state
pub async fn initialize_app_state(settings: Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;
    Ok(build_app_state(db, settings))
}
