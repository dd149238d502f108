use crate::core::{AppError, AppResult};
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub seed_on_startup: bool,
    pub seed_companies: u32,
    pub seed_employees: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                default_page_size: parse_env("DEFAULT_PAGE_SIZE", 25)?,
                max_page_size: parse_env("MAX_PAGE_SIZE", 100)?,
                seed_on_startup: env::var("SEED_ON_STARTUP")
                    .map(|raw| raw == "true" || raw == "1")
                    .unwrap_or(true),
                seed_companies: parse_env("SEED_COMPANIES", 5)?,
                seed_employees: parse_env("SEED_EMPLOYEES", 20)?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.app.default_page_size == 0 {
            return Err(AppError::configuration(
                "Default page size must be greater than 0",
            ));
        }

        if self.app.max_page_size < self.app.default_page_size {
            return Err(AppError::configuration(
                "Max page size must not be below the default page size",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(AppError::configuration(
                "Database pool must allow at least one connection",
            ));
        }

        Ok(())
    }
}

pub(crate) fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
