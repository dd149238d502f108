pub mod seed;

use sqlx::SqlitePool;

use crate::core::{AppError, AppResult};

pub use seed::{generate_companies, generate_employees, seed_if_empty};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Apply pending schema migrations.
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| AppError::configuration(format!("Migration failed: {}", e)))
}
