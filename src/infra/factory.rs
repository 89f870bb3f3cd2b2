use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::StartupError;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_resource_repo::PostgresResourceRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_resource_repo::SqliteResourceRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, StartupError> {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts = PgConnectOptions::from_str(database_url)?;
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        Ok(postgres_state(config, pool))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        Ok(sqlite_state(config, pool))
    }
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    AppState {
        config: config.clone(),
        resource_repo: Arc::new(PostgresResourceRepo::new(pool.clone())),
        booking_repo: Arc::new(PostgresBookingRepo::new(pool)),
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    AppState {
        config: config.clone(),
        resource_repo: Arc::new(SqliteResourceRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool)),
    }
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), StartupError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    Ok(())
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), StartupError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}
