//! Persistence bootstrap: ensure the database exists, open the shared pool
//! and bring the schema up to date.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, Connection};
use tracing::{info, warn};

use crate::config::db::{sanitize_db_url, ConnectionSettings, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;
const MAINTENANCE_DATABASE: &str = "postgres";

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once all attempts are exhausted.
pub(crate) async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt < max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    interval_ms,
                    error = %e,
                    "connection_retry=failed"
                );
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn pg_options(settings: &ConnectionSettings) -> Result<PgConnectOptions, AppError> {
    let opts = PgConnectOptions::from_str(&settings.url)
        .map_err(|e| AppError::config(format!("invalid Postgres url: {e}")))?;
    Ok(if settings.sql_logging {
        opts
    } else {
        opts.disable_statement_logging()
    })
}

fn sqlite_options(settings: &ConnectionSettings) -> Result<SqliteConnectOptions, AppError> {
    let opts = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| AppError::config(format!("invalid SQLite url: {e}")))?
        .create_if_missing(true)
        .foreign_keys(true);
    Ok(if settings.sql_logging {
        opts
    } else {
        opts.disable_statement_logging()
    })
}

/// Create the target database when it does not exist yet.
///
/// Postgres goes through the `postgres` maintenance database; a SQLite file
/// is created on first open; in-memory databases need nothing.
pub async fn ensure_database_exists(settings: &ConnectionSettings) -> Result<(), AppError> {
    match settings.kind {
        DbKind::SqliteMemory => Ok(()),
        DbKind::SqliteFile => {
            let opts = sqlite_options(settings)?;
            let conn = sqlx::SqliteConnection::connect_with(&opts)
                .await
                .map_err(|e| AppError::config(format!("failed to create SQLite database: {e}")))?;
            conn.close()
                .await
                .map_err(|e| AppError::config(format!("failed to close SQLite connection: {e}")))?;
            Ok(())
        }
        DbKind::Postgres => {
            let target = pg_options(settings)?;
            let name = target
                .get_database()
                .map(str::to_owned)
                .ok_or_else(|| AppError::config("Postgres url names no database"))?;
            let maintenance = target.clone().database(MAINTENANCE_DATABASE);

            let mut conn = retry_connection(
                || {
                    let opts = maintenance.clone();
                    async move {
                        sqlx::PgConnection::connect_with(&opts).await.map_err(|e| {
                            AppError::db_unavailable(format!(
                                "failed to connect to maintenance database: {e}"
                            ))
                        })
                    }
                },
                CONNECT_ATTEMPTS,
                CONNECT_INTERVAL_MS,
            )
            .await?;

            let exists = sqlx::query("SELECT 1 FROM pg_database WHERE datname = $1")
                .bind(&name)
                .fetch_optional(&mut conn)
                .await
                .map_err(|e| AppError::db(format!("failed to look up database '{name}': {e}")))?
                .is_some();

            if exists {
                info!(database = %name, "db_create=skipped exists=true");
            } else {
                let stmt = format!("CREATE DATABASE \"{}\"", name.replace('"', "\"\""));
                sqlx::query(&stmt)
                    .execute(&mut conn)
                    .await
                    .map_err(|e| AppError::db(format!("failed to create database '{name}': {e}")))?;
                info!(database = %name, "db_create=done");
            }

            conn.close().await.map_err(|e| {
                AppError::db(format!("failed to close maintenance connection: {e}"))
            })?;
            Ok(())
        }
    }
}

/// Open the shared pool described by `settings`.
pub async fn connect_db(settings: &ConnectionSettings) -> Result<DatabaseConnection, AppError> {
    let acquire_timeout = Duration::from_millis(settings.acquire_timeout_ms);

    let db = match settings.kind {
        DbKind::Postgres => {
            let opts = pg_options(settings)?;
            let pool = retry_connection(
                || {
                    let opts = opts.clone();
                    async move {
                        PgPoolOptions::new()
                            .max_connections(settings.pool_max)
                            .acquire_timeout(acquire_timeout)
                            .idle_timeout(Duration::from_secs(30))
                            .connect_with(opts)
                            .await
                            .map_err(|e| {
                                AppError::db_unavailable(format!(
                                    "failed to connect to Postgres: {e}"
                                ))
                            })
                    }
                },
                CONNECT_ATTEMPTS,
                CONNECT_INTERVAL_MS,
            )
            .await?;
            SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
        }
        DbKind::SqliteFile => {
            let pool = SqlitePoolOptions::new()
                .max_connections(settings.pool_max)
                .acquire_timeout(acquire_timeout)
                .connect_with(sqlite_options(settings)?)
                .await
                .map_err(|e| {
                    AppError::db_unavailable(format!("failed to open SQLite database: {e}"))
                })?;
            SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)
        }
        DbKind::SqliteMemory => {
            // Each in-memory connection is a separate database; keep exactly
            // one alive for the life of the pool.
            let pool = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .acquire_timeout(acquire_timeout)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(sqlite_options(settings)?)
                .await
                .map_err(|e| {
                    AppError::db_unavailable(format!("failed to open in-memory SQLite: {e}"))
                })?;
            SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)
        }
    };

    info!(
        engine = settings.kind.engine(),
        url = %sanitize_db_url(&settings.url),
        pool_max = settings.pool_max,
        acquire_timeout_ms = settings.acquire_timeout_ms,
        "pool=create"
    );
    Ok(db)
}

/// Apply all pending migrations in ascending order.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), AppError> {
    migration::migrate(db, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))
}

/// Ensure the database exists, connect, and migrate.
pub async fn bootstrap_db(settings: &ConnectionSettings) -> Result<DatabaseConnection, AppError> {
    info!(
        profile = %settings.profile,
        db_kind = ?settings.kind,
        engine = settings.kind.engine(),
        pid = std::process::id(),
        "bootstrap=start"
    );

    ensure_database_exists(settings).await?;
    let db = connect_db(settings).await?;
    run_migrations(&db).await?;

    info!("bootstrap=ready");
    Ok(db)
}
