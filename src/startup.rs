use std::{path::Path, time::Duration};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::Config, error::AppError};

/// Timeout applied to every outgoing HTTP request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date. For file-backed SQLite
/// URLs the parent directory of the database file is created first.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::IoErr)` - The SQLite data directory could not be created
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    if let Some(dir) = sqlite_data_dir(&config.database_url) {
        tokio::fs::create_dir_all(dir).await?;
    }

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Directory holding the database file of a `sqlite://` URL, if there is one to create.
fn sqlite_data_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }

    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Output always goes to stdout
/// and is mirrored without ANSI colours to the configured log file.
///
/// # Returns
/// - `Ok(Some(guard))` - File logging is active; keep the guard alive until exit so
///   buffered lines are flushed
/// - `Ok(None)` - Logging to stdout only
/// - `Err(AppError::LoggingErr)` - Invalid filter or a subscriber was already installed
pub fn init_tracing(config: &Config) -> Result<Option<WorkerGuard>, AppError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| AppError::LoggingErr(e.to_string()))?,
    };

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                AppError::LoggingErr(format!("LOG_FILE {} has no file name", path.display()))
            })?;
            std::fs::create_dir_all(dir)?;

            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::LoggingErr(e.to_string()))?;

    Ok(guard)
}

/// Builds the shared HTTP client used for exchange rate requests.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_sqlite_data_dir() {
        assert_eq!(
            sqlite_data_dir("sqlite://data/bot.db?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_data_dir("sqlite://bot.db"), None);
        assert_eq!(sqlite_data_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_data_dir("sqlite://:memory:"), None);
        assert_eq!(sqlite_data_dir("postgres://localhost/bot"), None);
    }
}
