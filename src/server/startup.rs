use std::time::Duration;

use sea_orm::DatabaseConnection;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::server::{config::Config, error::AppError, service::firm::FirmConfigService};

const DEFAULT_LOG_FILTER: &str = "blackgolden=info,info";
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Initializes the tracing subscriber.
///
/// Uses `RUST_LOG` when set, otherwise logs the application at info level.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the shared HTTP client.
///
/// Requests time out after ten seconds and redirects are not followed.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Imports the firm seed file when one is configured and no firm exists yet.
pub async fn seed_firms(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    let Some(path) = &config.firms_seed_path else {
        return Ok(());
    };

    let imported = FirmConfigService::new(db).seed_from_file(path).await?;
    if imported > 0 {
        tracing::info!("Imported {} firms from {}", imported, path);
    }

    Ok(())
}
