use crate::db::SettingsError;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// Creates the settings table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Opens (creating if needed) the settings database at `database_url`.
pub async fn create_settings_pool(database_url: &str) -> Result<SqlitePool, SettingsError> {
    tracing::debug!(%database_url, "initializing settings database");

    if let Some(db_path) = extract_db_path_from_url(database_url) {
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tracing::debug!(path = %parent.display(), "creating database directory");
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        tracing::info!(%database_url, "creating settings database");
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    setup_database(&pool).await?;
    tracing::debug!("settings database ready");
    Ok(pool)
}

/// Path part of a `sqlite://` URL, or `None` for anything else (e.g. `sqlite::memory:`).
fn extract_db_path_from_url(url: &str) -> Option<String> {
    let path_part = url.strip_prefix("sqlite://")?;

    if path_part.starts_with('/') {
        return Some(format!("/{}", path_part.trim_start_matches('/')));
    }

    Some(path_part.to_string())
}
