use sqlx::{query, query_scalar, SqlitePool};

/// Reads a single setting, `None` when it was never stored
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Inserts or replaces a setting
pub async fn put_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}
