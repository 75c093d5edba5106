use sqlx::SqlitePool;

/// Applies connection pragmas and creates the `book` table when missing.
pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas for better durability/performance (best-effort)
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(pool).await {
        tracing::warn!("Failed to set busy_timeout: {}", e);
    }

    // borrowing_date is ISO-8601 text so lexical comparison matches date order
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS book (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            reference TEXT NOT NULL,
            borrowing_date TEXT NOT NULL,
            returned INTEGER NOT NULL DEFAULT 0
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        ("idx_book_title", "CREATE INDEX IF NOT EXISTS idx_book_title ON book(title)"),
        ("idx_book_borrowing_date", "CREATE INDEX IF NOT EXISTS idx_book_borrowing_date ON book(borrowing_date)"),
    ];
    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            tracing::warn!("Failed to create index {}: {}", name, e);
        }
    }

    Ok(())
}
