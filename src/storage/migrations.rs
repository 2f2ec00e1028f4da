use rusqlite::Connection;

/// Run database schema migrations
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY,
            titleTask TEXT,
            descriptionTask TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            dateString TEXT
        );
        ",
    )?;

    tracing::debug!(target: "storage", "Database schema migrations completed");
    Ok(())
}
