use anyhow::Result;
use rusqlite::Connection;
use tracing::debug;

/// Create the `messages` table if it does not exist yet. Safe to run on
/// every start; existing rows are never touched.
pub fn ensure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS messages (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            message     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    debug!("messages table ready");
    Ok(())
}
