use crate::Database;
use anyhow::Result;
use postbox_types::models::NewMessage;

impl Database {
    /// Insert one validated message. Values are always bound, never spliced
    /// into the SQL text. Returns the generated row id.
    pub fn insert_message(&self, msg: &NewMessage) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (name, email, message) VALUES (?1, ?2, ?3)",
                (&msg.name, &msg.email, &msg.message),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}
