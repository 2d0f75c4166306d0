pub mod queries;
pub mod schema;

use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};

/// Handle to the message store. Constructed once by the server and shared
/// through application state; there is no global connection.
///
/// The connection may be absent: `connect` never fails, and every use retries
/// the open until it succeeds. Until then each request fails on its own.
pub struct Database {
    path: Option<PathBuf>,
    conn: Mutex<Option<Connection>>,
}

impl Database {
    /// Open now and fail if the store is unusable.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = open_file(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Open if possible; otherwise log and defer to the first use.
    pub fn connect(path: &Path) -> Self {
        let conn = match open_file(path) {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Error connecting to the database at {}: {:#}", path.display(), e);
                None
            }
        };
        Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        }
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::ensure(&conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(Some(conn)),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.conn.lock().map(|c| c.is_some()).unwrap_or(false)
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut guard = self.conn.lock().map_err(|e| anyhow!("DB lock poisoned: {}", e))?;

        if guard.is_none() {
            let path = self.path.as_deref().ok_or_else(|| anyhow!("database is not connected"))?;
            *guard = Some(open_file(path)?);
        }

        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(anyhow!("database is not connected")),
        }
    }
}

fn open_file(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;

    // WAL mode so outside readers of the file never block inserts
    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::ensure(&conn)?;

    info!("Database opened at {}", path.display());
    Ok(conn)
}
