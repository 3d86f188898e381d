//! SQLite-backed catalog store

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info};

use super::CatalogStore;
use crate::{Error, Result};

/// Catalog store over a single rusqlite connection
///
/// The connection is owned by the store and released when it is dropped,
/// so callers scope the store to one import run or one request handler.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) a database file, creating parent directories
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create database directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|e| {
            Error::store(format!("Failed to open database {}", path.display()), Some(e))
        })?;
        info!("Opened catalog database {}", path.display());

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::store("Failed to open in-memory database", Some(e)))?;
        Ok(Self { conn, path: None })
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl CatalogStore for SqliteStore {
    fn execute(&mut self, sql: &str, params: &[&str]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let affected = stmt.execute(params_from_iter(params.iter()))?;
        Ok(affected)
    }

    fn query(&self, sql: &str, params: &[&str]) -> Result<Vec<Vec<String>>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let column_count = stmt.column_count();
        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            (0..column_count)
                .map(|i| row.get::<_, String>(i))
                .collect::<rusqlite::Result<Vec<String>>>()
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn execute_raw(&mut self, sql: &str) -> Result<()> {
        debug!("{}", sql);
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }
}
