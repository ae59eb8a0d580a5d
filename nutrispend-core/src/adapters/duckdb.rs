//! DuckDB key-value store implementation

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use duckdb::{params, Connection, OptionalExt};
use tracing::warn;

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::ports::KeyValueStore;

/// The single table every preference and the local collection live in
const KV_SCHEMA: &str = include_str!("kv_schema.sql");

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

fn storage_error(e: duckdb::Error) -> DomainError {
    DomainError::storage(e.to_string())
}

/// Key-value store backed by a single `sys_kv` table
pub struct DuckDbKeyValueStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl DuckDbKeyValueStore {
    /// Open (or create) the database file
    ///
    /// Retries with exponential backoff on file locking errors, which show up
    /// when a `watch` loop and a one-shot command open the file together.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: Some(db_path.to_path_buf()),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        warn!(
                            "Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
    }

    /// In-memory database, used by tests and throwaway sessions
    pub fn open_in_memory() -> Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_in_memory_with_flags(config)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: None,
        })
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Extension autoloading stays off: nothing here needs extensions
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Ok(Connection::open_with_flags(db_path, config)?)
    }

    /// Path of the database file (`None` for in-memory stores)
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Create the `sys_kv` table if this is a fresh database
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("Database connection lock poisoned"))?;
        conn.execute_batch(KV_SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DomainError::storage("Database connection lock poisoned"))
    }

    pub fn get_value(&self, key: &str) -> DomainResult<Option<String>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT kv_value FROM sys_kv WHERE kv_key = ?",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(storage_error)
    }

    pub fn set_value(&self, key: &str, value: &str) -> DomainResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO sys_kv (kv_key, kv_value, updated_at)
             VALUES (?, ?, current_timestamp)
             ON CONFLICT (kv_key) DO UPDATE SET
                kv_value = EXCLUDED.kv_value,
                updated_at = EXCLUDED.updated_at",
            params![key, value],
        )
        .map_err(storage_error)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for DuckDbKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.get_value(key)
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.set_value(key, value)
    }
}
