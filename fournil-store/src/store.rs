//! Structured table store
//!
//! The suite consumes exactly four primitives: read-all, bulk-insert,
//! whole-store delete and reopen. [`JsonStore`] keeps every table in one
//! JSON document on disk; [`MemoryStore`] is the injectable fake.
//! Row shapes are opaque `serde_json::Value`s; field order is preserved
//! end to end so backups round-trip byte-for-byte.

use async_trait::async_trait;
use serde_json::Value;
use shared::Table;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::StoreResult;

/// Structured store over the fixed table set.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// All rows of `table`, in insertion order.
    async fn read_all(&self, table: Table) -> StoreResult<Vec<Value>>;

    /// Append `rows` to `table`, returning the number inserted.
    async fn bulk_insert(&self, table: Table, rows: Vec<Value>) -> StoreResult<usize>;

    /// Delete the whole store, every table included.
    async fn delete_all(&self) -> StoreResult<()>;

    /// Reopen the store from its backing state.
    async fn reopen(&self) -> StoreResult<()>;
}

type Tables = BTreeMap<String, Vec<Value>>;

/// File-backed store: one JSON document holding every table.
pub struct JsonStore {
    path: PathBuf,
    tables: Mutex<Tables>,
}

impl JsonStore {
    /// Open the store at `path`, loading existing content if present.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tables = Self::load(&path)?;
        Ok(Self {
            path,
            tables: Mutex::new(tables),
        })
    }

    fn load(path: &Path) -> StoreResult<Tables> {
        if !path.exists() {
            return Ok(Tables::new());
        }
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(tables) => Ok(tables),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "store file unreadable, starting empty");
                Ok(Tables::new())
            }
        }
    }

    fn persist(&self, tables: &Tables) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(tables)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[async_trait]
impl TableStore for JsonStore {
    async fn read_all(&self, table: Table) -> StoreResult<Vec<Value>> {
        let tables = self.tables.lock().await;
        Ok(tables.get(table.as_str()).cloned().unwrap_or_default())
    }

    async fn bulk_insert(&self, table: Table, rows: Vec<Value>) -> StoreResult<usize> {
        let mut tables = self.tables.lock().await;
        let count = rows.len();
        tables
            .entry(table.as_str().to_string())
            .or_default()
            .extend(rows);
        self.persist(&tables)?;
        Ok(count)
    }

    async fn delete_all(&self) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        tables.clear();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        tracing::info!(path = %self.path.display(), "store deleted");
        Ok(())
    }

    async fn reopen(&self) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        *tables = Self::load(&self.path)?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn read_all(&self, table: Table) -> StoreResult<Vec<Value>> {
        let tables = self.tables.lock().await;
        Ok(tables.get(table.as_str()).cloned().unwrap_or_default())
    }

    async fn bulk_insert(&self, table: Table, rows: Vec<Value>) -> StoreResult<usize> {
        let mut tables = self.tables.lock().await;
        let count = rows.len();
        tables
            .entry(table.as_str().to_string())
            .or_default()
            .extend(rows);
        Ok(count)
    }

    async fn delete_all(&self) -> StoreResult<()> {
        self.tables.lock().await.clear();
        Ok(())
    }

    async fn reopen(&self) -> StoreResult<()> {
        Ok(())
    }
}
