//! Backup bundle export / import
//!
//! A backup is one JSON document: table name → array of opaque rows, in
//! the fixed export order. Import is destructive: it wipes the store
//! before inserting, and nothing wraps the sequence in a transaction, so
//! a failed import can leave partial state. Callers must confirm with
//! the user before importing.

use serde_json::{Map, Value};
use shared::Table;

use crate::error::{StoreError, StoreResult};
use crate::store::TableStore;

/// What an import actually inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub tables: usize,
    pub rows: usize,
}

/// Export every backup table as one JSON object, tables in
/// [`Table::BACKUP`] order, rows verbatim.
pub async fn export_bundle(store: &dyn TableStore) -> StoreResult<Value> {
    let mut bundle = Map::new();
    for table in Table::BACKUP {
        let rows = store.read_all(table).await?;
        tracing::debug!(table = %table, rows = rows.len(), "exported table");
        bundle.insert(table.as_str().to_string(), Value::Array(rows));
    }
    Ok(Value::Object(bundle))
}

/// Destructively replace the store content with `bundle`.
///
/// The store is deleted and reopened, then every known table present in
/// the document is bulk-inserted. Tables absent from the document are
/// left empty; unknown table names are skipped with a warning; a table
/// whose value is not an array aborts the import.
pub async fn import_bundle(store: &dyn TableStore, bundle: &Value) -> StoreResult<ImportSummary> {
    let entries = bundle
        .as_object()
        .ok_or_else(|| StoreError::InvalidBackup("top level is not an object".to_string()))?;

    store.delete_all().await?;
    store.reopen().await?;

    let mut summary = ImportSummary { tables: 0, rows: 0 };
    for (name, rows) in entries {
        let Some(table) = Table::from_name(name) else {
            tracing::warn!(table = %name, "unknown table in backup, skipped");
            continue;
        };
        let rows = rows
            .as_array()
            .ok_or_else(|| StoreError::InvalidBackup(format!("table {name} is not an array")))?;
        let inserted = store.bulk_insert(table, rows.clone()).await?;
        summary.tables += 1;
        summary.rows += inserted;
    }

    tracing::info!(tables = summary.tables, rows = summary.rows, "backup imported");
    Ok(summary)
}
