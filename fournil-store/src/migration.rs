//! One-time legacy migration
//!
//! The legacy web client kept every collection JSON-encoded in its local
//! storage. This orchestrator moves those records into the table store:
//! read the legacy keys, seed the reference tables, bulk-load the data
//! tables, then set a completion flag so the whole thing never runs
//! again. Retry after a failure is manual: clear the flag and rerun;
//! seeding is idempotent so a rerun cannot duplicate reference rows.
//!
//! There is no transaction around the sequence. A failure mid-way can
//! leave rows behind; the flag stays absent so the rerun starts from
//! step one.

use serde_json::Value;
use shared::Table;
use shared::models::{Family, SubFamily, TierType};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;
use crate::store::TableStore;

/// Key-value key marking a completed migration. Created once on success,
/// never cleared automatically.
pub const MIGRATION_FLAG_KEY: &str = "migrationEffectuee";

/// Migration lifecycle. `Done` persists across restarts through the
/// flag; `Error` is terminal for the session until [`Migrator::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationState {
    Idle,
    Migrating,
    Done,
    Error(String),
}

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Reference rows inserted by the seed step, per table
    pub seeded: Vec<(Table, usize)>,
    /// Data rows loaded from the legacy client, per table
    pub loaded: Vec<(Table, usize)>,
}

/// Outcome of [`Migrator::run_if_needed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Flag already present, nothing to do
    Skipped,
    Completed(MigrationSummary),
}

/// Orchestrates the one-time migration.
pub struct Migrator {
    kv: Arc<dyn KvStore>,
    store: Arc<dyn TableStore>,
    state: MigrationState,
}

impl Migrator {
    pub fn new(kv: Arc<dyn KvStore>, store: Arc<dyn TableStore>) -> Self {
        Self {
            kv,
            store,
            state: MigrationState::Idle,
        }
    }

    pub fn state(&self) -> &MigrationState {
        &self.state
    }

    /// Run the migration unless the completion flag is already set.
    ///
    /// A second call while a run is in flight is rejected; this gate is
    /// the only concurrency control the sequence needs.
    pub async fn run_if_needed(&mut self) -> StoreResult<MigrationOutcome> {
        if self.state == MigrationState::Migrating {
            return Err(StoreError::MigrationInFlight);
        }
        if self.kv.contains(MIGRATION_FLAG_KEY)? {
            self.state = MigrationState::Done;
            tracing::debug!("migration flag present, skipping");
            return Ok(MigrationOutcome::Skipped);
        }

        self.state = MigrationState::Migrating;
        tracing::info!("legacy data detected, starting migration");
        match self.migrate().await {
            Ok(summary) => {
                self.kv.set(MIGRATION_FLAG_KEY, "true")?;
                self.state = MigrationState::Done;
                tracing::info!("migration completed successfully");
                Ok(MigrationOutcome::Completed(summary))
            }
            Err(e) => {
                // first error halts the sequence; the flag stays absent
                tracing::error!(error = %e, "migration failed");
                self.state = MigrationState::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Clear the flag for a manual retry and return to `Idle`.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.kv.remove(MIGRATION_FLAG_KEY)?;
        self.state = MigrationState::Idle;
        Ok(())
    }

    async fn migrate(&self) -> StoreResult<MigrationSummary> {
        // ── Step 1: read the legacy collections ──
        let legacy = read_legacy(&*self.kv)?;

        // ── Step 2: seed reference tables ──
        let mut summary = MigrationSummary::default();
        for table in Table::REFERENCE {
            let legacy_rows = legacy.get(&table).cloned().unwrap_or_default();
            let source = if legacy_rows.is_empty() {
                builtin_defaults(table)
            } else {
                legacy_rows
            };
            let inserted = seed_table(&*self.store, table, source).await?;
            summary.seeded.push((table, inserted));
        }

        // ── Step 3: bulk-load data tables ──
        for table in Table::DATA {
            let rows = legacy.get(&table).cloned().unwrap_or_default();
            let count = rows.len();
            if count > 0 {
                self.store.bulk_insert(table, rows).await?;
            }
            tracing::info!(table = %table, rows = count, "legacy rows loaded");
            summary.loaded.push((table, count));
        }

        Ok(summary)
    }
}

/// Read every legacy collection from the key-value store.
///
/// An absent or unparsable value falls back to an empty collection and
/// is never fatal; I/O errors against the store itself do propagate.
fn read_legacy(kv: &dyn KvStore) -> StoreResult<HashMap<Table, Vec<Value>>> {
    let mut legacy = HashMap::new();
    for table in Table::ALL {
        let rows = match kv.get(table.legacy_key())? {
            None => Vec::new(),
            Some(raw) => parse_rows(table, &raw),
        };
        legacy.insert(table, rows);
    }
    Ok(legacy)
}

fn parse_rows(table: Table, raw: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(rows)) => rows,
        // some legacy collections were keyed objects; keep the values
        Ok(Value::Object(map)) => map.into_iter().map(|(_, v)| v).collect(),
        Ok(_) | Err(_) => {
            tracing::warn!(key = table.legacy_key(), "legacy value unreadable, treated as empty");
            Vec::new()
        }
    }
}

/// Insert `rows` into a reference table, skipping rows whose `name`
/// already exists. Rows without a `name` cannot be deduplicated and are
/// dropped with a warning.
async fn seed_table(store: &dyn TableStore, table: Table, rows: Vec<Value>) -> StoreResult<usize> {
    let existing: HashSet<String> = store
        .read_all(table)
        .await?
        .iter()
        .filter_map(|row| row.get("name").and_then(Value::as_str).map(str::to_string))
        .collect();

    let mut seen = existing.clone();
    let mut fresh = Vec::new();
    for row in rows {
        match row.get("name").and_then(Value::as_str) {
            Some(name) => {
                if seen.insert(name.to_string()) {
                    fresh.push(row);
                }
            }
            None => {
                tracing::warn!(table = %table, "reference row without a name, skipped");
            }
        }
    }

    let inserted = if fresh.is_empty() {
        0
    } else {
        store.bulk_insert(table, fresh).await?
    };
    tracing::info!(table = %table, inserted, existing = existing.len(), "reference table seeded");
    Ok(inserted)
}

/// Built-in reference rows used when the legacy client has none.
fn builtin_defaults(table: Table) -> Vec<Value> {
    fn to_values<T: serde::Serialize>(items: Vec<T>) -> Vec<Value> {
        items
            .into_iter()
            .filter_map(|item| serde_json::to_value(item).ok())
            .collect()
    }

    match table {
        Table::TierTypes => to_values(vec![TierType::new("Client"), TierType::new("Fournisseur")]),
        Table::Families => to_values(vec![
            Family::new("Pain"),
            Family::new("Viennoiserie"),
            Family::new("Pâtisserie"),
            Family::new("Snacking"),
        ]),
        Table::SubFamilies => to_values(vec![
            SubFamily::new("Baguette", "Pain"),
            SubFamily::new("Pain spécial", "Pain"),
            SubFamily::new("Croissant", "Viennoiserie"),
            SubFamily::new("Feuilleté", "Viennoiserie"),
            SubFamily::new("Tarte", "Pâtisserie"),
            SubFamily::new("Entremets", "Pâtisserie"),
        ]),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_seed_twice_inserts_nothing_new() {
        let store = MemoryStore::new();
        let rows = vec![json!({"name": "Pain"}), json!({"name": "Viennoiserie"})];

        assert_eq!(seed_table(&store, Table::Families, rows.clone()).await.unwrap(), 2);
        assert_eq!(seed_table(&store, Table::Families, rows).await.unwrap(), 0);
        assert_eq!(store.read_all(Table::Families).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_seed_dedups_within_one_batch() {
        let store = MemoryStore::new();
        let rows = vec![json!({"name": "Pain"}), json!({"name": "Pain"})];
        assert_eq!(seed_table(&store, Table::Families, rows).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_run_sets_flag_and_skips_after() {
        let kv = Arc::new(MemoryKv::new());
        kv.set("articles", r#"[{"name": "Baguette"}]"#).unwrap();
        let store = Arc::new(MemoryStore::new());
        let mut migrator = Migrator::new(kv.clone(), store.clone());

        let outcome = migrator.run_if_needed().await.unwrap();
        assert!(matches!(outcome, MigrationOutcome::Completed(_)));
        assert_eq!(migrator.state(), &MigrationState::Done);
        assert!(kv.contains(MIGRATION_FLAG_KEY).unwrap());

        let second = migrator.run_if_needed().await.unwrap();
        assert_eq!(second, MigrationOutcome::Skipped);
        assert_eq!(store.read_all(Table::Articles).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparsable_legacy_value_treated_as_empty() {
        let kv = Arc::new(MemoryKv::new());
        kv.set("factures", "{oops").unwrap();
        kv.set("tiers", "42").unwrap();
        let store = Arc::new(MemoryStore::new());
        let mut migrator = Migrator::new(kv, store.clone());

        migrator.run_if_needed().await.unwrap();
        assert!(store.read_all(Table::Invoices).await.unwrap().is_empty());
        assert!(store.read_all(Table::Tiers).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_defaults_seeded_when_legacy_empty() {
        let kv = Arc::new(MemoryKv::new());
        let store = Arc::new(MemoryStore::new());
        let mut migrator = Migrator::new(kv, store.clone());

        migrator.run_if_needed().await.unwrap();

        let families = store.read_all(Table::Families).await.unwrap();
        let names: Vec<&str> = families
            .iter()
            .filter_map(|f| f["name"].as_str())
            .collect();
        assert!(names.contains(&"Pain"));
        assert!(!store.read_all(Table::TierTypes).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_legacy_reference_rows_beat_defaults() {
        let kv = Arc::new(MemoryKv::new());
        kv.set("familles", r#"[{"name": "Gâteaux secs"}]"#).unwrap();
        let store = Arc::new(MemoryStore::new());
        let mut migrator = Migrator::new(kv, store.clone());

        migrator.run_if_needed().await.unwrap();

        let families = store.read_all(Table::Families).await.unwrap();
        assert_eq!(families.len(), 1);
        assert_eq!(families[0]["name"], "Gâteaux secs");
    }

    #[tokio::test]
    async fn test_object_keyed_legacy_collection() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(
            "recettes",
            r#"{"r1": {"name": "Croissants"}, "r2": {"name": "Baguette"}}"#,
        )
        .unwrap();
        let store = Arc::new(MemoryStore::new());
        let mut migrator = Migrator::new(kv, store.clone());

        migrator.run_if_needed().await.unwrap();
        assert_eq!(store.read_all(Table::Recipes).await.unwrap().len(), 2);
    }
}
