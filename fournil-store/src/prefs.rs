//! Print-layout calibration cache
//!
//! The last-used field overrides are cached per document kind so the
//! next print starts from the previous manual calibration. Read at
//! open, debounced while the user is nudging fields, written through on
//! explicit save or print.

use shared::layout::{DocumentKind, FieldOverride};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::debounce::{DEFAULT_DEBOUNCE, DebouncedWriter};
use crate::error::StoreResult;
use crate::kv::KvStore;

type Overrides = HashMap<String, FieldOverride>;

/// Calibration overrides for one document kind, persisted in the
/// key-value store under [`DocumentKind::storage_key`].
pub struct CalibrationCache {
    kv: Arc<dyn KvStore>,
    kind: DocumentKind,
    writer: DebouncedWriter,
}

impl CalibrationCache {
    pub fn open(kv: Arc<dyn KvStore>, kind: DocumentKind) -> Self {
        Self::with_debounce(kv, kind, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(kv: Arc<dyn KvStore>, kind: DocumentKind, delay: Duration) -> Self {
        let writer = DebouncedWriter::new(Arc::clone(&kv), kind.storage_key(), delay);
        Self { kv, kind, writer }
    }

    /// Load the cached overrides. A missing or malformed entry is an
    /// empty map, never an error.
    pub fn load(&self) -> Overrides {
        let raw = match self.kv.get(self.kind.storage_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Overrides::new(),
            Err(e) => {
                tracing::warn!(kind = ?self.kind, error = %e, "calibration read failed");
                return Overrides::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(overrides) => overrides,
            Err(e) => {
                tracing::warn!(kind = ?self.kind, error = %e, "calibration entry unreadable, ignored");
                Overrides::new()
            }
        }
    }

    /// Record an in-progress calibration change; written after the quiet
    /// period, superseding any pending change.
    pub fn update(&self, overrides: &Overrides) -> StoreResult<()> {
        self.writer.write(serde_json::to_string(overrides)?);
        Ok(())
    }

    /// Write `overrides` through immediately (explicit save or print),
    /// cancelling any pending debounced write.
    pub fn save(&self, overrides: &Overrides) -> StoreResult<()> {
        self.writer.flush()?;
        self.kv
            .set(self.kind.storage_key(), &serde_json::to_string(overrides)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;

    fn nudge(left: f32) -> Overrides {
        let mut overrides = Overrides::new();
        overrides.insert(
            "amount_words".to_string(),
            FieldOverride {
                left: Some(left),
                ..Default::default()
            },
        );
        overrides
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let kv = Arc::new(MemoryKv::new());
        let cache = CalibrationCache::open(kv.clone(), DocumentKind::Cheque);

        cache.save(&nudge(31.5)).unwrap();

        let reloaded = CalibrationCache::open(kv, DocumentKind::Cheque).load();
        assert_eq!(reloaded["amount_words"].left, Some(31.5));
        assert_eq!(reloaded["amount_words"].top, None);
    }

    #[tokio::test]
    async fn test_kinds_do_not_collide() {
        let kv = Arc::new(MemoryKv::new());
        CalibrationCache::open(kv.clone(), DocumentKind::Cheque)
            .save(&nudge(1.0))
            .unwrap();

        let recipe = CalibrationCache::open(kv, DocumentKind::RecipeSheet);
        assert!(recipe.load().is_empty());
    }

    #[tokio::test]
    async fn test_updates_debounce_to_one_write() {
        let kv = Arc::new(MemoryKv::new());
        let cache =
            CalibrationCache::with_debounce(kv.clone(), DocumentKind::Cheque, Duration::from_millis(50));

        cache.update(&nudge(1.0)).unwrap();
        cache.update(&nudge(2.0)).unwrap();
        cache.update(&nudge(3.0)).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(kv.writes(), 1);
        assert_eq!(cache.load()["amount_words"].left, Some(3.0));
    }

    #[tokio::test]
    async fn test_malformed_entry_ignored() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(DocumentKind::Cheque.storage_key(), "{broken").unwrap();

        let cache = CalibrationCache::open(kv, DocumentKind::Cheque);
        assert!(cache.load().is_empty());
    }
}
