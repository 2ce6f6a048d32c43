//! # fournil-store
//!
//! Local persistence for the Fournil suite.
//!
//! ## Scope
//!
//! - Key-value state (`KvStore`): the local-storage analogue, file-backed
//!   with an in-memory fake for tests
//! - Trailing-debounce write-behind for key-value state
//! - Structured table store (`TableStore`): read-all, bulk-insert,
//!   delete-all, reopen; the only four primitives the suite consumes
//! - Print-layout calibration cache
//! - Backup bundle export / destructive import
//! - One-time legacy migration with an explicit state machine

pub mod backup;
mod debounce;
mod error;
mod kv;
mod migration;
mod prefs;
mod store;

// Re-exports
pub use debounce::{DEFAULT_DEBOUNCE, DebouncedWriter};
pub use error::{StoreError, StoreResult};
pub use kv::{FileKv, KvStore, MemoryKv};
pub use migration::{
    MIGRATION_FLAG_KEY, MigrationOutcome, MigrationState, MigrationSummary, Migrator,
};
pub use prefs::CalibrationCache;
pub use store::{JsonStore, MemoryStore, TableStore};
