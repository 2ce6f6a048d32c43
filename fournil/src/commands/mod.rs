//! Command handlers

pub mod backup;
pub mod migrate;
pub mod print;

use fournil_store::{FileKv, JsonStore, StoreResult};
use std::path::Path;
use std::sync::Arc;

/// Open the key-value state file (the legacy local-storage analogue).
pub fn open_kv(data_dir: &Path) -> StoreResult<Arc<FileKv>> {
    Ok(Arc::new(FileKv::open(data_dir.join("local_storage.json"))?))
}

/// Open the table store.
pub fn open_store(data_dir: &Path) -> StoreResult<Arc<JsonStore>> {
    Ok(Arc::new(JsonStore::open(data_dir.join("store.json"))?))
}
