//! Legacy migration command

use anyhow::Result;
use fournil_store::{MigrationOutcome, Migrator};
use std::path::Path;

pub async fn run(data_dir: &Path, reset: bool) -> Result<()> {
    let kv = super::open_kv(data_dir)?;
    let store = super::open_store(data_dir)?;
    let mut migrator = Migrator::new(kv, store);

    if reset {
        migrator.reset()?;
        tracing::info!("migration flag cleared, rerunning");
    }

    match migrator.run_if_needed().await? {
        MigrationOutcome::Skipped => {
            println!("Migration already completed, nothing to do.");
        }
        MigrationOutcome::Completed(summary) => {
            for (table, inserted) in &summary.seeded {
                println!("seeded {table}: {inserted} rows");
            }
            for (table, loaded) in &summary.loaded {
                println!("loaded {table}: {loaded} rows");
            }
            println!("Migration completed.");
        }
    }
    Ok(())
}
