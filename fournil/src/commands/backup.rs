//! Backup export / import commands

use anyhow::{Result, bail};
use fournil_store::backup::{export_bundle, import_bundle};
use serde_json::Value;
use std::path::Path;

pub async fn export(data_dir: &Path, out: &Path) -> Result<()> {
    let store = super::open_store(data_dir)?;
    let bundle = export_bundle(store.as_ref()).await?;
    std::fs::write(out, serde_json::to_string_pretty(&bundle)?)?;
    println!("Backup written to {}", out.display());
    Ok(())
}

pub async fn import(data_dir: &Path, file: &Path, yes: bool) -> Result<()> {
    if !yes {
        bail!("import wipes the current store and cannot be undone; rerun with --yes to confirm");
    }
    let bundle: Value = serde_json::from_str(&std::fs::read_to_string(file)?)?;
    let store = super::open_store(data_dir)?;
    let summary = import_bundle(store.as_ref(), &bundle).await?;
    println!(
        "Imported {} rows across {} tables from {}",
        summary.rows,
        summary.tables,
        file.display()
    );
    Ok(())
}
