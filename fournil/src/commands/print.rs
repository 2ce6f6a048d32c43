//! Cheque and recipe-sheet print commands

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fournil_print::{ChequeData, build_cheque, build_recipe_sheet, render_pdf};
use fournil_store::CalibrationCache;
use rust_decimal::Decimal;
use serde_json::from_str;
use shared::layout::{DocumentKind, FieldOverride, PrintDocument};
use shared::models::Recipe;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::PrintArgs;

type Overrides = HashMap<String, FieldOverride>;

pub fn cheque(
    data_dir: &Path,
    amount: Decimal,
    payee: String,
    place: String,
    date: Option<NaiveDate>,
    args: &PrintArgs,
) -> Result<()> {
    let cache = CalibrationCache::open(super::open_kv(data_dir)?, DocumentKind::Cheque);
    let overrides = effective_overrides(&cache, args)?;
    let data = ChequeData {
        amount,
        payee,
        place,
        date,
    };
    let payload = build_cheque(&data, &overrides);
    emit(&payload, &overrides, &cache, args, "cheque.pdf")
}

pub fn recipe(data_dir: &Path, file: &Path, args: &PrintArgs) -> Result<()> {
    let recipe: Recipe = from_str(&std::fs::read_to_string(file)?)
        .with_context(|| format!("reading recipe {}", file.display()))?;
    let cache = CalibrationCache::open(super::open_kv(data_dir)?, DocumentKind::RecipeSheet);
    let overrides = effective_overrides(&cache, args)?;
    let payload = build_recipe_sheet(&recipe, &overrides);
    emit(&payload, &overrides, &cache, args, "fiche-recette.pdf")
}

/// Last-used calibration, with any override file applied on top
/// (per-field replacement, as the calibration UI would).
fn effective_overrides(cache: &CalibrationCache, args: &PrintArgs) -> Result<Overrides> {
    let mut overrides = cache.load();
    if let Some(path) = &args.layout {
        let from_file: Overrides = from_str(&std::fs::read_to_string(path)?)
            .with_context(|| format!("reading layout overrides {}", path.display()))?;
        overrides.extend(from_file);
    }
    Ok(overrides)
}

fn emit(
    payload: &PrintDocument,
    overrides: &Overrides,
    cache: &CalibrationCache,
    args: &PrintArgs,
    default_out: &str,
) -> Result<()> {
    if args.json {
        if args.save_layout {
            cache.save(overrides)?;
        }
        println!("{}", serde_json::to_string_pretty(payload)?);
        return Ok(());
    }

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_out));
    let bytes = render_pdf(payload)?;
    std::fs::write(&out, bytes)?;
    // printing makes the effective calibration the new default
    cache.save(overrides)?;
    println!("Wrote {}", out.display());
    Ok(())
}
