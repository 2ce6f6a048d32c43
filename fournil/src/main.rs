//! Fournil - bakery back office CLI
//!
//! Wires the suite together: startup migration, backup export/import,
//! cheque and recipe-sheet printing.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Command};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

fn init_tracing(data_dir: &Path) -> Result<WorkerGuard> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "fournil.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_writer(non_blocking_file);

    let stdout_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.data_dir)?;
    let _guard = init_tracing(&cli.data_dir)?;
    tracing::debug!(data_dir = %cli.data_dir.display(), "fournil starting");

    match cli.command {
        Command::Migrate { reset } => commands::migrate::run(&cli.data_dir, reset).await,
        Command::Export { out } => commands::backup::export(&cli.data_dir, &out).await,
        Command::Import { file, yes } => commands::backup::import(&cli.data_dir, &file, yes).await,
        Command::Cheque {
            amount,
            payee,
            place,
            date,
            output,
        } => commands::print::cheque(&cli.data_dir, amount, payee, place, date, &output),
        Command::Recipe { file, output } => commands::print::recipe(&cli.data_dir, &file, &output),
    }
}
