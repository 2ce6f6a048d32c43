//! Command-line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fournil - bakery back office: legacy migration, backups, cheque and
/// recipe-sheet printing.
#[derive(Debug, Parser)]
#[command(name = "fournil", version, about)]
pub struct Cli {
    /// Data directory (key-value state, table store, logs)
    #[arg(long, env = "FOURNIL_DATA_DIR", default_value = "fournil-data", global = true)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the one-time legacy migration if it has not run yet
    Migrate {
        /// Clear the completion flag first and rerun the whole sequence
        #[arg(long)]
        reset: bool,
    },

    /// Export every backup table into one JSON document
    Export {
        /// Output file
        #[arg(long, short)]
        out: PathBuf,
    },

    /// Destructively replace the store with a backup document
    Import {
        /// Backup file produced by `export`
        #[arg(long, short)]
        file: PathBuf,

        /// Confirm that wiping the current store is intended
        #[arg(long)]
        yes: bool,
    },

    /// Build (and by default render to PDF) a cheque
    Cheque {
        /// Amount in dirhams, e.g. 1234.56
        #[arg(long)]
        amount: rust_decimal::Decimal,

        /// Payee ("à l'ordre de")
        #[arg(long)]
        payee: String,

        /// Place of issue
        #[arg(long)]
        place: String,

        /// Issue date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<chrono::NaiveDate>,

        #[command(flatten)]
        output: PrintArgs,
    },

    /// Build (and by default render to PDF) a recipe sheet
    Recipe {
        /// Recipe JSON file
        #[arg(long, short)]
        file: PathBuf,

        #[command(flatten)]
        output: PrintArgs,
    },
}

/// Output options shared by the print commands.
#[derive(Debug, clap::Args)]
pub struct PrintArgs {
    /// Write the rendered PDF here (default: derived from the document)
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Print the resolved payload as JSON instead of rendering a PDF
    #[arg(long)]
    pub json: bool,

    /// Layout override file (field name -> {left, top, fontSize})
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Persist the effective layout overrides for the next print
    #[arg(long)]
    pub save_layout: bool,
}
