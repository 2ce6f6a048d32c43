//! # fournil-print
//!
//! Cheque and recipe-sheet document building.
//!
//! ## Scope
//!
//! This crate decides WHAT lands WHERE on the page:
//! - French amount-in-words conversion
//! - Cheque payload building (175×80 mm)
//! - Recipe sheet payload building (A4)
//! - Default field placement + per-field calibration overrides
//! - PDF rendering of payloads (optional `pdf` feature)
//!
//! Persistence of calibration overrides lives in `fournil-store`; the
//! builders here only consume an already-loaded override map.
//!
//! ## Example
//!
//! ```ignore
//! use fournil_print::{build_cheque, ChequeData};
//! use rust_decimal::Decimal;
//! use std::collections::HashMap;
//!
//! let cheque = ChequeData {
//!     amount: Decimal::new(123456, 2),
//!     payee: "Minoterie du Nord".into(),
//!     place: "Casablanca".into(),
//!     date: None,
//! };
//! let payload = build_cheque(&cheque, &HashMap::new());
//! let pdf = fournil_print::render_pdf(&payload)?;
//! ```

mod cheque;
mod error;
mod recipe;
mod text;
mod words;

#[cfg(feature = "pdf")]
mod pdf;

// Re-exports
pub use cheque::{ChequeData, ChequeField, build_cheque, format_amount};
pub use error::{PrintError, PrintResult};
pub use recipe::{RecipeField, build_recipe_sheet};
pub use words::amount_to_words;

#[cfg(feature = "pdf")]
pub use pdf::render_pdf;
