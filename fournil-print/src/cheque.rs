//! Cheque print payload
//!
//! Maps a cheque record plus optional per-field calibration to placed
//! text fields on the 175×80 mm cheque page. Positions default to the
//! built-in template and can be nudged field by field once a bank's
//! pre-printed stock is measured.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use shared::layout::{CHEQUE_PAGE, FieldOverride, FieldPosition, PlacedText, PrintDocument};
use std::collections::HashMap;

use crate::text::wrap_text;
use crate::words::{amount_to_words, group_digits};

/// Maximum characters per amount-in-words line.
pub const CHEQUE_WORDS_WIDTH: usize = 45;

/// Cheque record to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChequeData {
    pub amount: Decimal,
    /// Payee ("à l'ordre de")
    pub payee: String,
    /// Place of issue
    pub place: String,
    /// Issue date; `None` prints today's date at build time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Cheque fields and their built-in default placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChequeField {
    AmountWords,
    AmountWordsCont,
    AmountDigits,
    Payee,
    Place,
    Date,
}

impl ChequeField {
    pub const ALL: [ChequeField; 6] = [
        ChequeField::AmountWords,
        ChequeField::AmountWordsCont,
        ChequeField::AmountDigits,
        ChequeField::Payee,
        ChequeField::Place,
        ChequeField::Date,
    ];

    /// Semantic key, also the key in persisted calibration maps.
    pub fn key(&self) -> &'static str {
        match self {
            ChequeField::AmountWords => "amount_words",
            ChequeField::AmountWordsCont => "amount_words_cont",
            ChequeField::AmountDigits => "amount_digits",
            ChequeField::Payee => "payee",
            ChequeField::Place => "place",
            ChequeField::Date => "date",
        }
    }

    /// Built-in placement on the 175×80 mm page.
    pub fn default_position(&self) -> FieldPosition {
        match self {
            ChequeField::AmountWords => FieldPosition::new(28.0, 22.0, 10.0),
            ChequeField::AmountWordsCont => FieldPosition::new(12.0, 28.0, 10.0),
            ChequeField::AmountDigits => FieldPosition::new(132.0, 14.0, 11.0),
            ChequeField::Payee => FieldPosition::new(22.0, 35.0, 10.0),
            ChequeField::Place => FieldPosition::new(96.0, 44.0, 10.0),
            ChequeField::Date => FieldPosition::new(134.0, 44.0, 10.0),
        }
    }
}

/// Format a monetary amount as grouped digits with two decimals, French
/// style: comma decimal separator, thousands separated with a no-break
/// space so the text run never splits in the rendering target.
pub fn format_amount(amount: Decimal) -> String {
    let amount = amount
        .max(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = amount.to_string();
    let (int_digits, frac) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (s, "00".to_string()),
    };
    format!("{},{}", group_digits(&int_digits), frac)
}

/// Build the print payload for one cheque.
///
/// `overrides` is the calibration map keyed by [`ChequeField::key`];
/// omitted fields and omitted sub-fields keep their built-in defaults.
/// Output is deterministic for identical input as long as `date` is
/// supplied.
pub fn build_cheque(
    data: &ChequeData,
    overrides: &HashMap<String, FieldOverride>,
) -> PrintDocument {
    let resolve = |field: ChequeField| {
        let default = field.default_position();
        match overrides.get(field.key()) {
            Some(ov) => default.with_override(ov),
            None => default,
        }
    };
    let place = |field: ChequeField, text: String| PlacedText {
        field: field.key().to_string(),
        text,
        position: resolve(field),
    };

    let words = amount_to_words(data.amount);
    let mut lines = wrap_text(&words, CHEQUE_WORDS_WIDTH);
    let first_line = if lines.is_empty() {
        String::new()
    } else {
        lines.remove(0)
    };
    let date = data
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    tracing::debug!(amount = %data.amount, payee = %data.payee, "building cheque payload");

    let mut texts = vec![place(ChequeField::AmountWords, first_line)];
    if !lines.is_empty() {
        texts.push(place(ChequeField::AmountWordsCont, lines.join(" ")));
    }
    texts.push(place(ChequeField::AmountDigits, format_amount(data.amount)));
    texts.push(place(ChequeField::Payee, data.payee.clone()));
    texts.push(place(ChequeField::Place, data.place.clone()));
    texts.push(place(ChequeField::Date, date.format("%d/%m/%Y").to_string()));

    PrintDocument {
        title: format!("Chèque {}", data.payee),
        page: CHEQUE_PAGE,
        texts,
    }
}
