//! French amount-in-words conversion for printed cheques
//!
//! Follows banking orthography as the legacy cheque layouts expect it,
//! including the irregular tens: "-et-un" at 21/31/41/51/61 and
//! "soixante-et-onze" at 71, but plain "-un"/"-onze" at 81 and 91;
//! "quatre-vingts" takes its plural s only when nothing follows.
//! Do not regularize these.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Spelled-out forms stop at millions; anything from a billion up is
/// printed as grouped digits instead.
const SPELLED_LIMIT: u64 = 1_000_000_000;

const UNITS: [&str; 17] = [
    "zéro", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix", "onze",
    "douze", "treize", "quatorze", "quinze", "seize",
];

const TENS: [&str; 5] = ["vingt", "trente", "quarante", "cinquante", "soixante"];

/// Convert a monetary amount to its French wording:
/// `"<integer part> dirham(s) [et <centimes> centime(s)]"`.
///
/// Pure and total for any non-negative `Decimal`; negative amounts are
/// clamped to zero (a cheque amount is never negative). The fractional
/// part is rounded to whole centimes; a carry to 100 centimes rolls into
/// the integer part.
///
/// # Examples
///
/// ```
/// use fournil_print::amount_to_words;
/// use rust_decimal::Decimal;
///
/// assert_eq!(amount_to_words(Decimal::ZERO), "zéro dirham");
/// assert_eq!(
///     amount_to_words(Decimal::new(123456, 2)),
///     "mille deux cent trente-quatre dirhams et cinquante-six centimes"
/// );
/// ```
pub fn amount_to_words(amount: Decimal) -> String {
    let amount = amount.max(Decimal::ZERO);
    let mut int_part = amount.trunc();
    let mut cents = ((amount - int_part) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0);
    if cents >= 100 {
        int_part += Decimal::ONE;
        cents = 0;
    }

    let (int_words, plural) = match int_part.to_u64() {
        Some(n) => (integer_to_words(n), n > 1),
        // Beyond u64 range: digits only, necessarily plural
        None => (group_digits(&int_part.normalize().to_string()), true),
    };

    let mut out = format!("{int_words} {}", if plural { "dirhams" } else { "dirham" });
    if cents > 0 {
        out.push_str(" et ");
        out.push_str(&integer_to_words(cents));
        out.push_str(if cents > 1 { " centimes" } else { " centime" });
    }
    out
}

/// Spell out a non-negative integer in French.
///
/// Amounts of a billion or more come back as grouped digits.
pub fn integer_to_words(n: u64) -> String {
    if n >= SPELLED_LIMIT {
        return group_digits(&n.to_string());
    }
    if n < 1_000 {
        return under_thousand(n);
    }
    if n < 1_000_000 {
        let thousands = n / 1_000;
        let rest = n % 1_000;
        let head = if thousands == 1 {
            // "mille", never "un mille"
            "mille".to_string()
        } else {
            format!("{} mille", under_thousand(thousands))
        };
        return if rest == 0 {
            head
        } else {
            format!("{head} {}", under_thousand(rest))
        };
    }
    let millions = n / 1_000_000;
    let rest = n % 1_000_000;
    let head = if millions == 1 {
        "un million".to_string()
    } else {
        format!("{} millions", under_thousand(millions))
    };
    if rest == 0 {
        head
    } else {
        format!("{head} {}", integer_to_words(rest))
    }
}

fn under_twenty(n: u64) -> String {
    if n <= 16 {
        UNITS[n as usize].to_string()
    } else {
        format!("dix-{}", UNITS[(n - 10) as usize])
    }
}

fn under_hundred(n: u64) -> String {
    if n < 20 {
        return under_twenty(n);
    }
    let tens = n / 10;
    let unit = n % 10;
    match tens {
        2..=6 => {
            let base = TENS[(tens - 2) as usize];
            if unit == 0 {
                base.to_string()
            } else if unit == 1 {
                format!("{base}-et-un")
            } else {
                format!("{base}-{}", UNITS[unit as usize])
            }
        }
        // 70s build on soixante + teens
        7 => {
            if n == 71 {
                "soixante-et-onze".to_string()
            } else {
                format!("soixante-{}", under_twenty(n - 60))
            }
        }
        // plural s exactly at 80, plain "-un" at 81 (no "et")
        8 => {
            if n == 80 {
                "quatre-vingts".to_string()
            } else {
                format!("quatre-vingt-{}", UNITS[unit as usize])
            }
        }
        // 90s build on quatre-vingt + teens, never pluralized
        _ => format!("quatre-vingt-{}", under_twenty(n - 80)),
    }
}

fn under_thousand(n: u64) -> String {
    if n < 100 {
        return under_hundred(n);
    }
    let hundreds = n / 100;
    let rest = n % 100;
    let head = if hundreds == 1 {
        "cent".to_string()
    } else if rest == 0 {
        format!("{} cents", UNITS[hundreds as usize])
    } else {
        format!("{} cent", UNITS[hundreds as usize])
    };
    if rest == 0 {
        head
    } else {
        format!("{head} {}", under_hundred(rest))
    }
}

/// Insert a no-break space between thousands groups of a digit string.
pub(crate) fn group_digits(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        let remaining = chars.len() - i;
        if i > 0 && remaining % 3 == 0 {
            out.push('\u{00A0}');
        }
        out.push(*c);
    }
    out
}
