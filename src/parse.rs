//! Cell-level parsing shared by the loader and the type inferencer.
//!
//! Numbers are parsed through a [`NumberParser`] so that callers can swap in
//! their own implementation (or a test double). The default,
//! [`PreciseParser`], is correctly rounded: `0.99988` parses to exactly the
//! float closest to `0.99988`.

use crate::{Number, Value};

/// Parses numeric cell text.
///
/// Implementations must return `None` for text that is not a number. Missing
/// value tokens (`nan`, `NA`, empty cells) are recognized before the parser
/// is consulted and never reach it.
///
/// # Examples
///
/// ```rust
/// use ndcsv::{NumberParser, PreciseParser, Number};
///
/// let p = PreciseParser;
/// assert_eq!(p.parse_int("003"), Some(3));
/// assert_eq!(p.parse_float("0.99988"), Some(0.99988));
/// assert_eq!(p.parse_number("1e3"), Some(Number::Float(1000.0)));
/// assert_eq!(p.parse_number("S001"), None);
/// ```
pub trait NumberParser {
    /// Parses an integer.
    fn parse_int(&self, text: &str) -> Option<i64>;

    /// Parses a float.
    fn parse_float(&self, text: &str) -> Option<f64>;

    /// Parses an integer if possible, a float otherwise.
    fn parse_number(&self, text: &str) -> Option<Number> {
        self.parse_int(text)
            .map(Number::Integer)
            .or_else(|| self.parse_float(text).map(Number::Float))
    }
}

impl<P: NumberParser + ?Sized> NumberParser for &P {
    fn parse_int(&self, text: &str) -> Option<i64> {
        (**self).parse_int(text)
    }

    fn parse_float(&self, text: &str) -> Option<f64> {
        (**self).parse_float(text)
    }
}

/// Correctly rounded decimal parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreciseParser;

impl NumberParser for PreciseParser {
    fn parse_int(&self, text: &str) -> Option<i64> {
        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        text.parse().ok()
    }

    fn parse_float(&self, text: &str) -> Option<f64> {
        let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
        let lower = unsigned.to_ascii_lowercase();
        if lower == "inf" || lower == "infinity" {
            return text.parse().ok();
        }
        let well_formed = unsigned.bytes().any(|b| b.is_ascii_digit())
            && unsigned
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
        if !well_formed {
            return None;
        }
        text.parse().ok()
    }
}

const NA_TOKENS: &[&str] = &[
    "", "nan", "NaN", "-nan", "-NaN", "NA", "N/A", "n/a", "NULL", "null", "None", "<NA>", "#N/A",
];

/// Returns `true` for the tokens read as a missing value.
pub(crate) fn is_na(text: &str) -> bool {
    NA_TOKENS.contains(&text)
}

/// The boolean spellings recognized in data cells.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

/// Guesses the type of a whole column of cells.
///
/// - all integers, none missing: integers
/// - all numbers or missing: floats
/// - all booleans or missing: booleans
/// - otherwise: strings, with NaN for missing cells
pub(crate) fn guess_column<P: NumberParser>(cells: &[&str], parser: &P) -> Vec<Value> {
    if !cells.is_empty() {
        let ints: Option<Vec<i64>> = cells.iter().map(|c| parser.parse_int(c)).collect();
        if let Some(ints) = ints {
            return ints.into_iter().map(Value::from).collect();
        }
    }

    let floats: Option<Vec<f64>> = cells
        .iter()
        .map(|c| {
            if is_na(c) {
                Some(f64::NAN)
            } else {
                parser.parse_float(c)
            }
        })
        .collect();
    if let Some(floats) = floats {
        return floats.into_iter().map(Value::from).collect();
    }

    let bools: Option<Vec<Value>> = cells
        .iter()
        .map(|c| {
            if is_na(c) {
                Some(Value::nan())
            } else {
                parse_bool(c).map(Value::from)
            }
        })
        .collect();
    if let Some(bools) = bools {
        return bools;
    }

    cells
        .iter()
        .map(|c| if is_na(c) { Value::nan() } else { Value::from(*c) })
        .collect()
}

/// Parses a lone cell with the column rules.
pub(crate) fn guess_cell<P: NumberParser>(text: &str, parser: &P) -> Value {
    guess_column(&[text], parser)
        .pop()
        .unwrap_or_else(Value::nan)
}

/// Promotes integers to floats when every cell is numeric and at least one
/// is a float.
pub(crate) fn unify_numeric(cells: &mut [Value]) {
    let all_numeric = cells.iter().all(Value::is_number);
    let any_float = cells
        .iter()
        .any(|v| matches!(v, Value::Number(Number::Float(_))));
    if all_numeric && any_float {
        for cell in cells.iter_mut() {
            if let Value::Number(Number::Integer(i)) = cell {
                *cell = Value::from(*i as f64);
            }
        }
    }
}
