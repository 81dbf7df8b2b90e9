//! Coordinate type inference.
//!
//! Every coordinate made only of strings goes through three all-or-nothing
//! conversions, in order: dates, numbers, booleans. A conversion applies only
//! if every element converts; otherwise the labels are left untouched and the
//! next one is tried.
//!
//! Dates come first so that `01/02/2018` is never half-read as a number.
//! Ambiguous dates are read day first.

use crate::parse::NumberParser;
use crate::{Coordinate, LabeledArray, Labels, Result, Value};
use chrono::{NaiveDate, NaiveDateTime};
use log::trace;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    // month first, only reached when the day-first reading is impossible
    "%m/%d/%Y",
    "%m-%d-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parses one date string, day first.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDateTime> {
    // plain digit runs are ids or numbers, never dates
    if text.is_empty() || text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        })
}

fn as_strings(values: &[Value]) -> Option<Vec<&str>> {
    values.iter().map(Value::as_str).collect()
}

fn try_dates(values: Vec<Value>) -> Vec<Value> {
    let Some(strings) = as_strings(&values) else {
        return values;
    };
    let dates: Option<Vec<Value>> = strings
        .iter()
        .map(|s| parse_date(s).map(Value::Date))
        .collect();
    dates.unwrap_or(values)
}

fn try_numbers<P: NumberParser>(values: Vec<Value>, parser: &P) -> Vec<Value> {
    let Some(strings) = as_strings(&values) else {
        return values;
    };
    let ints: Option<Vec<Value>> = strings
        .iter()
        .map(|s| parser.parse_int(s).map(Value::from))
        .collect();
    if let Some(ints) = ints {
        return ints;
    }
    let numbers: Option<Vec<Value>> = strings
        .iter()
        .map(|s| parser.parse_number(s).map(|n| Value::from(n.as_f64())))
        .collect();
    numbers.unwrap_or(values)
}

fn try_bools(values: Vec<Value>) -> Vec<Value> {
    let Some(strings) = as_strings(&values) else {
        return values;
    };
    let bools: Option<Vec<Value>> = strings
        .iter()
        .map(|s| match s.to_uppercase().as_str() {
            "T" | "Y" | "YES" | "TRUE" => Some(Value::Bool(true)),
            "F" | "N" | "NO" | "FALSE" => Some(Value::Bool(false)),
            _ => None,
        })
        .collect();
    bools.unwrap_or(values)
}

/// Converts a sequence of labels to dates, numbers or booleans if every
/// element allows it.
///
/// Sequences that are empty or not made only of strings are returned as is.
pub(crate) fn infer_labels<P: NumberParser>(values: Vec<Value>, parser: &P) -> Vec<Value> {
    if values.is_empty() {
        return values;
    }
    let values = try_dates(values);
    let values = try_numbers(values, parser);
    try_bools(values)
}

/// Runs inference on every coordinate of `array`.
///
/// Composite indexes are first split into one plain coordinate per level.
pub(crate) fn infer_coords<P: NumberParser>(
    mut array: LabeledArray,
    parser: &P,
) -> Result<LabeledArray> {
    for dim in array.dims().to_vec() {
        array.reset_index(&dim)?;
    }
    let names: Vec<String> = array.coords().keys().cloned().collect();
    for name in names {
        let Some(coord) = array.coord(&name) else {
            continue;
        };
        let Labels::Plain(values) = coord.labels() else {
            continue;
        };
        let dims = coord.dims().to_vec();
        let inferred = infer_labels(values.clone(), parser);
        trace!(
            "coordinate '{}' inferred as {:?}",
            name,
            inferred.first().map(Value::kind)
        );
        array.insert_coord(&name, Coordinate::new(dims, Labels::Plain(inferred)));
    }
    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::PreciseParser;
    use crate::values;

    fn infer(values: Vec<Value>) -> Vec<Value> {
        infer_labels(values, &PreciseParser)
    }

    #[test]
    fn test_dates_day_first() {
        let v = infer(values!["10/11/2017", "01/02/2018", "12/12/2018"]);
        assert_eq!(v[0], Value::date(2017, 11, 10).unwrap());
        assert_eq!(v[1], Value::date(2018, 2, 1).unwrap());
    }

    #[test]
    fn test_date_formats() {
        let expected = vec![
            Value::date(2017, 11, 13).unwrap(),
            Value::date(2017, 11, 14).unwrap(),
        ];
        for pair in [
            ["2017-11-13", "2017-11-14"],
            ["13/11/2017", "14/11/2017"],
            ["11/13/2017", "11/14/2017"],
            ["13 Nov 2017", "14 Nov 2017"],
        ] {
            assert_eq!(infer(values![(pair[0]), (pair[1])]), expected, "{:?}", pair);
        }
    }

    #[test]
    fn test_numbers_all_or_nothing() {
        assert_eq!(infer(values!["01", "02"]), values![1, 2]);
        assert_eq!(infer(values!["1", "2.5"]), values![1.0, 2.5]);
        assert_eq!(infer(values!["01", "02", "S1"]), values!["01", "02", "S1"]);
    }

    #[test]
    fn test_bools() {
        assert_eq!(
            infer(values!["y", "No", "TRUE", "f"]),
            values![true, false, true, false]
        );
        assert_eq!(infer(values!["y", "maybe"]), values!["y", "maybe"]);
    }

    #[test]
    fn test_non_strings_untouched() {
        assert_eq!(infer(values![1, 2]), values![1, 2]);
        assert_eq!(infer(values!["1", nan]), values!["1", nan]);
    }

    #[test]
    fn test_digits_are_not_dates() {
        assert!(parse_date("20171113").is_none());
        assert!(parse_date("S001").is_none());
        assert!(parse_date("2018-02-01 10:30:00").is_some());
    }
}
