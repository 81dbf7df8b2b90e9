//! NDCSV encoding.
//!
//! This module provides the [`Encoder`] that renders arrays and tables as
//! NDCSV text.
//!
//! ## Overview
//!
//! An N-D array goes through four steps before it is written:
//!
//! - **Auxiliary folding**: coordinates that are not the index of their
//!   dimension are renamed `name (dim)`, so they survive as extra key columns
//! - **Flattening**: with more than two dimensions, every dimension after
//!   the first is stacked onto the columns
//! - **Composite keys**: each axis carrying several coordinates gets a
//!   composite index over all of them
//! - **Serialization**: the resulting 1-D or 2-D table is validated and
//!   written out
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use ndcsv::{to_string, values, LabeledArray};
//!
//! let a = LabeledArray::from_vec("x", values![1, 2])
//!     .with_coord("x", values![10, 20]).unwrap()
//!     .with_aux_coord("y", "x", values![30, 40]).unwrap();
//! assert_eq!(to_string(&a).unwrap(), "x,y (x),\n10,30,1\n20,40,2\n");
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use ndcsv::{Encoder, LabeledArray};
//!
//! let mut encoder = Encoder::new();
//! encoder.encode(&LabeledArray::scalar(1)).unwrap();
//! assert_eq!(encoder.into_inner(), "1\n");
//! ```

use crate::error::LabelDefect;
use crate::unstack::proper_unstack;
use crate::{DataFrame, Error, LabeledArray, Labels, Result, Series, TableIndex, Value};
use log::debug;

/// Name of the synthetic axis that dimensions beyond the first are stacked on.
const COLUMNS_DIM: &str = "__columns__";

/// Anything that can be written as NDCSV.
#[derive(Clone, Copy, Debug)]
pub enum Encodable<'a> {
    Array(&'a LabeledArray),
    Series(&'a Series),
    Frame(&'a DataFrame),
}

impl<'a> From<&'a LabeledArray> for Encodable<'a> {
    fn from(array: &'a LabeledArray) -> Self {
        Encodable::Array(array)
    }
}

impl<'a> From<&'a Series> for Encodable<'a> {
    fn from(series: &'a Series) -> Self {
        Encodable::Series(series)
    }
}

impl<'a> From<&'a DataFrame> for Encodable<'a> {
    fn from(frame: &'a DataFrame) -> Self {
        Encodable::Frame(frame)
    }
}

/// The NDCSV encoder.
///
/// Accumulates text in memory; nothing is appended unless a whole document
/// was rendered successfully.
#[derive(Debug, Default)]
pub struct Encoder {
    output: String,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            output: String::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Renders `input` and appends it to the output.
    pub fn encode<'a>(&mut self, input: impl Into<Encodable<'a>>) -> Result<()> {
        let text = match input.into() {
            Encodable::Array(array) => encode_array(array)?,
            Encodable::Series(series) => write_series(series)?,
            Encodable::Frame(frame) => write_frame(frame)?,
        };
        self.output.push_str(&text);
        Ok(())
    }
}

fn encode_array(array: &LabeledArray) -> Result<String> {
    if array.ndim() == 0 {
        return write_scalar(&array.data()[0]);
    }
    let array = fold_aux_coords(array)?;
    let array = flatten_dims(array)?;
    let array = build_composite_indexes(array)?;
    match array.ndim() {
        1 => write_series(&Series::try_from(&array)?),
        _ => write_frame(&DataFrame::try_from(&array)?),
    }
}

/// Renames auxiliary coordinates of plain axes to `name (dim)`.
///
/// Scalar coordinates are dropped; coordinates spanning several dimensions
/// are rejected.
fn fold_aux_coords(array: &LabeledArray) -> Result<LabeledArray> {
    let mut out = array.clone();
    for (name, coord) in array.coords() {
        match coord.dims() {
            [] => {
                out.remove_coord(name);
            }
            [dim] if dim != name => {
                if !matches!(array.index(dim), Some(Labels::Composite(_))) {
                    out.rename_coord(name, &format!("{} ({})", name, dim))?;
                }
            }
            [_] => {}
            _ => return Err(Error::unsupported_shape(name)),
        }
    }
    Ok(out)
}

/// Stacks every dimension after the first onto one column axis.
fn flatten_dims(mut array: LabeledArray) -> Result<LabeledArray> {
    if array.ndim() <= 2 {
        return Ok(array);
    }
    for dim in array.dims()[1..].to_vec() {
        if matches!(array.index(&dim), Some(Labels::Composite(_))) {
            array = proper_unstack(&array, &dim)?;
        }
    }
    let stacked: Vec<String> = array.dims()[1..].to_vec();
    let stacked: Vec<&str> = stacked.iter().map(String::as_str).collect();
    debug!("stacking {:?} onto the columns", stacked);
    array.stack(COLUMNS_DIM, &stacked)
}

/// Gives every axis a single index: existing composite indexes are split
/// and rebuilt over all coordinates of the axis, axes without an index get
/// `0..n`.
fn build_composite_indexes(mut array: LabeledArray) -> Result<LabeledArray> {
    for dim in array.dims().to_vec() {
        let mut from_composite = false;
        match array.index(&dim) {
            Some(Labels::Composite(_)) => {
                array.reset_index(&dim)?;
                from_composite = true;
            }
            Some(Labels::Plain(_)) => {}
            None => {
                let size = array.shape()[array.axis(&dim).unwrap_or_default()];
                array = array.with_coord(&dim, (0..size).map(Value::from).collect::<Vec<_>>())?;
            }
        }
        let along: Vec<String> = array
            .coords_along(&dim)
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect();
        if along != [dim.as_str()] {
            let name = if from_composite {
                dim.clone()
            } else {
                format!("{}_mindex", dim)
            };
            debug!("axis {}: composite key over {:?}", dim, along);
            array.set_index(&dim, &along, &name)?;
        }
    }
    Ok(array)
}

/// Rejects labels that would not read back: empty strings and NaN.
fn check_labels(index: &TableIndex) -> Result<()> {
    match index {
        TableIndex::Plain { labels, .. } => {
            if labels.iter().any(|v| v.as_str() == Some("")) {
                return Err(Error::InvalidLabel(LabelDefect::Empty));
            }
            if labels.iter().any(Value::is_missing) {
                return Err(Error::InvalidLabel(LabelDefect::Missing));
            }
        }
        TableIndex::Composite(mi) => {
            for level in 0..mi.nlevels() {
                let labels = mi.level_values(level);
                if labels.iter().any(Value::is_missing) {
                    return Err(Error::InvalidLabel(LabelDefect::Missing));
                }
                if labels.iter().any(|v| v.as_str() == Some("")) {
                    return Err(Error::InvalidLabel(LabelDefect::Empty));
                }
            }
        }
    }
    Ok(())
}

/// A lone empty string is written as `nan` like a leading empty 1-D cell.
fn write_scalar(value: &Value) -> Result<String> {
    let cell = match value {
        Value::String(s) if s.is_empty() => "nan".to_string(),
        v => v.to_string(),
    };
    let mut writer = csv_writer();
    writer.write_record([cell])?;
    finish(writer)
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::io(&e.error().to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))
}

fn write_series(series: &Series) -> Result<String> {
    check_labels(series.index())?;
    let values = series.values();

    // a blank first cell would make the header look like a 2-D table
    let (first, na_rep) = match values.first() {
        Some(Value::String(s)) if s.is_empty() => (Some("nan".to_string()), "nan"),
        Some(v) if v.is_missing() => (None, "nan"),
        _ => (None, ""),
    };
    debug!("writing 1-D table of {} rows", values.len());

    let mut writer = csv_writer();
    let mut header = series.index().names_or("dim_0");
    header.push(String::new());
    writer.write_record(&header)?;

    for (row, value) in values.iter().enumerate() {
        let mut record: Vec<String> = series
            .index()
            .key(row)
            .iter()
            .map(ToString::to_string)
            .collect();
        let cell = match (&first, row) {
            (Some(token), 0) => token.clone(),
            _ if value.is_missing() => na_rep.to_string(),
            _ => value.to_string(),
        };
        record.push(cell);
        writer.write_record(&record)?;
    }
    finish(writer)
}

fn write_frame(frame: &DataFrame) -> Result<String> {
    check_labels(frame.index())?;
    check_labels(frame.columns())?;
    let index_names = frame.index().names_or("dim_0");
    let column_names = frame.columns().names_or("dim_1");
    let (nrows, ncols) = frame.shape();
    debug!(
        "writing 2-D table of {}x{} with {} column level(s)",
        nrows,
        ncols,
        column_names.len()
    );

    let mut writer = csv_writer();
    for (level, name) in column_names.iter().enumerate() {
        let mut record = vec![name.clone()];
        record.extend(std::iter::repeat(String::new()).take(index_names.len() - 1));
        record.extend((0..ncols).map(|col| frame.columns().key(col)[level].to_string()));
        writer.write_record(&record)?;
    }
    let mut record = index_names.clone();
    record.extend(std::iter::repeat(String::new()).take(ncols));
    writer.write_record(&record)?;

    for row in 0..nrows {
        let mut record: Vec<String> = frame
            .index()
            .key(row)
            .iter()
            .map(ToString::to_string)
            .collect();
        record.extend(frame.row(row).iter().map(|v| {
            if v.is_missing() {
                String::new()
            } else {
                v.to_string()
            }
        }));
        writer.write_record(&record)?;
    }
    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{values, MultiIndex};

    fn encode<'a>(input: impl Into<Encodable<'a>>) -> Result<String> {
        let mut encoder = Encoder::new();
        encoder.encode(input)?;
        Ok(encoder.into_inner())
    }

    #[test]
    fn test_scalar() {
        assert_eq!(encode(&LabeledArray::scalar(5.2)).unwrap(), "5.2\n");
        assert_eq!(encode(&LabeledArray::scalar(false)).unwrap(), "False\n");
        assert_eq!(encode(&LabeledArray::scalar(Value::nan())).unwrap(), "nan\n");
    }

    #[test]
    fn test_scalar_strings_are_quoted() {
        assert_eq!(encode(&LabeledArray::scalar("a,b")).unwrap(), "\"a,b\"\n");
        assert_eq!(
            encode(&LabeledArray::scalar("say \"hi\"")).unwrap(),
            "\"say \"\"hi\"\"\"\n"
        );
        assert_eq!(encode(&LabeledArray::scalar("")).unwrap(), "nan\n");
    }

    #[test]
    fn test_1d_missing_values() {
        let a = LabeledArray::from_vec("x", values![0.0, nan])
            .with_coord("x", values!["x1", "x2"])
            .unwrap();
        assert_eq!(encode(&a).unwrap(), "x,\nx1,0.0\nx2,\n");

        let a = LabeledArray::from_vec("x", values![nan, 0.0])
            .with_coord("x", values!["x1", "x2"])
            .unwrap();
        assert_eq!(encode(&a).unwrap(), "x,\nx1,nan\nx2,0.0\n");
    }

    #[test]
    fn test_1d_empty_first_string() {
        let a = LabeledArray::from_vec("x", values!["", "a"])
            .with_coord("x", values!["x1", "x2"])
            .unwrap();
        assert_eq!(encode(&a).unwrap(), "x,\nx1,nan\nx2,a\n");
    }

    #[test]
    fn test_multi_dim_coord_rejected() {
        let a = LabeledArray::new(vec!["x", "y"], vec![1, 1], values![1])
            .unwrap()
            .with_coord_nd("w", &["x", "y"], values![1])
            .unwrap();
        assert!(matches!(encode(&a), Err(Error::UnsupportedShape { ref coord }) if coord == "w"));
    }

    #[test]
    fn test_scalar_coord_dropped() {
        let a = LabeledArray::from_vec("x", values![1])
            .with_coord("x", values!["x1"])
            .unwrap()
            .with_coord_nd("note", &[], values!["ignored"])
            .unwrap();
        assert_eq!(encode(&a).unwrap(), "x,\nx1,1\n");
    }

    #[test]
    fn test_label_checks() {
        let bad = |labels: Vec<Value>| {
            let s = Series::new(TableIndex::named("x", labels), values![1, 2]).unwrap();
            encode(&s).unwrap_err().to_string()
        };
        assert_eq!(bad(values!["", "c1"]), "Empty string in index");
        assert_eq!(bad(values![nan, 1]), "NaN in index");
        assert_eq!(bad(values![1, ""]), "Empty string in index");

        let mi = MultiIndex::from_tuples(
            vec!["x".into(), "y".into()],
            vec![values![nan, 0], values![1, 1]],
        )
        .unwrap();
        let s = Series::new(TableIndex::Composite(mi), values![1, 2]).unwrap();
        assert_eq!(encode(&s).unwrap_err().to_string(), "NaN in index");
    }

    #[test]
    fn test_quoting() {
        let a = LabeledArray::from_vec("x", values!["a,b"])
            .with_coord("x", values!["k"])
            .unwrap();
        assert_eq!(encode(&a).unwrap(), "x,\nk,\"a,b\"\n");
    }
}
