//! Shape detection from the leading rows of a document.
//!
//! Only as many rows as needed are pulled from the csv reader; the caller
//! rewinds the stream before the bulk load.

use crate::{Error, Result};
use log::debug;
use std::io::Read;

/// The structure of an NDCSV document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    /// One row with one cell
    Scalar(String),
    /// A 1-D table: one header row naming the index columns
    Series { index_cols: usize },
    /// A 2-D table: `header_rows` column header rows, then the row naming the
    /// index columns
    Frame {
        index_cols: usize,
        header_rows: usize,
    },
}

/// Builds the csv reader used for every pass over the text.
pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

/// Trims every cell and drops trailing empty cells.
pub(crate) fn normalize(record: &csv::StringRecord) -> Vec<String> {
    let mut row: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
    while row.last().is_some_and(String::is_empty) {
        row.pop();
    }
    row
}

/// Reads rows until the shape is known.
pub(crate) fn sniff<R: Read>(reader: R) -> Result<Shape> {
    let mut rdr = csv_reader(reader);
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut index_cols = 1;
    let mut record = csv::StringRecord::new();

    while rdr.read_record(&mut record)? {
        let row = normalize(&record);
        if row.is_empty() {
            continue;
        }
        rows.push(row);

        if rows.len() == 2 && rows[0].len() + 1 == rows[1].len() {
            let shape = Shape::Series {
                index_cols: rows[0].len(),
            };
            debug!("detected {:?}", shape);
            return Ok(shape);
        }

        if rows.len() == 3 {
            // an empty cell in the first row marks the end of the index columns
            index_cols = rows[0].iter().position(String::is_empty).map_or(1, |p| p + 1);
            for header_rows in 1..=2 {
                if rows[header_rows].len() == index_cols {
                    return Ok(frame(index_cols, header_rows));
                }
            }
        }

        if rows.len() > 3 && rows[rows.len() - 1].len() == index_cols {
            return Ok(frame(index_cols, rows.len() - 1));
        }
    }

    match rows.as_slice() {
        [only] if only.len() == 1 => {
            debug!("detected scalar");
            Ok(Shape::Scalar(only[0].clone()))
        }
        _ => Err(Error::malformed()),
    }
}

fn frame(index_cols: usize, header_rows: usize) -> Shape {
    let shape = Shape::Frame {
        index_cols,
        header_rows,
    };
    debug!("detected {:?}", shape);
    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(text: &str) -> Result<Shape> {
        sniff(text.as_bytes())
    }

    #[test]
    fn test_scalar() {
        assert_eq!(shape("5\n").unwrap(), Shape::Scalar("5".into()));
        assert_eq!(shape(" foo \n").unwrap(), Shape::Scalar("foo".into()));
    }

    #[test]
    fn test_series() {
        assert_eq!(
            shape("x,\nx1,1\nx2,2\n").unwrap(),
            Shape::Series { index_cols: 1 }
        );
        assert_eq!(
            shape("r,c,\n10,30,1\n").unwrap(),
            Shape::Series { index_cols: 2 }
        );
    }

    #[test]
    fn test_frame() {
        assert_eq!(
            shape("c,c1,c2\nr,,\nr1,1,2\n").unwrap(),
            Shape::Frame {
                index_cols: 1,
                header_rows: 1
            }
        );
        assert_eq!(
            shape("x,,x0,x1\ny,z,,\ny2,z0,0,12\n").unwrap(),
            Shape::Frame {
                index_cols: 2,
                header_rows: 1
            }
        );
        assert_eq!(
            shape("y,y2,y2\nz,z0,z2\nx,,\nx0,0,1\n").unwrap(),
            Shape::Frame {
                index_cols: 1,
                header_rows: 2
            }
        );
        assert_eq!(
            shape("a,a1,a1\nb,b1,b2\nc,c1,c1\nx,,\nx0,0,1\n").unwrap(),
            Shape::Frame {
                index_cols: 1,
                header_rows: 3
            }
        );
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(shape("foo,bar,baz"), Err(Error::Format { .. })));
        assert!(matches!(shape(""), Err(Error::Format { .. })));
        assert!(matches!(shape("c,c1\nr,\n"), Err(Error::Format { .. })));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(
            shape("\nx,\n\nx1,1\n").unwrap(),
            Shape::Series { index_cols: 1 }
        );
    }
}
