//! Bulk loading of a sniffed document into a 1-D or 2-D array.
//!
//! The loaded array is provisional: a single index column becomes the index
//! coordinate of a dimension named after it, several index columns (or
//! several column header rows) become one plain coordinate per level along a
//! synthetic `dim_0`/`dim_1` dimension. Auxiliary names like `y (x)` are kept
//! verbatim; [`crate::unpack`] sorts them out later.

use crate::parse::{guess_column, is_na, unify_numeric, NumberParser};
use crate::sniff::{csv_reader, Shape};
use crate::{Error, LabeledArray, Result, Value};
use log::debug;
use std::io::Read;

const ROW_DIM: &str = "dim_0";
const COLUMN_DIM: &str = "dim_1";

/// One axis of the loaded table: its level names and per-level labels.
struct Axis {
    names: Vec<String>,
    labels: Vec<Vec<Value>>,
}

impl Axis {
    fn len(&self) -> usize {
        self.labels.first().map_or(0, Vec::len)
    }

    /// Dimension name for this axis: the level name itself when there is a
    /// single named level.
    fn dim(&self, synthetic: &str) -> String {
        match self.names.as_slice() {
            [only] if !only.is_empty() => only.clone(),
            _ => synthetic.to_string(),
        }
    }

    fn attach(&self, mut array: LabeledArray, synthetic: &str) -> Result<LabeledArray> {
        let dim = self.dim(synthetic);
        for (level, (name, labels)) in self.names.iter().zip(&self.labels).enumerate() {
            let name = if name.is_empty() && self.names.len() == 1 {
                dim.clone()
            } else if name.is_empty() {
                format!("{}_level_{}", dim, level)
            } else {
                name.clone()
            };
            if array.coords().contains_key(&name) {
                return Err(Error::malformed_with(&format!(
                    "label '{}' is used more than once",
                    name
                )));
            }
            array = array.with_coord_nd(&name, &[dim.as_str()], labels.clone())?;
        }
        Ok(array)
    }
}

/// Reads the whole document laid out as `shape`.
pub(crate) fn load<R: Read, P: NumberParser>(
    reader: R,
    shape: &Shape,
    parser: &P,
) -> Result<LabeledArray> {
    let (index_cols, header_rows) = match *shape {
        Shape::Scalar(_) => return Err(Error::custom("a scalar has no table to load")),
        Shape::Series { index_cols } => (index_cols, 0),
        Shape::Frame {
            index_cols,
            header_rows,
        } => (index_cols, header_rows),
    };
    debug!(
        "loading table: {} index column(s), {} column header row(s)",
        index_cols, header_rows
    );

    let mut rdr = csv_reader(reader);
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }

    if rows.len() <= header_rows {
        return Err(Error::malformed());
    }
    let (headers, body) = rows.split_at(header_rows + 1);
    let index_names = &headers[header_rows];
    let column_headers = &headers[..header_rows];

    let ncols = match shape {
        Shape::Frame { .. } => column_headers
            .iter()
            .map(|r| filled_len(r).saturating_sub(index_cols))
            .max()
            .unwrap_or(0),
        _ => 1,
    };
    let row_len = index_cols + ncols;

    let mut grid: Vec<Vec<&str>> = Vec::with_capacity(body.len());
    for (n, row) in body.iter().enumerate() {
        let cells = filled_len(row);
        if cells > row_len {
            return Err(Error::malformed_with(&format!(
                "data row {} has {} cells, expected {}",
                n + 1,
                cells,
                row_len
            )));
        }
        let mut cells: Vec<&str> = row.iter().take(row_len).map(String::as_str).collect();
        cells.resize(row_len, "");
        grid.push(cells);
    }

    let column = |j: usize| grid.iter().map(|r| r[j]).collect::<Vec<&str>>();

    let rows_axis = Axis {
        names: (0..index_cols)
            .map(|i| index_names.get(i).cloned().unwrap_or_default())
            .collect(),
        labels: (0..index_cols)
            .map(|i| guess_column(&column(i), parser))
            .collect(),
    };

    let mut columns: Vec<Vec<Value>> = (index_cols..row_len)
        .map(|j| guess_column(&column(j), parser))
        .collect();

    match shape {
        Shape::Series { .. } => {
            let data = columns.pop().unwrap_or_default();
            let array = LabeledArray::from_vec(&rows_axis.dim(ROW_DIM), data);
            rows_axis.attach(array, ROW_DIM)
        }
        _ => {
            let columns_axis = Axis {
                names: column_headers
                    .iter()
                    .map(|r| {
                        r.iter()
                            .take(index_cols)
                            .find(|c| !c.is_empty())
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect(),
                labels: column_headers
                    .iter()
                    .map(|r| {
                        (index_cols..row_len)
                            .map(|j| match r.get(j).map(String::as_str) {
                                Some(c) if !is_na(c) => Value::from(c),
                                _ => Value::nan(),
                            })
                            .collect()
                    })
                    .collect(),
            };
            let nrows = rows_axis.len();
            let mut data = Vec::with_capacity(nrows * ncols);
            for i in 0..nrows {
                data.extend(
                    columns
                        .iter_mut()
                        .map(|c| std::mem::replace(&mut c[i], Value::nan())),
                );
            }
            unify_numeric(&mut data);

            let row_dim = rows_axis.dim(ROW_DIM);
            let col_dim = columns_axis.dim(COLUMN_DIM);
            let array = LabeledArray::new(vec![row_dim, col_dim], vec![nrows, ncols], data)
                .map_err(|e| Error::malformed_with(&e.to_string()))?;
            let array = rows_axis.attach(array, ROW_DIM)?;
            columns_axis.attach(array, COLUMN_DIM)
        }
    }
}

/// Number of cells up to the last non-empty one.
fn filled_len(row: &[String]) -> usize {
    row.iter().rposition(|c| !c.is_empty()).map_or(0, |p| p + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::PreciseParser;
    use crate::sniff::sniff;
    use crate::{values, Coordinate};

    fn labels<'a>(array: &'a LabeledArray, name: &str) -> &'a [Value] {
        array
            .coord(name)
            .and_then(Coordinate::values)
            .unwrap_or_default()
    }

    fn load_str(text: &str) -> LabeledArray {
        let shape = sniff(text.as_bytes()).unwrap();
        load(text.as_bytes(), &shape, &PreciseParser).unwrap()
    }

    #[test]
    fn test_series() {
        let a = load_str("x,\nx1,1\nx2,2\n");
        assert_eq!(a.dims(), ["x"]);
        assert_eq!(a.data(), values![1, 2].as_slice());
        assert_eq!(labels(&a, "x"), values!["x1", "x2"].as_slice());
    }

    #[test]
    fn test_series_two_index_columns() {
        let a = load_str("r,c,\n10,30,1\n10,40,2\n");
        assert_eq!(a.dims(), ["dim_0"]);
        assert_eq!(labels(&a, "r"), values![10, 10].as_slice());
        assert_eq!(labels(&a, "c"), values![30, 40].as_slice());
    }

    #[test]
    fn test_frame_promotes_ints() {
        let a = load_str("c,c1,c2\nr,,\nr1,,2\nr2,3.0,4\n");
        assert_eq!(a.dims(), ["r", "c"]);
        assert_eq!(a.data(), values![nan, 2.0, 3.0, 4.0].as_slice());
        assert_eq!(labels(&a, "c"), values!["c1", "c2"].as_slice());
    }

    #[test]
    fn test_frame_composite_columns() {
        let a = load_str("y,y2,y2\nz,z0,z2\nx,,\nx0,0,1\n");
        assert_eq!(a.dims(), ["x", "dim_1"]);
        assert_eq!(labels(&a, "y"), values!["y2", "y2"].as_slice());
        assert_eq!(labels(&a, "z"), values!["z0", "z2"].as_slice());
    }

    #[test]
    fn test_short_rows_are_padded() {
        let a = load_str("c,c1,c2\nr,,\nr1,1\n");
        assert_eq!(a.data(), values![1.0, nan].as_slice());
    }

    #[test]
    fn test_long_rows_fail() {
        let text = "c,c1,c2\nr,,\nr1,1,2,3\n";
        let shape = sniff(text.as_bytes()).unwrap();
        let err = load(text.as_bytes(), &shape, &PreciseParser).unwrap_err();
        assert!(err.to_string().contains("data row 1"));
    }
}
