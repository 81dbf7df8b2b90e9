//! 1-D and 2-D tables: the flattened form NDCSV text maps onto.
//!
//! A [`Series`] is a row index plus one value per row; a [`DataFrame`] adds a
//! column index and stores its cells row-major. Either index may be plain
//! (with an optional name) or composite.
//!
//! ```rust
//! use ndcsv::{values, DataFrame, TableIndex};
//!
//! let df = DataFrame::new(
//!     TableIndex::named("r", values!["r1", "r2"]),
//!     TableIndex::named("c", values!["c1", "c2"]),
//!     values![1, 2, 3, 4],
//! )
//! .unwrap();
//! assert_eq!(ndcsv::to_string(&df).unwrap(), "c,c1,c2\nr,,\nr1,1,2\nr2,3,4\n");
//! ```

use crate::{Error, LabeledArray, Labels, MultiIndex, Result, Value};

/// Row or column index of a table.
#[derive(Clone, Debug, PartialEq)]
pub enum TableIndex {
    Plain {
        name: Option<String>,
        labels: Vec<Value>,
    },
    Composite(MultiIndex),
}

impl TableIndex {
    /// An unnamed plain index.
    pub fn plain(labels: Vec<Value>) -> Self {
        TableIndex::Plain { name: None, labels }
    }

    /// A named plain index.
    pub fn named(name: &str, labels: Vec<Value>) -> Self {
        TableIndex::Plain {
            name: Some(name.to_string()),
            labels,
        }
    }

    /// The default `0..len` index.
    pub fn range(len: usize) -> Self {
        TableIndex::plain((0..len).map(Value::from).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            TableIndex::Plain { labels, .. } => labels.len(),
            TableIndex::Composite(mi) => mi.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels (1 for a plain index).
    #[must_use]
    pub fn nlevels(&self) -> usize {
        match self {
            TableIndex::Plain { .. } => 1,
            TableIndex::Composite(mi) => mi.nlevels(),
        }
    }

    /// Level names; an unnamed plain index yields `default`.
    pub(crate) fn names_or(&self, default: &str) -> Vec<String> {
        match self {
            TableIndex::Plain { name, .. } => {
                vec![name.clone().unwrap_or_else(|| default.to_string())]
            }
            TableIndex::Composite(mi) => mi.names().to_vec(),
        }
    }

    /// Labels of row `row`, one per level.
    #[must_use]
    pub fn key(&self, row: usize) -> Vec<Value> {
        match self {
            TableIndex::Plain { labels, .. } => vec![labels[row].clone()],
            TableIndex::Composite(mi) => mi.tuple(row),
        }
    }

    /// Builds the index from the labels of dimension `dim`.
    fn from_labels(dim: &str, labels: Option<&Labels>, len: usize) -> Self {
        match labels {
            Some(Labels::Plain(v)) => TableIndex::named(dim, v.clone()),
            Some(Labels::Composite(mi)) => TableIndex::Composite(mi.clone()),
            None => TableIndex::Plain {
                name: Some(dim.to_string()),
                labels: (0..len).map(Value::from).collect(),
            },
        }
    }

    /// Dimension name and labels for this index in an array.
    fn into_axis(self, default: &str) -> (String, Labels) {
        match self {
            TableIndex::Plain { name, labels } => (
                name.filter(|n| !n.is_empty())
                    .unwrap_or_else(|| default.to_string()),
                Labels::Plain(labels),
            ),
            TableIndex::Composite(mi) => (default.to_string(), Labels::Composite(mi)),
        }
    }
}

/// A labeled 1-D sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    index: TableIndex,
    values: Vec<Value>,
}

impl Series {
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if `values` and `index` differ in length.
    pub fn new(index: TableIndex, values: Vec<Value>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(Error::type_mismatch(
                &format!("{} values", index.len()),
                &format!("{} values", values.len()),
            ));
        }
        Ok(Series { index, values })
    }

    /// A series over the default `0..n` index.
    pub fn from_values(values: Vec<Value>) -> Self {
        Series {
            index: TableIndex::range(values.len()),
            values,
        }
    }

    #[must_use]
    pub fn index(&self) -> &TableIndex {
        &self.index
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts to a 1-D array. The dimension is named after the index, or
    /// `dim_0` for a composite or unnamed index.
    pub fn into_array(self) -> Result<LabeledArray> {
        let (dim, labels) = self.index.into_axis("dim_0");
        LabeledArray::from_vec(&dim, self.values).with_coord(&dim, labels)
    }
}

/// A labeled 2-D table, cells stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DataFrame {
    index: TableIndex,
    columns: TableIndex,
    data: Vec<Value>,
}

impl DataFrame {
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] unless `data` holds one cell per
    /// row and column.
    pub fn new(index: TableIndex, columns: TableIndex, data: Vec<Value>) -> Result<Self> {
        let cells = index.len() * columns.len();
        if cells != data.len() {
            return Err(Error::type_mismatch(
                &format!("{}x{} cells", index.len(), columns.len()),
                &format!("{} cells", data.len()),
            ));
        }
        Ok(DataFrame {
            index,
            columns,
            data,
        })
    }

    /// A table from rows, over default `0..n` row and column indexes.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        let nrows = rows.len();
        if rows.iter().any(|r| r.len() != ncols) {
            return Err(Error::type_mismatch(
                &format!("rows of {} cells", ncols),
                "ragged rows",
            ));
        }
        Self::new(
            TableIndex::range(nrows),
            TableIndex::range(ncols),
            rows.into_iter().flatten().collect(),
        )
    }

    #[must_use]
    pub fn index(&self) -> &TableIndex {
        &self.index
    }

    #[must_use]
    pub fn columns(&self) -> &TableIndex {
        &self.columns
    }

    #[must_use]
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    /// Cells of row `row`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Value] {
        let ncols = self.columns.len();
        &self.data[row * ncols..(row + 1) * ncols]
    }

    /// Converts to a 2-D array. Dimensions are named after the indexes, or
    /// `dim_0`/`dim_1` for composite or unnamed ones.
    pub fn into_array(self) -> Result<LabeledArray> {
        let (rows, row_labels) = self.index.into_axis("dim_0");
        let (cols, col_labels) = self.columns.into_axis("dim_1");
        let shape = vec![row_labels.len(), col_labels.len()];
        LabeledArray::new(vec![rows.clone(), cols.clone()], shape, self.data)?
            .with_coord(&rows, row_labels)?
            .with_coord(&cols, col_labels)
    }
}

impl TryFrom<&LabeledArray> for Series {
    type Error = Error;

    /// Takes the index coordinate of the only dimension; other coordinates
    /// are dropped.
    fn try_from(array: &LabeledArray) -> Result<Self> {
        if array.ndim() != 1 {
            return Err(Error::type_mismatch(
                "a 1-D array",
                &format!("{} dimensions", array.ndim()),
            ));
        }
        let dim = &array.dims()[0];
        let index = TableIndex::from_labels(dim, array.index(dim), array.shape()[0]);
        Series::new(index, array.data().to_vec())
    }
}

impl TryFrom<&LabeledArray> for DataFrame {
    type Error = Error;

    fn try_from(array: &LabeledArray) -> Result<Self> {
        if array.ndim() != 2 {
            return Err(Error::type_mismatch(
                "a 2-D array",
                &format!("{} dimensions", array.ndim()),
            ));
        }
        let (rows, cols) = (&array.dims()[0], &array.dims()[1]);
        DataFrame::new(
            TableIndex::from_labels(rows, array.index(rows), array.shape()[0]),
            TableIndex::from_labels(cols, array.index(cols), array.shape()[1]),
            array.data().to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    #[test]
    fn test_length_checks() {
        assert!(Series::new(TableIndex::plain(values![1, 2]), values![1]).is_err());
        assert!(DataFrame::new(TableIndex::range(2), TableIndex::range(2), values![1, 2, 3]).is_err());
        assert!(DataFrame::from_rows(vec![values![1, 2], values![3]]).is_err());
    }

    #[test]
    fn test_series_to_array() {
        let s = Series::new(TableIndex::named("x", values!["a", "b"]), values![1, 2]).unwrap();
        let a = s.into_array().unwrap();
        assert_eq!(a.dims(), ["x"]);
        assert_eq!(a.index("x").unwrap().as_plain().unwrap(), values!["a", "b"].as_slice());
    }

    #[test]
    fn test_unnamed_frame_dims() {
        let df = DataFrame::from_rows(vec![values![1, 2], values![3, 4]]).unwrap();
        let a = df.into_array().unwrap();
        assert_eq!(a.dims(), ["dim_0", "dim_1"]);
        assert_eq!(a.get(&[1, 0]), Some(&Value::from(3)));
    }

    #[test]
    fn test_array_to_frame() {
        let a = LabeledArray::new(vec!["r", "c"], vec![1, 2], values![1, 2])
            .unwrap()
            .with_coord("c", values!["c1", "c2"])
            .unwrap();
        let df = DataFrame::try_from(&a).unwrap();
        assert_eq!(df.index(), &TableIndex::named("r", values![0]));
        assert_eq!(df.row(0), values![1, 2].as_slice());
        assert!(Series::try_from(&a).is_err());
    }
}
