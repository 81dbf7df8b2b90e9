//! Composite (hierarchical) indexes.
//!
//! A [`MultiIndex`] models several orthogonal dimensions stacked onto one
//! axis. It is stored the way tabular libraries store it: one list of distinct
//! values per level plus, per level, one code per row pointing into that list.
//!
//! Two indexes are equal when they have the same level names and the same
//! sequence of row tuples; the internal order of each level's distinct values
//! does not take part in equality. It does matter for
//! [`LabeledArray::unstack`](crate::LabeledArray::unstack), which lays out
//! the new dimensions in level order.

use crate::{Error, Result, Value};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A composite index: named levels, each with its distinct values and codes.
///
/// # Examples
///
/// ```rust
/// use ndcsv::{values, MultiIndex, Value};
///
/// let mi = MultiIndex::from_product(
///     vec!["y".into(), "z".into()],
///     vec![values!["y2", "y0"], values!["z0", "z1"]],
/// )
/// .unwrap();
///
/// assert_eq!(mi.len(), 4);
/// assert_eq!(mi.tuple(1), vec![Value::from("y2"), Value::from("z1")]);
/// ```
#[derive(Clone, Debug)]
pub struct MultiIndex {
    names: Vec<String>,
    levels: Vec<Vec<Value>>,
    codes: Vec<Vec<usize>>,
}

impl MultiIndex {
    /// Builds an index from raw levels and codes.
    ///
    /// # Errors
    ///
    /// Fails when the number of names, levels and code lists differ, when the
    /// code lists have different lengths or when a code is out of range.
    pub fn new(names: Vec<String>, levels: Vec<Vec<Value>>, codes: Vec<Vec<usize>>) -> Result<Self> {
        if names.len() != levels.len() || names.len() != codes.len() {
            return Err(Error::type_mismatch(
                &format!("{} levels and code lists", names.len()),
                &format!("{} levels and {} code lists", levels.len(), codes.len()),
            ));
        }
        if names.is_empty() {
            return Err(Error::custom("a composite index needs at least one level"));
        }
        let rows = codes[0].len();
        for (level, level_codes) in levels.iter().zip(&codes) {
            if level_codes.len() != rows {
                return Err(Error::type_mismatch(
                    &format!("{} codes per level", rows),
                    &format!("{} codes", level_codes.len()),
                ));
            }
            if level_codes.iter().any(|&c| c >= level.len()) {
                return Err(Error::custom("composite index code out of range"));
            }
        }
        Ok(MultiIndex {
            names,
            levels,
            codes,
        })
    }

    /// Builds an index from one array of labels per level.
    ///
    /// Each level's distinct values are stored **sorted**, which is what
    /// generic tabular libraries do when they factorize labels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ndcsv::{values, MultiIndex};
    ///
    /// let mi = MultiIndex::from_arrays(
    ///     vec!["x".into()],
    ///     vec![values!["b", "a", "b"]],
    /// )
    /// .unwrap();
    /// assert_eq!(mi.levels()[0], values!["a", "b"]);
    /// assert_eq!(mi.codes()[0], vec![1, 0, 1]);
    /// ```
    pub fn from_arrays(names: Vec<String>, arrays: Vec<Vec<Value>>) -> Result<Self> {
        let mut levels = Vec::with_capacity(arrays.len());
        let mut codes = Vec::with_capacity(arrays.len());
        for array in arrays {
            let (level, level_codes) = factorize_sorted(&array);
            levels.push(level);
            codes.push(level_codes);
        }
        Self::new(names, levels, codes)
    }

    /// Builds an index from row tuples.
    pub fn from_tuples(names: Vec<String>, tuples: Vec<Vec<Value>>) -> Result<Self> {
        let width = names.len();
        let mut arrays = vec![Vec::with_capacity(tuples.len()); width];
        for tuple in tuples {
            if tuple.len() != width {
                return Err(Error::type_mismatch(
                    &format!("tuples of {} labels", width),
                    &format!("a tuple of {} labels", tuple.len()),
                ));
            }
            for (array, value) in arrays.iter_mut().zip(tuple) {
                array.push(value);
            }
        }
        Self::from_arrays(names, arrays)
    }

    /// Builds the cartesian product of `levels`, last level varying fastest.
    ///
    /// Level values are kept in the order given.
    pub fn from_product(names: Vec<String>, levels: Vec<Vec<Value>>) -> Result<Self> {
        let sizes: Vec<usize> = levels.iter().map(Vec::len).collect();
        let rows: usize = sizes.iter().product();
        let mut codes = vec![Vec::with_capacity(rows); levels.len()];
        for row in 0..rows {
            let mut rem = row;
            for (level, size) in sizes.iter().enumerate().rev() {
                codes[level].push(rem % size);
                rem /= size;
            }
        }
        Self::new(names, levels, codes)
    }

    /// Level names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Distinct values of each level.
    #[must_use]
    pub fn levels(&self) -> &[Vec<Value>] {
        &self.levels
    }

    /// Per level, the code of every row.
    #[must_use]
    pub fn codes(&self) -> &[Vec<usize>] {
        &self.codes
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.first().map_or(0, Vec::len)
    }

    /// Returns `true` if the index has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels.
    #[must_use]
    pub fn nlevels(&self) -> usize {
        self.names.len()
    }

    /// The label of every row on level `level`.
    #[must_use]
    pub fn level_values(&self, level: usize) -> Vec<Value> {
        self.codes[level]
            .iter()
            .map(|&c| self.levels[level][c].clone())
            .collect()
    }

    /// The labels of row `row`, one per level.
    #[must_use]
    pub fn tuple(&self, row: usize) -> Vec<Value> {
        self.codes
            .iter()
            .zip(&self.levels)
            .map(|(codes, level)| level[codes[row]].clone())
            .collect()
    }

    /// All row tuples.
    #[must_use]
    pub fn tuples(&self) -> Vec<Vec<Value>> {
        (0..self.len()).map(|row| self.tuple(row)).collect()
    }

    /// Returns `true` if two rows carry the same tuple.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.len());
        (0..self.len()).any(|row| {
            let key: Vec<usize> = self.codes.iter().map(|c| c[row]).collect();
            !seen.insert(key)
        })
    }
}

impl PartialEq for MultiIndex {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
            && self.len() == other.len()
            && (0..self.len()).all(|row| self.tuple(row) == other.tuple(row))
    }
}

fn factorize_sorted(values: &[Value]) -> (Vec<Value>, Vec<usize>) {
    let mut level: Vec<Value> = values.to_vec();
    level.sort_by(|a, b| a.total_cmp(b));
    level.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
    let codes = values
        .iter()
        .map(|v| {
            level
                .binary_search_by(|probe| probe.total_cmp(v))
                .unwrap_or_default()
        })
        .collect();
    (level, codes)
}

/// The labels of a coordinate: a plain sequence or a composite index.
#[derive(Clone, Debug, PartialEq)]
pub enum Labels {
    Plain(Vec<Value>),
    Composite(MultiIndex),
}

impl Labels {
    /// Number of labels (rows, for a composite index).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Labels::Plain(v) => v.len(),
            Labels::Composite(mi) => mi.len(),
        }
    }

    /// Returns `true` if there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for a composite index.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Labels::Composite(_))
    }

    /// The plain labels, if any.
    #[must_use]
    pub fn as_plain(&self) -> Option<&[Value]> {
        match self {
            Labels::Plain(v) => Some(v),
            Labels::Composite(_) => None,
        }
    }

    /// The composite index, if any.
    #[must_use]
    pub fn as_composite(&self) -> Option<&MultiIndex> {
        match self {
            Labels::Composite(mi) => Some(mi),
            Labels::Plain(_) => None,
        }
    }
}

impl From<Vec<Value>> for Labels {
    fn from(values: Vec<Value>) -> Self {
        Labels::Plain(values)
    }
}

impl From<MultiIndex> for Labels {
    fn from(mi: MultiIndex) -> Self {
        Labels::Composite(mi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_arrays_sorts_levels() {
        let mi = MultiIndex::from_arrays(
            names(&["y", "z"]),
            vec![values!["y2", "y2", "y0"], values![3, 1, 2]],
        )
        .unwrap();
        assert_eq!(mi.levels()[0], values!["y0", "y2"]);
        assert_eq!(mi.levels()[1], values![1, 2, 3]);
        assert_eq!(mi.tuple(0), values!["y2", 3]);
        assert_eq!(mi.level_values(0), values!["y2", "y2", "y0"]);
    }

    #[test]
    fn test_equality_ignores_level_layout() {
        let a = MultiIndex::from_product(names(&["x"]), vec![values!["b", "a"]]).unwrap();
        let b = MultiIndex::from_arrays(names(&["x"]), vec![values!["b", "a"]]).unwrap();
        assert_ne!(a.levels(), b.levels());
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicates() {
        let mi = MultiIndex::from_tuples(
            names(&["x", "y"]),
            vec![values![10, 10], values![10, 10]],
        )
        .unwrap();
        assert!(mi.has_duplicates());

        let mi = MultiIndex::from_product(names(&["x", "y"]), vec![values![1, 2], values![1, 2]])
            .unwrap();
        assert!(!mi.has_duplicates());
    }

    #[test]
    fn test_nan_level_value() {
        let mi = MultiIndex::from_arrays(names(&["x"]), vec![values![nan, 1.0, nan]]).unwrap();
        assert_eq!(mi.levels()[0].len(), 2);
        assert!(mi.tuple(2)[0].is_missing());
    }

    #[test]
    fn test_rejects_ragged_codes() {
        let err = MultiIndex::new(
            names(&["x", "y"]),
            vec![values![1], values![2]],
            vec![vec![0, 0], vec![0]],
        );
        assert!(err.is_err());
    }
}
