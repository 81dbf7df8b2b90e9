//! Unstacking that keeps labels in first-seen order.
//!
//! [`LabeledArray::unstack`] lays new dimensions out in level order, and
//! composite indexes built from raw labels have their levels sorted. Unstacking
//! `y2, y0, y1` would come out as `y0, y1, y2`. [`first_seen`] rebuilds the
//! index so each level lists its values in order of first appearance, which
//! makes the native unstack keep the order of the file.

use crate::{Coordinate, Error, LabeledArray, Labels, MultiIndex, Result};

/// Reorders every level of `index` by first appearance in the rows.
///
/// ```rust
/// use ndcsv::{unstack::first_seen, values, MultiIndex};
///
/// let sorted = MultiIndex::from_arrays(
///     vec!["y".into()],
///     vec![values!["y2", "y0", "y2", "y1"]],
/// )
/// .unwrap();
/// assert_eq!(sorted.levels()[0], values!["y0", "y1", "y2"]);
///
/// let ordered = first_seen(&sorted).unwrap();
/// assert_eq!(ordered.levels()[0], values!["y2", "y0", "y1"]);
/// assert_eq!(ordered, sorted);
/// ```
pub fn first_seen(index: &MultiIndex) -> Result<MultiIndex> {
    let mut levels = Vec::with_capacity(index.nlevels());
    let mut codes = Vec::with_capacity(index.nlevels());
    for (level, level_codes) in index.levels().iter().zip(index.codes()) {
        let mut remap = vec![None; level.len()];
        let mut order = Vec::new();
        let new_codes = level_codes
            .iter()
            .map(|&code| {
                *remap[code].get_or_insert_with(|| {
                    order.push(code);
                    order.len() - 1
                })
            })
            .collect();
        levels.push(order.iter().map(|&code| level[code].clone()).collect());
        codes.push(new_codes);
    }
    MultiIndex::new(index.names().to_vec(), levels, codes)
}

/// Unstacks the composite index of `dim`, keeping first-seen label order.
///
/// # Errors
///
/// Fails if `dim` has no composite index, or with
/// [`Error::DuplicateIndex`] if two rows share the same key.
pub fn proper_unstack(array: &LabeledArray, dim: &str) -> Result<LabeledArray> {
    let index = match array.index(dim) {
        Some(Labels::Composite(mi)) => first_seen(mi)?,
        _ => {
            return Err(Error::custom(format!(
                "dimension '{}' has no composite index",
                dim
            )))
        }
    };
    let mut array = array.clone();
    array.insert_coord(
        dim,
        Coordinate::new(vec![dim.to_string()], Labels::Composite(index)),
    );
    array.unstack(dim)
}
