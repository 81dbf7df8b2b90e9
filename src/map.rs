//! Ordered map of coordinates.
//!
//! [`CoordMap`] wraps an [`IndexMap`] so that coordinates keep the order in
//! which they were attached. That order decides the column order of composite
//! keys when an array is written, so it has to be deterministic. Equality is
//! order-insensitive: two arrays with the same coordinates attached in a
//! different order are equal.

use crate::Coordinate;
use indexmap::IndexMap;

/// An ordered map of coordinate names to [`Coordinate`]s.
///
/// # Examples
///
/// ```rust
/// use ndcsv::{values, CoordMap, Coordinate};
///
/// let mut map = CoordMap::new();
/// map.insert("x".to_string(), Coordinate::along("x", values!["x1", "x2"]));
/// map.insert("y".to_string(), Coordinate::along("x", values![1, 2]));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["x", "y"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoordMap(IndexMap<String, Coordinate>);

impl CoordMap {
    /// Creates an empty `CoordMap`.
    #[must_use]
    pub fn new() -> Self {
        CoordMap(IndexMap::new())
    }

    /// Inserts a coordinate at the end, or replaces an existing one in place.
    ///
    /// If the map already contained this name, the old coordinate is returned.
    pub fn insert(&mut self, name: String, coord: Coordinate) -> Option<Coordinate> {
        self.0.insert(name, coord)
    }

    /// Inserts a coordinate at position `index`, shifting later entries.
    pub(crate) fn insert_at(&mut self, index: usize, name: String, coord: Coordinate) {
        let index = index.min(self.0.len());
        self.0.shift_insert(index, name, coord);
    }

    /// Removes a coordinate, preserving the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Coordinate> {
        self.0.shift_remove(name)
    }

    /// Renames a coordinate in place.
    ///
    /// Returns `false` if `old` is not present.
    pub(crate) fn rename(&mut self, old: &str, new: &str) -> bool {
        match self.0.get_index_of(old) {
            Some(index) => {
                if let Some(coord) = self.0.shift_remove(old) {
                    self.insert_at(index, new.to_string(), coord);
                }
                true
            }
            None => false,
        }
    }

    /// Position of a coordinate in insertion order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(name)
    }

    /// Returns a reference to the coordinate with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Coordinate> {
        self.0.get(name)
    }

    /// Returns `true` if a coordinate with this name exists.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Coordinate> {
        self.0.keys()
    }

    /// Returns an iterator over the coordinates, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Coordinate> {
        self.0.values()
    }

    /// Returns an iterator over name/coordinate pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Coordinate> {
        self.0.iter()
    }
}

impl IntoIterator for CoordMap {
    type Item = (String, Coordinate);
    type IntoIter = indexmap::map::IntoIter<String, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CoordMap {
    type Item = (&'a String, &'a Coordinate);
    type IntoIter = indexmap::map::Iter<'a, String, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Coordinate)> for CoordMap {
    fn from_iter<T: IntoIterator<Item = (String, Coordinate)>>(iter: T) -> Self {
        CoordMap(IndexMap::from_iter(iter))
    }
}
