//! N-dimensional labeled arrays.
//!
//! [`LabeledArray`] is a small labeled-array container: named dimensions, a
//! row-major grid of [`Value`]s and a set of named [`Coordinate`]s attached to
//! one or more dimensions. It carries only the generic reshaping primitives
//! the NDCSV codec is built on (transpose, stack, unstack, index
//! manipulation); it is not a numeric library.
//!
//! ## Coordinates
//!
//! - An *index coordinate* has the same name as its dimension. It may be
//!   plain or a composite [`MultiIndex`].
//! - An *auxiliary coordinate* has a different name and carries side labels
//!   along its dimension.
//!
//! ```rust
//! use ndcsv::{values, LabeledArray};
//!
//! let a = LabeledArray::from_vec("x", values![1, 2])
//!     .with_coord("x", values![10, 20]).unwrap()
//!     .with_aux_coord("label", "x", values!["a", "b"]).unwrap();
//!
//! assert_eq!(a.dims(), ["x"]);
//! assert_eq!(a.coords().len(), 2);
//! ```

use crate::{CoordMap, Error, Labels, MultiIndex, Number, Result, Value};

/// A named sequence of labels attached to one or more dimensions.
///
/// Multi-dimensional coordinates store their values row-major with respect
/// to their own `dims` order.
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinate {
    dims: Vec<String>,
    labels: Labels,
}

impl Coordinate {
    /// Creates a coordinate over `dims`.
    pub fn new(dims: Vec<String>, labels: Labels) -> Self {
        Coordinate { dims, labels }
    }

    /// Creates a plain 1-D coordinate along `dim`.
    pub fn along(dim: &str, values: Vec<Value>) -> Self {
        Coordinate {
            dims: vec![dim.to_string()],
            labels: Labels::Plain(values),
        }
    }

    /// The dimensions this coordinate spans.
    #[must_use]
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// The labels.
    #[must_use]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// The plain values, if this is not a composite index.
    #[must_use]
    pub fn values(&self) -> Option<&[Value]> {
        self.labels.as_plain()
    }

    /// Returns `true` if this coordinate lies along exactly `dim`.
    #[must_use]
    pub fn is_along(&self, dim: &str) -> bool {
        self.dims.len() == 1 && self.dims[0] == dim
    }

    pub(crate) fn into_labels(self) -> Labels {
        self.labels
    }
}

/// Row-major strides for `shape`.
pub(crate) fn strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    strides
}

/// Multi-dimensional position of flat offset `flat`.
pub(crate) fn unravel(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; shape.len()];
    for axis in (0..shape.len()).rev() {
        if shape[axis] > 0 {
            pos[axis] = flat % shape[axis];
            flat /= shape[axis];
        }
    }
    pos
}

/// Reorders the axes of a row-major grid; `perm[i]` is the old axis that
/// becomes axis `i`.
fn permute(data: &[Value], shape: &[usize], perm: &[usize]) -> Vec<Value> {
    let old_strides = strides(shape);
    let new_shape: Vec<usize> = perm.iter().map(|&p| shape[p]).collect();
    (0..data.len())
        .map(|flat| {
            let pos = unravel(flat, &new_shape);
            let offset: usize = pos
                .iter()
                .zip(perm)
                .map(|(&i, &p)| i * old_strides[p])
                .sum();
            data[offset].clone()
        })
        .collect()
}

/// Slices a row-major grid at `index` along `axis`, dropping that axis.
pub(crate) fn take(data: &[Value], shape: &[usize], axis: usize, index: usize) -> Vec<Value> {
    let stride = strides(shape)[axis];
    let outer: usize = shape[..axis].iter().product();
    let inner = stride;
    let mut out = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        let base = o * shape[axis] * stride + index * stride;
        out.extend_from_slice(&data[base..base + inner]);
    }
    out
}

/// Replaces every integer with its float value when the grid mixes integers
/// with missing cells.
fn promote_missing(values: &mut [Value]) {
    let only_numbers = values.iter().all(Value::is_number);
    if only_numbers {
        for v in values.iter_mut() {
            if let Value::Number(Number::Integer(i)) = v {
                *v = Value::from(*i as f64);
            }
        }
    }
}

/// An N-dimensional labeled array.
///
/// Equality compares dimensions, shape, cells and coordinates (the latter
/// irrespective of attachment order); NaN cells compare equal.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledArray {
    dims: Vec<String>,
    shape: Vec<usize>,
    data: Vec<Value>,
    coords: CoordMap,
}

impl LabeledArray {
    /// A 0-dimensional array holding one value.
    ///
    /// ```rust
    /// use ndcsv::LabeledArray;
    ///
    /// let a = LabeledArray::scalar(5);
    /// assert_eq!(a.ndim(), 0);
    /// assert_eq!(a.data().len(), 1);
    /// ```
    pub fn scalar(value: impl Into<Value>) -> Self {
        LabeledArray {
            dims: Vec::new(),
            shape: Vec::new(),
            data: vec![value.into()],
            coords: CoordMap::new(),
        }
    }

    /// Creates an array from dimension names, a shape and row-major data.
    ///
    /// # Errors
    ///
    /// Fails if the dimension names are not unique, if `dims` and `shape`
    /// differ in length, or if `data` does not hold exactly one value per cell.
    pub fn new<S: Into<String>>(dims: Vec<S>, shape: Vec<usize>, data: Vec<Value>) -> Result<Self> {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != shape.len() {
            return Err(Error::type_mismatch(
                &format!("{} dimension sizes", dims.len()),
                &format!("{}", shape.len()),
            ));
        }
        for (i, d) in dims.iter().enumerate() {
            if dims[..i].contains(d) {
                return Err(Error::custom(format!("duplicate dimension '{}'", d)));
            }
        }
        let cells: usize = shape.iter().product();
        if cells != data.len() {
            return Err(Error::type_mismatch(
                &format!("{} values", cells),
                &format!("{} values", data.len()),
            ));
        }
        Ok(LabeledArray {
            dims,
            shape,
            data,
            coords: CoordMap::new(),
        })
    }

    /// A 1-D array along `dim`.
    pub fn from_vec(dim: &str, data: Vec<Value>) -> Self {
        LabeledArray {
            dims: vec![dim.to_string()],
            shape: vec![data.len()],
            data,
            coords: CoordMap::new(),
        }
    }

    /// Attaches the index coordinate of dimension `dim`.
    ///
    /// # Errors
    ///
    /// Fails if `dim` is not a dimension or the number of labels does not
    /// match its size.
    pub fn with_coord(mut self, dim: &str, labels: impl Into<Labels>) -> Result<Self> {
        let labels = labels.into();
        self.check_len(dim, labels.len())?;
        self.coords
            .insert(dim.to_string(), Coordinate::new(vec![dim.to_string()], labels));
        Ok(self)
    }

    /// Attaches a composite index to dimension `dim`.
    pub fn with_multi_index(self, dim: &str, index: MultiIndex) -> Result<Self> {
        self.with_coord(dim, Labels::Composite(index))
    }

    /// Attaches auxiliary coordinate `name` along dimension `dim`.
    pub fn with_aux_coord(mut self, name: &str, dim: &str, values: Vec<Value>) -> Result<Self> {
        self.check_len(dim, values.len())?;
        self.coords
            .insert(name.to_string(), Coordinate::along(dim, values));
        Ok(self)
    }

    /// Attaches a coordinate spanning any number of dimensions.
    ///
    /// Values are row-major over `dims` in the order given. An empty `dims`
    /// makes a scalar coordinate.
    pub fn with_coord_nd(mut self, name: &str, dims: &[&str], values: Vec<Value>) -> Result<Self> {
        let mut cells = 1;
        for d in dims {
            cells *= self.size_of(d)?;
        }
        if cells != values.len() {
            return Err(Error::type_mismatch(
                &format!("{} values", cells),
                &format!("{} values", values.len()),
            ));
        }
        self.coords.insert(
            name.to_string(),
            Coordinate::new(
                dims.iter().map(|d| d.to_string()).collect(),
                Labels::Plain(values),
            ),
        );
        Ok(self)
    }

    fn check_len(&self, dim: &str, len: usize) -> Result<()> {
        let size = self.size_of(dim)?;
        if size != len {
            return Err(Error::type_mismatch(
                &format!("{} labels for dimension '{}'", size, dim),
                &format!("{} labels", len),
            ));
        }
        Ok(())
    }

    /// Dimension names.
    #[must_use]
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Size of every dimension.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Row-major cells.
    #[must_use]
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Consumes the array and returns its cells.
    #[must_use]
    pub fn into_data(self) -> Vec<Value> {
        self.data
    }

    /// All coordinates.
    #[must_use]
    pub fn coords(&self) -> &CoordMap {
        &self.coords
    }

    /// Coordinate `name`.
    #[must_use]
    pub fn coord(&self, name: &str) -> Option<&Coordinate> {
        self.coords.get(name)
    }

    /// The index coordinate labels of `dim`, if it has one.
    #[must_use]
    pub fn index(&self, dim: &str) -> Option<&Labels> {
        self.coords
            .get(dim)
            .filter(|c| c.is_along(dim))
            .map(Coordinate::labels)
    }

    /// Axis number of `dim`.
    #[must_use]
    pub fn axis(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    fn axis_of(&self, dim: &str) -> Result<usize> {
        self.axis(dim)
            .ok_or_else(|| Error::custom(format!("dimension '{}' not found", dim)))
    }

    fn size_of(&self, dim: &str) -> Result<usize> {
        Ok(self.shape[self.axis_of(dim)?])
    }

    /// The cell at `pos`, one index per dimension.
    #[must_use]
    pub fn get(&self, pos: &[usize]) -> Option<&Value> {
        if pos.len() != self.shape.len() || pos.iter().zip(&self.shape).any(|(i, s)| i >= s) {
            return None;
        }
        let offset: usize = pos.iter().zip(strides(&self.shape)).map(|(i, s)| i * s).sum();
        self.data.get(offset)
    }

    /// Coordinates lying along exactly `dim`: its index coordinate first, then
    /// the others in attachment order.
    #[must_use]
    pub fn coords_along(&self, dim: &str) -> Vec<(&str, &Coordinate)> {
        let mut out: Vec<(&str, &Coordinate)> = Vec::new();
        if let Some((name, c)) = self
            .coords
            .iter()
            .find(|(name, c)| name.as_str() == dim && c.is_along(dim))
        {
            out.push((name.as_str(), c));
        }
        out.extend(
            self.coords
                .iter()
                .filter(|(name, c)| name.as_str() != dim && c.is_along(dim))
                .map(|(name, c)| (name.as_str(), c)),
        );
        out
    }

    /// Reorders the dimensions.
    ///
    /// ```rust
    /// use ndcsv::{values, LabeledArray};
    ///
    /// let a = LabeledArray::new(vec!["r", "c"], vec![2, 3], values![1, 2, 3, 4, 5, 6]).unwrap();
    /// let t = a.transpose(&["c", "r"]).unwrap();
    /// assert_eq!(t.shape(), [3, 2]);
    /// assert_eq!(t.data(), values![1, 4, 2, 5, 3, 6].as_slice());
    /// ```
    pub fn transpose(&self, order: &[&str]) -> Result<Self> {
        if order.len() != self.dims.len() {
            return Err(Error::type_mismatch(
                &format!("{} dimensions", self.dims.len()),
                &format!("{}", order.len()),
            ));
        }
        let perm = order
            .iter()
            .map(|d| self.axis_of(d))
            .collect::<Result<Vec<_>>>()?;
        Ok(LabeledArray {
            dims: perm.iter().map(|&p| self.dims[p].clone()).collect(),
            shape: perm.iter().map(|&p| self.shape[p]).collect(),
            data: permute(&self.data, &self.shape, &perm),
            coords: self.coords.clone(),
        })
    }

    /// Selects position `index` along `dim`, dropping the dimension.
    ///
    /// Coordinates lying only along `dim` are dropped; coordinates spanning
    /// `dim` and other dimensions are sliced.
    pub fn isel(&self, dim: &str, index: usize) -> Result<Self> {
        let axis = self.axis_of(dim)?;
        if index >= self.shape[axis] {
            return Err(Error::custom(format!(
                "index {} out of range for dimension '{}'",
                index, dim
            )));
        }
        let mut coords = CoordMap::new();
        for (name, c) in self.coords.iter() {
            match c.dims.iter().position(|d| d == dim) {
                None => {
                    coords.insert(name.clone(), c.clone());
                }
                Some(_) if c.dims.len() == 1 => {}
                Some(caxis) => {
                    let values = c.values().ok_or_else(|| Error::unsupported_shape(name))?;
                    let cshape = self.coord_shape(c)?;
                    let mut cdims = c.dims.clone();
                    cdims.remove(caxis);
                    coords.insert(
                        name.clone(),
                        Coordinate::new(cdims, Labels::Plain(take(values, &cshape, caxis, index))),
                    );
                }
            }
        }
        let mut dims = self.dims.clone();
        dims.remove(axis);
        let mut shape = self.shape.clone();
        shape.remove(axis);
        Ok(LabeledArray {
            dims,
            shape,
            data: take(&self.data, &self.shape, axis, index),
            coords,
        })
    }

    pub(crate) fn coord_shape(&self, c: &Coordinate) -> Result<Vec<usize>> {
        c.dims.iter().map(|d| self.size_of(d)).collect()
    }

    /// Renames dimension `old` to `new`. Coordinate names are left alone.
    pub fn rename_dim(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        let axis = self.axis_of(old)?;
        if self.axis(new).is_some() {
            return Err(Error::custom(format!("dimension '{}' already exists", new)));
        }
        self.dims[axis] = new.to_string();
        let renamed: Vec<(String, Coordinate)> = self
            .coords
            .iter()
            .filter(|(_, c)| c.dims.iter().any(|d| d == old))
            .map(|(name, c)| {
                let mut c = c.clone();
                for d in c.dims.iter_mut().filter(|d| d.as_str() == old) {
                    *d = new.to_string();
                }
                (name.clone(), c)
            })
            .collect();
        for (name, c) in renamed {
            self.coords.insert(name, c);
        }
        Ok(())
    }

    /// Renames coordinate `old` to `new`, keeping its position.
    pub fn rename_coord(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if self.coords.contains_key(new) {
            return Err(Error::custom(format!("coordinate '{}' already exists", new)));
        }
        if !self.coords.rename(old, new) {
            return Err(Error::custom(format!("coordinate '{}' not found", old)));
        }
        Ok(())
    }

    pub(crate) fn remove_coord(&mut self, name: &str) -> Option<Coordinate> {
        self.coords.remove(name)
    }

    pub(crate) fn insert_coord(&mut self, name: &str, coord: Coordinate) {
        self.coords.insert(name.to_string(), coord);
    }

    /// Replaces a composite index on `dim` by one plain coordinate per level.
    ///
    /// Level coordinates take the position the composite index had. Does
    /// nothing if `dim` carries no composite index.
    pub fn reset_index(&mut self, dim: &str) -> Result<()> {
        self.axis_of(dim)?;
        let position = match self.coords.position(dim) {
            Some(p) if matches!(self.index(dim), Some(Labels::Composite(_))) => p,
            _ => return Ok(()),
        };
        let mi = match self.coords.remove(dim).map(Coordinate::into_labels) {
            Some(Labels::Composite(mi)) => mi,
            _ => return Ok(()),
        };
        for (level, name) in mi.names().iter().enumerate() {
            self.coords.insert_at(
                position + level,
                name.clone(),
                Coordinate::along(dim, mi.level_values(level)),
            );
        }
        Ok(())
    }

    /// Combines the plain coordinates `levels` along `dim` into a composite
    /// index named `name`.
    ///
    /// If `name` differs from `dim` the dimension is renamed to `name`.
    /// Level values are factorized in sorted order.
    pub fn set_index(&mut self, dim: &str, levels: &[String], name: &str) -> Result<()> {
        self.axis_of(dim)?;
        if levels.is_empty() {
            return Err(Error::custom(format!(
                "no coordinates to build an index on '{}'",
                dim
            )));
        }
        let position = levels
            .iter()
            .filter_map(|l| self.coords.position(l))
            .min()
            .unwrap_or(self.coords.len());
        let mut arrays = Vec::with_capacity(levels.len());
        for level in levels {
            let coord = self
                .coords
                .get(level)
                .filter(|c| c.is_along(dim))
                .ok_or_else(|| {
                    Error::custom(format!("coordinate '{}' does not lie along '{}'", level, dim))
                })?;
            let values = coord
                .values()
                .ok_or_else(|| Error::unsupported_shape(level))?;
            arrays.push(values.to_vec());
        }
        let mi = MultiIndex::from_arrays(levels.to_vec(), arrays)?;
        for level in levels {
            self.coords.remove(level);
        }
        if name != dim {
            self.rename_dim(dim, name)?;
        }
        let position = position.min(self.coords.len());
        self.coords.insert_at(
            position,
            name.to_string(),
            Coordinate::new(vec![name.to_string()], Labels::Composite(mi)),
        );
        Ok(())
    }

    /// Stacks `dims` into a single new dimension `new_dim` carrying a
    /// composite index, appended after the remaining dimensions.
    ///
    /// The stacked dimensions' index coordinates become the index levels
    /// (dimensions without one get a `0..n` range). Coordinates lying only
    /// along stacked dimensions are broadcast onto `new_dim`.
    ///
    /// ```rust
    /// use ndcsv::{values, LabeledArray};
    ///
    /// let a = LabeledArray::new(vec!["r", "c"], vec![2, 2], values![1, 2, 3, 4]).unwrap()
    ///     .with_coord("r", values![10, 20]).unwrap()
    ///     .with_coord("c", values![30, 40]).unwrap();
    /// let s = a.stack("dim_0", &["r", "c"]).unwrap();
    ///
    /// assert_eq!(s.dims(), ["dim_0"]);
    /// let mi = s.index("dim_0").unwrap().as_composite().unwrap();
    /// assert_eq!(mi.tuple(1), values![10, 40]);
    /// ```
    pub fn stack(&self, new_dim: &str, dims: &[&str]) -> Result<Self> {
        let axes = dims
            .iter()
            .map(|d| self.axis_of(d))
            .collect::<Result<Vec<_>>>()?;
        if self.axis(new_dim).is_some() && !dims.contains(&new_dim) {
            return Err(Error::custom(format!("dimension '{}' already exists", new_dim)));
        }
        let keep: Vec<usize> = (0..self.ndim()).filter(|a| !axes.contains(a)).collect();
        let perm: Vec<usize> = keep.iter().chain(&axes).copied().collect();
        let data = permute(&self.data, &self.shape, &perm);

        let stacked_shape: Vec<usize> = axes.iter().map(|&a| self.shape[a]).collect();
        let stacked_len: usize = stacked_shape.iter().product();

        let mut levels = Vec::with_capacity(dims.len());
        for (&dim, &size) in dims.iter().zip(&stacked_shape) {
            match self.index(dim) {
                Some(Labels::Plain(v)) => levels.push(v.clone()),
                Some(Labels::Composite(_)) => {
                    return Err(Error::custom(format!(
                        "cannot stack dimension '{}' which already has a composite index",
                        dim
                    )))
                }
                None => levels.push((0..size).map(Value::from).collect()),
            }
        }
        let mi = MultiIndex::from_product(dims.iter().map(|d| d.to_string()).collect(), levels)?;

        let mut composite = Some(Coordinate::new(
            vec![new_dim.to_string()],
            Labels::Composite(mi),
        ));
        let mut coords = CoordMap::new();
        for (name, c) in self.coords.iter() {
            let inside = c.dims.iter().filter(|d| dims.contains(&d.as_str())).count();
            if inside == 0 {
                coords.insert(name.clone(), c.clone());
            } else if c.is_along(name) && dims.contains(&name.as_str()) {
                // absorbed; the composite index takes the first one's place
                if let Some(index) = composite.take() {
                    coords.insert(new_dim.to_string(), index);
                }
            } else if inside == c.dims.len() {
                let values = c.values().ok_or_else(|| Error::unsupported_shape(name))?;
                let cstrides = strides(&self.coord_shape(c)?);
                let broadcast = (0..stacked_len)
                    .map(|flat| {
                        let pos = unravel(flat, &stacked_shape);
                        let offset: usize = c
                            .dims
                            .iter()
                            .zip(&cstrides)
                            .map(|(d, s)| {
                                let k = dims.iter().position(|x| x == d).unwrap_or(0);
                                pos[k] * s
                            })
                            .sum();
                        values[offset].clone()
                    })
                    .collect();
                coords.insert(name.clone(), Coordinate::along(new_dim, broadcast));
            } else {
                return Err(Error::unsupported_shape(name));
            }
        }
        if let Some(index) = composite {
            coords.insert(new_dim.to_string(), index);
        }

        let mut new_dims: Vec<String> = keep.iter().map(|&a| self.dims[a].clone()).collect();
        new_dims.push(new_dim.to_string());
        let mut new_shape: Vec<usize> = keep.iter().map(|&a| self.shape[a]).collect();
        new_shape.push(stacked_len);
        Ok(LabeledArray {
            dims: new_dims,
            shape: new_shape,
            data,
            coords,
        })
    }

    /// Splits the composite index of `dim` into one dimension per level,
    /// appended after the remaining dimensions.
    ///
    /// New dimensions list their labels in **level order**. Combinations that
    /// do not occur in the index are filled with NaN (integer cells are then
    /// promoted to float). Coordinates lying along `dim` end up spanning all
    /// the new dimensions.
    ///
    /// # Errors
    ///
    /// Fails if `dim` has no composite index or the index has duplicate
    /// tuples.
    pub fn unstack(&self, dim: &str) -> Result<Self> {
        let axis = self.axis_of(dim)?;
        let mi = match self.index(dim) {
            Some(Labels::Composite(mi)) => mi.clone(),
            _ => {
                return Err(Error::custom(format!(
                    "dimension '{}' has no composite index",
                    dim
                )))
            }
        };
        if mi.has_duplicates() {
            return Err(Error::duplicate_index(dim));
        }
        for name in mi.names() {
            if name != dim && self.axis(name).is_some() {
                return Err(Error::custom(format!("dimension '{}' already exists", name)));
            }
        }

        let level_shape: Vec<usize> = mi.levels().iter().map(Vec::len).collect();
        let level_strides = strides(&level_shape);
        let level_len: usize = level_shape.iter().product();
        let level_offset = |row: usize| -> usize {
            mi.codes()
                .iter()
                .zip(&level_strides)
                .map(|(codes, s)| codes[row] * s)
                .sum()
        };

        // data: move `dim` last, then scatter each row into the level grid
        let keep: Vec<usize> = (0..self.ndim()).filter(|&a| a != axis).collect();
        let perm: Vec<usize> = keep.iter().copied().chain(Some(axis)).collect();
        let moved = permute(&self.data, &self.shape, &perm);
        let rows = self.shape[axis];
        let outer: usize = keep.iter().map(|&a| self.shape[a]).product();
        let mut scattered: Vec<Option<Value>> = vec![None; outer * level_len];
        for o in 0..outer {
            for row in 0..rows {
                scattered[o * level_len + level_offset(row)] = Some(moved[o * rows + row].clone());
            }
        }
        let mut data = fill_missing(scattered);

        let mut coords = CoordMap::new();
        for (name, c) in self.coords.iter() {
            if name == dim && c.is_along(dim) {
                continue;
            }
            if !c.dims.iter().any(|d| d == dim) {
                coords.insert(name.clone(), c.clone());
                continue;
            }
            if c.dims.len() != 1 {
                return Err(Error::unsupported_shape(name));
            }
            let values = c.values().ok_or_else(|| Error::unsupported_shape(name))?;
            let mut spread: Vec<Option<Value>> = vec![None; level_len];
            for (row, v) in values.iter().enumerate() {
                spread[level_offset(row)] = Some(v.clone());
            }
            coords.insert(
                name.clone(),
                Coordinate::new(mi.names().to_vec(), Labels::Plain(fill_missing(spread))),
            );
        }
        for (level, name) in mi.names().iter().enumerate() {
            coords.insert(
                name.clone(),
                Coordinate::along(name, mi.levels()[level].clone()),
            );
        }

        let mut dims: Vec<String> = keep.iter().map(|&a| self.dims[a].clone()).collect();
        dims.extend(mi.names().iter().cloned());
        let mut shape: Vec<usize> = keep.iter().map(|&a| self.shape[a]).collect();
        shape.extend(&level_shape);
        if data.len() != shape.iter().product::<usize>() {
            return Err(Error::custom("unstack produced an inconsistent grid"));
        }
        data.shrink_to_fit();
        Ok(LabeledArray {
            dims,
            shape,
            data,
            coords,
        })
    }
}

fn fill_missing(cells: Vec<Option<Value>>) -> Vec<Value> {
    let holes = cells.iter().any(Option::is_none);
    let mut out: Vec<Value> = cells
        .into_iter()
        .map(|c| c.unwrap_or_else(Value::nan))
        .collect();
    if holes {
        promote_missing(&mut out);
    }
    out
}
