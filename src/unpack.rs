//! Turning one loaded axis back into clean dimensions.
//!
//! After loading, an axis carries one plain coordinate per header column (or
//! header row). Bare names are stacked dimensions; names of the form
//! `name (dim)` are auxiliary coordinates of `dim`.

use crate::array::{strides, unravel};
use crate::unstack::proper_unstack;
use crate::{Coordinate, Error, LabeledArray, Labels, Result};
use log::debug;

/// Splits `"name (dim)"` into `("name", "dim")`.
///
/// ```rust
/// use ndcsv::unpack::split_aux_name;
///
/// assert_eq!(split_aux_name("y (x)"), Some(("y", "x")));
/// assert_eq!(split_aux_name("a (b) (c)"), Some(("a (b)", "c")));
/// assert_eq!(split_aux_name("y"), None);
/// assert_eq!(split_aux_name(" (x)"), None);
/// ```
pub fn split_aux_name(name: &str) -> Option<(&str, &str)> {
    let body = name.strip_suffix(')')?;
    body.rmatch_indices(" (")
        .map(|(at, _)| (&body[..at], &body[at + 2..]))
        .find(|(coord, dim)| !coord.is_empty() && !dim.is_empty())
}

/// Rebuilds the dimensions encoded on axis `dim`.
///
/// Does nothing if `dim` is not a dimension of `array`.
pub fn unpack(mut array: LabeledArray, dim: &str, unstack: bool) -> Result<LabeledArray> {
    if array.axis(dim).is_none() {
        return Ok(array);
    }

    let mut dims: Vec<String> = Vec::new();
    let mut index_coords: Vec<String> = Vec::new();
    let mut aux_coords: Vec<(String, String, String)> = Vec::new();
    for (name, _) in array.coords_along(dim) {
        match split_aux_name(name) {
            Some((coord, target)) => {
                aux_coords.push((name.to_string(), coord.to_string(), target.to_string()));
                if !dims.iter().any(|d| d == target) {
                    dims.push(target.to_string());
                }
            }
            None => {
                index_coords.push(name.to_string());
                if !dims.iter().any(|d| d == name) {
                    dims.push(name.to_string());
                }
            }
        }
    }

    if dims.len() > 1 {
        debug!(
            "axis {}: stacked dimensions {:?}, unstack={}",
            dim, index_coords, unstack
        );
        if index_coords.is_empty() {
            return Err(Error::malformed_with(&format!(
                "axis {} has auxiliary coordinates for several dimensions but no index",
                dim
            )));
        }
        array.set_index(dim, &index_coords, dim)?;
        if unstack {
            for (_, _, target) in &aux_coords {
                if !index_coords.contains(target) {
                    return Err(Error::malformed_with(&format!(
                        "auxiliary coordinate refers to unknown dimension {}",
                        target
                    )));
                }
            }
            array = proper_unstack(&array, dim)?;
            for (name, _, target) in &aux_coords {
                collapse(&mut array, name, target)?;
            }
        }
        rename_aux(&mut array, &aux_coords)?;
    } else if index_coords.is_empty() && aux_coords.len() == 1 {
        // the axis is defined by its auxiliary coordinate alone
        let target = &aux_coords[0].2;
        debug!("axis {}: auxiliary-only dimension {}", dim, target);
        array.rename_dim(dim, target)?;
        rename_aux(&mut array, &aux_coords)?;
    } else if let Some(single) = dims.first() {
        debug!("axis {}: plain dimension {}", dim, single);
        array.rename_dim(dim, single)?;
        rename_aux(&mut array, &aux_coords)?;
    }
    Ok(array)
}

fn rename_aux(array: &mut LabeledArray, aux_coords: &[(String, String, String)]) -> Result<()> {
    for (name, coord, _) in aux_coords {
        array.rename_coord(name, coord)?;
    }
    Ok(())
}

/// Reduces an auxiliary coordinate spread over several unstacked dimensions
/// to its own dimension, provided it is constant along all the others.
fn collapse(array: &mut LabeledArray, name: &str, target: &str) -> Result<()> {
    let Some(coord) = array.coord(name) else {
        return Ok(());
    };
    let (Labels::Plain(values), Some(axis)) = (
        coord.labels(),
        coord.dims().iter().position(|d| d == target),
    ) else {
        return Err(Error::ambiguous(name, target));
    };
    let shape = array.coord_shape(coord)?;
    let strides = strides(&shape);

    // compare against the slice where every other index is 0
    let ambiguous = (0..values.len()).any(|flat| {
        let i = unravel(flat, &shape)[axis];
        values[flat] != values[i * strides[axis]]
    });
    if ambiguous {
        return Err(Error::ambiguous(name, target));
    }
    let collapsed = (0..shape[axis])
        .map(|i| values[i * strides[axis]].clone())
        .collect();
    array.insert_coord(name, Coordinate::along(target, collapsed));
    Ok(())
}
