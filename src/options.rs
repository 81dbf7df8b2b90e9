//! Configuration options for NDCSV decoding.
//!
//! The format deliberately has no dialect knobs: delimiter, quoting and type
//! inference rules are fixed. The only choice left to the reader is whether
//! stacked axes are unstacked back into orthogonal dimensions.
//!
//! ## Examples
//!
//! ```rust
//! use ndcsv::{from_str_with_options, ReadOptions};
//!
//! let text = "r,c,\n10,30,1\n10,40,2\n20,30,3\n20,40,4\n";
//!
//! // Default: the composite row index becomes two dimensions
//! let a = ndcsv::from_str(text).unwrap();
//! assert_eq!(a.dims(), ["r", "c"]);
//!
//! // Keep the stacked axis as it appears in the file
//! let b = from_str_with_options(text, ReadOptions::new().with_unstack(false)).unwrap();
//! assert_eq!(b.dims(), ["dim_0"]);
//! ```

/// Options controlling how NDCSV text is decoded.
///
/// # Examples
///
/// ```rust
/// use ndcsv::ReadOptions;
///
/// let options = ReadOptions::new();
/// assert!(options.unstack);
///
/// let options = ReadOptions::new().with_unstack(false);
/// assert!(!options.unstack);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    /// Unstack every composite axis into orthogonal dimensions, keeping the
    /// labels in first-seen order. All composite keys must then be unique.
    pub unstack: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions { unstack: true }
    }
}

impl ReadOptions {
    /// Creates default options (unstacking enabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether composite axes are unstacked.
    #[must_use]
    pub fn with_unstack(mut self, unstack: bool) -> Self {
        self.unstack = unstack;
        self
    }
}
