//! # ndcsv
//!
//! Lossless CSV encoding for labeled N-dimensional arrays.
//!
//! ## What is NDCSV?
//!
//! NDCSV is a CSV dialect that stores an array together with its dimension
//! names and coordinate labels, so that reading it back gives the same array:
//! same dimensions, same labels in the same order, with their types (dates,
//! numbers, booleans, strings) restored.
//!
//! ## Key Features
//!
//! - **Any dimensionality**: scalars, 1-D and 2-D tables are written as is;
//!   higher dimensions are stacked onto the columns and unstacked on reading
//! - **Auxiliary coordinates**: non-index labels travel as `name (dim)` columns
//! - **Order preserving**: labels keep the order they appear in the file
//! - **Type inference**: dates, numbers and booleans are recovered from text
//! - **Compression**: `.gz` and `.xz` paths are handled transparently
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ndcsv = "0.1"
//! ```
//!
//! ### Writing and Reading
//!
//! ```rust
//! use ndcsv::{from_str, to_string, values, LabeledArray};
//!
//! let a = LabeledArray::new(vec!["r", "c"], vec![2, 2], values![1, 2, 3, 4])
//!     .unwrap()
//!     .with_coord("r", values!["r1", "r2"])
//!     .unwrap()
//!     .with_coord("c", values!["c1", "c2"])
//!     .unwrap();
//!
//! let text = to_string(&a).unwrap();
//! assert_eq!(text, "c,c1,c2\nr,,\nr1,1,2\nr2,3,4\n");
//!
//! let back = from_str(&text).unwrap();
//! assert_eq!(back, a);
//! ```
//!
//! ### Stacked Dimensions
//!
//! ```rust
//! use ndcsv::{from_str, values};
//!
//! let a = from_str("r,c,\n10,30,1\n10,40,2\n20,30,3\n20,40,4\n").unwrap();
//! assert_eq!(a.dims(), ["r", "c"]);
//! assert_eq!(a.shape(), [2, 2]);
//! assert_eq!(a.index("c").unwrap().as_plain().unwrap(), values![30, 40].as_slice());
//! ```
//!
//! ### Tables
//!
//! 1-D and 2-D tables can be written without building an array first:
//!
//! ```rust
//! use ndcsv::{to_string, values, Series, TableIndex};
//!
//! let s = Series::new(TableIndex::named("r", values!["i1", "i2"]), values![10, 20]).unwrap();
//! assert_eq!(to_string(&s).unwrap(), "r,\ni1,10\ni2,20\n");
//! ```
//!
//! ## Format
//!
//! See the [`format`] module for a description of the layouts.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Writing and reading a 2-D array
//! - **`macro.rs`** - Building labels with the values! macro
//! - **`stacked_dims.rs`** - Arrays with more than two dimensions
//! - **`tables.rs`** - Series and data frames
//! - **`compressed_files.rs`** - Reading and writing `.gz` and `.xz` files
//!
//! Run any example with: `cargo run --example <name>`

pub mod array;
pub mod compress;
pub mod de;
pub mod error;
pub mod format;
pub mod index;
mod infer;
mod load;
pub mod macros;
pub mod map;
pub mod options;
pub mod parse;
pub mod ser;
mod sniff;
pub mod table;
pub mod unpack;
pub mod unstack;
pub mod value;

pub use array::{Coordinate, LabeledArray};
pub use compress::Codec;
pub use de::Decoder;
pub use error::{Error, LabelDefect, Result};
pub use index::{Labels, MultiIndex};
pub use map::CoordMap;
pub use options::ReadOptions;
pub use parse::{NumberParser, PreciseParser};
pub use ser::{Encodable, Encoder};
pub use table::{DataFrame, Series, TableIndex};
pub use value::{Kind, Number, Value};

use std::io::{self, Cursor, Read, Seek};
use std::path::Path;

/// Encode an array, series or data frame as an NDCSV string.
///
/// # Examples
///
/// ```rust
/// use ndcsv::{to_string, LabeledArray};
///
/// assert_eq!(to_string(&LabeledArray::scalar(1)).unwrap(), "1\n");
/// ```
///
/// # Errors
///
/// Returns an error if a coordinate spans several dimensions or an index
/// label is empty or missing.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<'a>(value: impl Into<Encodable<'a>>) -> Result<String> {
    let mut encoder = Encoder::new();
    encoder.encode(value)?;
    Ok(encoder.into_inner())
}

/// Encode to a writer.
///
/// The whole text is rendered before anything is written.
///
/// # Examples
///
/// ```rust
/// use ndcsv::{to_writer, values, LabeledArray};
///
/// let a = LabeledArray::from_vec("x", values![1, 2]);
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &a).unwrap();
/// assert_eq!(buffer, b"x,\n0,1\n1,2\n");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<'a, W>(mut writer: W, value: impl Into<Encodable<'a>>) -> Result<()>
where
    W: io::Write,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Encode to a file, compressing according to its extension.
///
/// # Errors
///
/// Returns an error if encoding or writing fails. Nothing is written if
/// encoding fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_path<'a>(path: impl AsRef<Path>, value: impl Into<Encodable<'a>>) -> Result<()> {
    let text = to_string(value)?;
    compress::create(path.as_ref(), &text)
}

/// Decode NDCSV text into a labeled array.
///
/// # Examples
///
/// ```rust
/// use ndcsv::{from_str, values};
///
/// let a = from_str("x,\nx1,1\nx2,2\n").unwrap();
/// assert_eq!(a.dims(), ["x"]);
/// assert_eq!(a.data(), values![1, 2].as_slice());
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid NDCSV.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<LabeledArray> {
    from_str_with_options(s, ReadOptions::default())
}

/// Decode NDCSV text with custom options.
///
/// # Errors
///
/// Returns an error if the text is not valid NDCSV.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: ReadOptions) -> Result<LabeledArray> {
    Decoder::new(options).decode_str(s)
}

/// Decode from a reader.
///
/// The reader is rewound once after the layout has been sniffed, so it must
/// start at the beginning of the text.
///
/// # Examples
///
/// ```rust
/// use ndcsv::from_reader;
/// use std::io::Cursor;
///
/// let a = from_reader(Cursor::new("c,c1\nr,\nr1,1\n")).unwrap();
/// assert_eq!(a.dims(), ["r", "c"]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the text is not valid NDCSV.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: Read + Seek>(reader: R) -> Result<LabeledArray> {
    from_reader_with_options(reader, ReadOptions::default())
}

/// Decode from a reader with custom options.
///
/// # Errors
///
/// Returns an error if reading fails or the text is not valid NDCSV.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R: Read + Seek>(
    reader: R,
    options: ReadOptions,
) -> Result<LabeledArray> {
    Decoder::new(options).decode(reader)
}

/// Decode from bytes held in memory.
///
/// # Errors
///
/// Returns an error if the bytes are not valid NDCSV.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<LabeledArray> {
    from_reader(Cursor::new(v))
}

/// Decode a file, decompressing according to its extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid NDCSV.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path(path: impl AsRef<Path>) -> Result<LabeledArray> {
    from_path_with_options(path, ReadOptions::default())
}

/// Decode a file with custom options.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid NDCSV.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path_with_options(path: impl AsRef<Path>, options: ReadOptions) -> Result<LabeledArray> {
    let source = compress::open(path.as_ref())?;
    from_reader_with_options(source, options)
}
