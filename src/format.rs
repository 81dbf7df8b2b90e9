//! The NDCSV format
//!
//! This module documents the layout read and written by this library. It
//! contains no code.
//!
//! # Overview
//!
//! NDCSV stores a labeled N-dimensional array as comma-separated text so
//! that it can be read back without losing dimension names, coordinate
//! labels, their types or their order. Every file is one of three layouts,
//! told apart by the first rows alone.
//!
//! Cells use `,` as delimiter and `"` for quoting. Lines end with `\n`;
//! `\r\n` is accepted on input.
//!
//! # Scalar
//!
//! A 0-dimensional array is a single cell:
//!
//! ```text
//! 1
//! ```
//!
//! # 1-D table
//!
//! The header row holds one name per index column and ends with an empty
//! cell. Each data row holds the key labels followed by the value.
//!
//! ```text
//! x,
//! x1,1
//! x2,2
//! ```
//!
//! Several index columns form a composite key. On reading, the key is
//! unstacked into one dimension per column, in the order the labels first
//! appear:
//!
//! ```text
//! r,c,
//! 10,30,1
//! 10,40,2
//! 20,30,3
//! 20,40,4
//! ```
//!
//! If the first value would be an empty string it is written as `nan`, so
//! that the first data row never ends with an empty cell. Missing values are
//! then written as `nan` throughout the table; otherwise they are empty.
//!
//! # 2-D table
//!
//! One header row per column level: the level name, padding cells for the
//! remaining index columns, then the column labels. Next comes a row naming
//! the index columns, padded with empty cells. Data rows follow.
//!
//! ```text
//! c,c1,c2
//! r,,
//! r1,1,2
//! r2,3,4
//! ```
//!
//! Missing values are empty cells. Arrays with more than two dimensions are
//! written with the first dimension on the rows and every other dimension
//! stacked onto the columns:
//!
//! ```text
//! z,,z0,z0,z1,z1
//! w,,w0,w1,w0,w1
//! x,y,,,,
//! x0,y0,0,1,2,3
//! ```
//!
//! # Auxiliary coordinates
//!
//! A coordinate that labels a dimension without being its index is written
//! as an extra key column (or header row) named `name (dim)`:
//!
//! ```text
//! x,y (x),
//! 10,30,1
//! 20,40,2
//! ```
//!
//! When the axis is unstacked, the auxiliary coordinate must take a single
//! value for every label of `dim`; otherwise reading fails.
//!
//! # Label types
//!
//! Values are parsed cell by cell: integers, then floats, then the missing
//! value tokens (`nan`, `NA`, `N/A`, `NULL`, empty, and similar), then text.
//! Coordinate labels are converted as a whole, and only if every label
//! converts, trying in turn:
//!
//! 1. dates (`2017-11-13`, `13/11/2017`, `13 Nov 2017`, ...), read day first
//! 2. numbers (`01` becomes `1`)
//! 3. booleans (`T`/`F`, `Y`/`N`, `YES`/`NO`, `TRUE`/`FALSE`, any case)
//!
//! Labels that fail every conversion stay text. Labels cannot be empty or
//! missing; such arrays are rejected on writing.
//!
//! # Compression
//!
//! File paths ending in `.gz`, `.bz2` or `.xz` are compressed transparently.
//! Compressed input is inflated into memory before decoding.
