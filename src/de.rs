//! NDCSV decoding.
//!
//! This module provides the [`Decoder`] that turns NDCSV text into a
//! [`LabeledArray`].
//!
//! ## Overview
//!
//! Decoding runs in four stages:
//!
//! 1. **Sniffing**: the first rows are read to tell a scalar, a 1-D table and
//!    a 2-D table apart, and to count index columns and header rows
//! 2. **Loading**: the stream is rewound and read in full
//! 3. **Type inference**: string coordinates become dates, numbers or
//!    booleans where every label allows it
//! 4. **Unpacking**: each axis is turned back into one or more dimensions,
//!    with auxiliary coordinates reattached
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use ndcsv::{from_str, values};
//!
//! let a = from_str("c,c1,c2\nr,,\nr1,1,2\nr2,3,4\n").unwrap();
//! assert_eq!(a.dims(), ["r", "c"]);
//! assert_eq!(a.data(), values![1, 2, 3, 4].as_slice());
//! ```
//!
//! A [`Decoder`] can be kept around and given its own [`NumberParser`]:
//!
//! ```rust
//! use ndcsv::{Decoder, PreciseParser, ReadOptions};
//!
//! let decoder = Decoder::with_parser(ReadOptions::new(), PreciseParser);
//! let a = decoder.decode_str("0.99988\n").unwrap();
//! assert_eq!(a.data()[0].as_f64(), Some(0.99988));
//! ```

use crate::infer::infer_coords;
use crate::load::load;
use crate::parse::{guess_cell, NumberParser, PreciseParser};
use crate::sniff::{sniff, Shape};
use crate::unpack::unpack;
use crate::{LabeledArray, ReadOptions, Result};
use log::debug;
use std::io::{Cursor, Read, Seek, SeekFrom};

/// The NDCSV decoder.
///
/// Holds the read options and the numeric parser; it keeps no state between
/// calls.
#[derive(Clone, Debug)]
pub struct Decoder<P = PreciseParser> {
    options: ReadOptions,
    parser: P,
}

impl Decoder {
    /// Creates a decoder using the default [`PreciseParser`].
    #[must_use]
    pub fn new(options: ReadOptions) -> Self {
        Decoder {
            options,
            parser: PreciseParser,
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(ReadOptions::default())
    }
}

impl<P: NumberParser> Decoder<P> {
    /// Creates a decoder that parses numbers with `parser`.
    pub fn with_parser(options: ReadOptions, parser: P) -> Self {
        Decoder { options, parser }
    }

    /// The read options.
    #[must_use]
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// The numeric parser.
    #[must_use]
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Decodes NDCSV text held in memory.
    pub fn decode_str(&self, text: &str) -> Result<LabeledArray> {
        self.decode(Cursor::new(text.as_bytes()))
    }

    /// Decodes NDCSV text from a rewindable stream.
    ///
    /// The stream is read from its current position for sniffing, then
    /// rewound to the start for the full load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`](crate::Error::Format) if the text matches no
    /// NDCSV layout and [`Error::Ambiguous`](crate::Error::Ambiguous) if an
    /// auxiliary coordinate cannot be reattached after unstacking.
    pub fn decode<R: Read + Seek>(&self, mut reader: R) -> Result<LabeledArray> {
        let shape = sniff(&mut reader)?;
        if let Shape::Scalar(text) = &shape {
            return Ok(LabeledArray::scalar(guess_cell(text, &self.parser)));
        }

        reader.seek(SeekFrom::Start(0))?;
        let array = load(&mut reader, &shape, &self.parser)?;
        let array = infer_coords(array, &self.parser)?;

        let dims = array.dims().to_vec();
        let mut array = array;
        for dim in &dims {
            array = unpack(array, dim, self.options.unstack)?;
        }
        debug!("decoded array with dimensions {:?}", array.dims());
        Ok(array)
    }
}
