//! Transparent compression for file paths.
//!
//! The codec is picked from the file name: `.gz`, `.bz2` and `.xz` are
//! compressed, anything else is plain text.

use crate::{Error, Result};
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use liblzma::read::XzDecoder;
use liblzma::write::XzEncoder;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

const XZ_PRESET: u32 = 6;

/// Compression applied to a file, chosen from its extension.
///
/// ```rust
/// use ndcsv::Codec;
///
/// assert_eq!(Codec::from_path("data.csv.gz"), Codec::Gzip);
/// assert_eq!(Codec::from_path("data.csv.xz"), Codec::Xz);
/// assert_eq!(Codec::from_path("data.csv.bz2"), Codec::Bzip2);
/// assert_eq!(Codec::from_path("data.csv"), Codec::Plain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Plain,
    Gzip,
    Xz,
    Bzip2,
}

impl Codec {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("gz") => Codec::Gzip,
            Some("xz") => Codec::Xz,
            Some("bz2") => Codec::Bzip2,
            _ => Codec::Plain,
        }
    }
}

/// A rewindable byte source over a file.
///
/// Plain files are read in place; compressed files are inflated into memory
/// up front since the decoders cannot seek.
#[derive(Debug)]
pub(crate) enum Source {
    File(BufReader<File>),
    Memory(Cursor<Vec<u8>>),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Source::File(r) => r.read(buf),
            Source::Memory(r) => r.read(buf),
        }
    }
}

impl Seek for Source {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        match self {
            Source::File(r) => r.seek(pos),
            Source::Memory(r) => r.seek(pos),
        }
    }
}

/// Opens `path` for reading, decompressing if needed.
pub(crate) fn open(path: &Path) -> Result<Source> {
    let codec = Codec::from_path(path);
    let file = File::open(path)
        .map_err(|e| Error::io(&format!("failed to open {}: {}", path.display(), e)))?;
    debug!("reading {} ({:?})", path.display(), codec);

    let inflate = |mut reader: Box<dyn Read>| -> Result<Source> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Source::Memory(Cursor::new(bytes)))
    };
    match codec {
        Codec::Gzip => inflate(Box::new(GzDecoder::new(BufReader::new(file)))),
        Codec::Xz => inflate(Box::new(XzDecoder::new(BufReader::new(file)))),
        Codec::Bzip2 => inflate(Box::new(BzDecoder::new(BufReader::new(file)))),
        Codec::Plain => Ok(Source::File(BufReader::new(file))),
    }
}

/// Writes `text` to `path`, compressing if needed.
pub(crate) fn create(path: &Path, text: &str) -> Result<()> {
    let codec = Codec::from_path(path);
    let file = File::create(path)
        .map_err(|e| Error::io(&format!("failed to create {}: {}", path.display(), e)))?;
    debug!("writing {} ({:?}, {} bytes)", path.display(), codec, text.len());

    let writer = BufWriter::new(file);
    match codec {
        Codec::Gzip => {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            encoder.write_all(text.as_bytes())?;
            encoder.finish()?.flush()?;
        }
        Codec::Xz => {
            let mut encoder = XzEncoder::new(writer, XZ_PRESET);
            encoder.write_all(text.as_bytes())?;
            encoder.finish()?.flush()?;
        }
        Codec::Bzip2 => {
            let mut encoder = BzEncoder::new(writer, bzip2::Compression::default());
            encoder.write_all(text.as_bytes())?;
            encoder.finish()?.flush()?;
        }
        Codec::Plain => {
            let mut writer = writer;
            writer.write_all(text.as_bytes())?;
            writer.flush()?;
        }
    }
    Ok(())
}
