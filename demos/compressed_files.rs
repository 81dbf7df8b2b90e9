//! Reading and writing compressed NDCSV files.
//!
//! Run with: RUST_LOG=debug cargo run --example compressed_files

use ndcsv::{from_path, to_path, values, Codec, LabeledArray};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let a = LabeledArray::new(vec!["r", "c"], vec![2, 2], values![1.5, 2.5, 3.5, nan])?
        .with_coord("r", values!["r1", "r2"])?
        .with_coord("c", values!["c1", "c2"])?;

    let dir = tempfile::tempdir()?;
    for name in ["data.csv", "data.csv.gz", "data.csv.bz2", "data.csv.xz"] {
        let path = dir.path().join(name);
        to_path(&path, &a)?;
        let size = std::fs::metadata(&path)?.len();
        let back = from_path(&path)?;
        assert_eq!(a, back);
        println!("{:<12} {:?}: {} bytes, round-trip ok", name, Codec::from_path(&path), size);
    }

    Ok(())
}
