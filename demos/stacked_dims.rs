//! Arrays with more than two dimensions, and auxiliary coordinates.
//!
//! Run with: cargo run --example stacked_dims

use ndcsv::{from_str, from_str_with_options, to_string, values, LabeledArray, ReadOptions, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cells: Vec<Value> = (0..12).map(Value::from).collect();
    let a = LabeledArray::new(vec!["scenario", "asset", "horizon"], vec![2, 3, 2], cells)?
        .with_coord("scenario", values!["base", "stress"])?
        // deliberately unsorted: the order survives the round trip
        .with_coord("asset", values!["equity", "bond", "cash"])?
        .with_coord("horizon", values![1, 10])?
        .with_aux_coord("currency", "asset", values!["EUR", "USD", "GBP"])?;

    let text = to_string(&a)?;
    println!("Every dimension after the first is stacked on the columns:\n{}", text);

    let back = from_str(&text)?;
    println!("Dimensions read back: {:?}", back.dims());
    println!("Shape read back:      {:?}", back.shape());
    assert_eq!(a, back);
    println!("✓ Round-trip successful\n");

    let flat = from_str_with_options(&text, ReadOptions::new().with_unstack(false))?;
    println!("Without unstacking: {:?} with shape {:?}", flat.dims(), flat.shape());

    let bad = "x,y,z (x),\n0,0,0,1\n0,1,1,1\n";
    match from_str(bad) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("\nAmbiguous auxiliary coordinate: {}", e),
    }

    Ok(())
}
