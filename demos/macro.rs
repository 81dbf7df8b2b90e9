//! Building labels and cells with the values! macro.
//!
//! Run with: cargo run --example macro

use ndcsv::{to_string, values, LabeledArray, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let ints = values![1, 2, 3];
    let mixed = values!["label", 2.5, true, nan];

    println!("Integers: {:?}", ints);
    println!("Mixed:    {:?}", mixed);
    println!("Missing:  {}\n", mixed[3].is_missing());

    // expressions need parentheses
    let offset = 10;
    let shifted = values![(offset + 1), (offset + 2), (-offset)];
    println!("Shifted:  {:?}\n", shifted);

    let a = LabeledArray::from_vec("x", values![1.0, nan, 3.0])
        .with_coord("x", values!["a", "b", "c"])?;
    println!("As NDCSV:\n{}", to_string(&a)?);

    let cells: Vec<String> = a.data().iter().map(Value::to_string).collect();
    println!("Cells: {}", cells.join(" | "));

    Ok(())
}
