//! Writing a 2-D array to NDCSV and reading it back.
//!
//! Run with: cargo run --example simple

use ndcsv::{from_str, to_string, values, LabeledArray, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let prices = LabeledArray::new(
        vec!["date", "ticker"],
        vec![2, 3],
        values![101.5, 33.2, 7.25, 102.0, nan, 7.5],
    )?
    .with_coord(
        "date",
        vec![
            Value::date(2018, 2, 1).ok_or("bad date")?,
            Value::date(2018, 2, 2).ok_or("bad date")?,
        ],
    )?
    .with_coord("ticker", values!["ACME", "INIT", "TECH"])?;

    let text = to_string(&prices)?;
    println!("NDCSV output:\n{}", text);

    let back = from_str(&text)?;
    assert_eq!(prices, back);
    println!("✓ Round-trip successful");

    // dates, numbers and booleans come back typed
    let dates = back
        .index("date")
        .and_then(|labels| labels.as_plain())
        .unwrap_or_default();
    println!("Date labels as JSON: {}", serde_json::to_string(dates)?);

    Ok(())
}
