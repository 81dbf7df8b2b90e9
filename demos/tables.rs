//! Writing series and data frames directly.
//!
//! Run with: cargo run --example tables

use ndcsv::{from_str, to_string, values, DataFrame, MultiIndex, Series, TableIndex};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let plain = Series::from_values(values![10, 20, 30]);
    println!("Unnamed series:\n{}", to_string(&plain)?);

    let named = Series::new(TableIndex::named("city", values!["Oslo", "Rome"]), values![2.5, 18.0])?;
    println!("Named series:\n{}", to_string(&named)?);

    let frame = DataFrame::from_rows(vec![values![1, 2, 3], values![4, 5, 6]])?;
    println!("Default frame:\n{}", to_string(&frame)?);

    let index = MultiIndex::from_product(
        vec!["region".into(), "year".into()],
        vec![values!["north", "south"], values![2017, 2018]],
    )?;
    let frame = DataFrame::new(
        TableIndex::Composite(index),
        TableIndex::named("metric", values!["sales", "costs"]),
        values![10.0, 7.5, 12.0, 8.0, 9.0, 6.5, 11.0, nan],
    )?;
    let text = to_string(&frame)?;
    println!("Composite row index:\n{}", text);

    let array = from_str(&text)?;
    println!("Read back as dimensions {:?} with shape {:?}", array.dims(), array.shape());

    Ok(())
}
