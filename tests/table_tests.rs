use ndcsv::{from_str, to_string, values, DataFrame, MultiIndex, Series, TableIndex, Value};

#[test]
fn test_write_dataframe() {
    let df = DataFrame::from_rows(vec![values![1, 2, 3], values![4, 5, 6]]).unwrap();
    assert_eq!(
        to_string(&df).unwrap(),
        "dim_1,0,1,2\ndim_0,,,\n0,1,2,3\n1,4,5,6\n"
    );

    // index and column labels
    let data = df.data().to_vec();
    let df = DataFrame::new(
        TableIndex::plain(values!["i1", "i2"]),
        TableIndex::plain(values!["c1", "c2", "c3"]),
        data.clone(),
    )
    .unwrap();
    assert_eq!(
        to_string(&df).unwrap(),
        "dim_1,c1,c2,c3\ndim_0,,,\ni1,1,2,3\ni2,4,5,6\n"
    );

    // index and column names
    let df = DataFrame::new(
        TableIndex::named("r", values!["i1", "i2"]),
        TableIndex::named("c", values!["c1", "c2", "c3"]),
        data,
    )
    .unwrap();
    assert_eq!(
        to_string(&df).unwrap(),
        "c,c1,c2,c3\nr,,,\ni1,1,2,3\ni2,4,5,6\n"
    );
}

#[test]
fn test_write_series() {
    let s = Series::from_values(values![10, 20]);
    assert_eq!(to_string(&s).unwrap(), "dim_0,\n0,10\n1,20\n");

    let s = Series::new(TableIndex::plain(values!["i1", "i2"]), values![10, 20]).unwrap();
    assert_eq!(to_string(&s).unwrap(), "dim_0,\ni1,10\ni2,20\n");

    let s = Series::new(TableIndex::named("r", values!["i1", "i2"]), values![10, 20]).unwrap();
    assert_eq!(to_string(&s).unwrap(), "r,\ni1,10\ni2,20\n");
}

#[test]
fn test_series_composite_index() {
    let mi = MultiIndex::from_product(
        vec!["r".into(), "c".into()],
        vec![values![10, 20], values![30, 40]],
    )
    .unwrap();
    let s = Series::new(TableIndex::Composite(mi), values![1, 2, 3, 4]).unwrap();
    let txt = to_string(&s).unwrap();
    assert_eq!(txt, "r,c,\n10,30,1\n10,40,2\n20,30,3\n20,40,4\n");

    let a = from_str(&txt).unwrap();
    assert_eq!(a.dims(), ["r", "c"]);
}

#[test]
fn test_frame_missing_cells() {
    let df = DataFrame::new(
        TableIndex::named("r", values!["r1"]),
        TableIndex::named("c", values!["c1", "c2"]),
        values![nan, 1.5],
    )
    .unwrap();
    assert_eq!(to_string(&df).unwrap(), "c,c1,c2\nr,,\nr1,,1.5\n");
}

#[test]
fn test_series_matches_array() {
    let s = Series::new(TableIndex::named("x", values!["a", "b"]), values![1, 2]).unwrap();
    let a = s.clone().into_array().unwrap();
    assert_eq!(to_string(&s).unwrap(), to_string(&a).unwrap());
    assert_eq!(Series::try_from(&a).unwrap(), s);
}

#[test]
fn test_frame_to_array_and_back() {
    let df = DataFrame::new(
        TableIndex::named("r", values!["r1", "r2"]),
        TableIndex::named("c", values!["c1"]),
        vec![Value::from(true), Value::from(false)],
    )
    .unwrap();
    let a = from_str(&to_string(&df).unwrap()).unwrap();
    assert_eq!(a, df.clone().into_array().unwrap());
    assert_eq!(DataFrame::try_from(&a).unwrap(), df);
}
