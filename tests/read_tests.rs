//! Reading edge cases that need no writer.

use ndcsv::{
    from_str, from_str_with_options, values, Error, Kind, LabeledArray, Labels, MultiIndex,
    ReadOptions, Value,
};

fn read(txt: &str, unstack: bool) -> ndcsv::Result<LabeledArray> {
    from_str_with_options(txt, ReadOptions::new().with_unstack(unstack))
}

/// Labels of `name`, whether it is a coordinate or a level of a composite
/// index.
fn labels_of(a: &LabeledArray, name: &str) -> Vec<Value> {
    if let Some(values) = a.coord(name).and_then(|c| c.values()) {
        return values.to_vec();
    }
    a.coords()
        .values()
        .find_map(|c| match c.labels() {
            Labels::Composite(mi) => mi
                .names()
                .iter()
                .position(|n| n == name)
                .map(|level| mi.level_values(level)),
            Labels::Plain(_) => None,
        })
        .unwrap_or_else(|| panic!("no labels named {}", name))
}

#[test]
fn test_malformed_input() {
    let err = from_str("foo,bar,baz").unwrap_err();
    assert!(err.to_string().contains("Malformed N-dimensional CSV"));
}

#[test]
fn test_coords_dtypes() {
    let txt = "x1,,1,2,3\n\
               x2,,10/11/2017,01/02/2018,12/12/2018\n\
               x3,,true,false,true\n\
               y1,y2,,,\n\
               1.5,s2,10,20,30\n\
               1.7,003,10,20,30";
    for unstack in [true, false] {
        let mut a = read(txt, unstack).unwrap();
        if !unstack {
            a = a.unstack("dim_1").unwrap();
        }
        let kind = |name: &str| labels_of(&a, name)[0].kind();
        assert_eq!(kind("x1"), Kind::Integer, "unstack={}", unstack);
        assert_eq!(kind("x2"), Kind::Date);
        assert_eq!(kind("y1"), Kind::Float);
        assert_eq!(kind("x3"), Kind::Bool);
        assert_eq!(kind("y2"), Kind::String);
        assert_eq!(labels_of(&a, "y2"), values!["s2", "003"]);
        assert_eq!(labels_of(&a, "x2")[0], Value::date(2017, 11, 10).unwrap());
    }
}

#[test]
fn test_coords_bool() {
    let txt = format!(
        "y,true,false,TRUE,FALSE,True,False,Y,N,y,n,YES,NO,Yes,No,yes,no,T,F,T,F\nx\nx0{}\n",
        ",1".repeat(20)
    );
    let a = from_str(&txt).unwrap();
    let expected: Vec<Value> = (0..20).map(|i| Value::from(i % 2 == 0)).collect();
    assert_eq!(labels_of(&a, "y"), expected);
}

#[test]
fn test_coords_date() {
    let expected = vec![
        Value::date(2017, 11, 13).unwrap(),
        Value::date(2017, 11, 14).unwrap(),
    ];
    for s in [
        "2017-11-13,2017-11-14",
        "13/11/2017,14/11/2017",
        "11/13/2017,11/14/2017",
        "13 Nov 2017,14 Nov 2017",
    ] {
        let a = from_str(&format!("y,{}\nx,,\nx0,1,2\n", s)).unwrap();
        assert_eq!(labels_of(&a, "y"), expected, "{}", s);
    }
}

#[test]
fn test_2d_onecol_nomultiindex() {
    let txt = "riskfactor,foo\n\
               percentile,\n\
               0.0,0.0\n\
               0.11,11.11\n\
               0.22,22.22\n\
               0.33,33.33\n\
               1.0,100.0";
    let expected = LabeledArray::new(
        vec!["percentile", "riskfactor"],
        vec![5, 1],
        values![0.0, 11.11, 22.22, 33.33, 100.0],
    )
    .unwrap()
    .with_coord("percentile", values![0.0, 0.11, 0.22, 0.33, 1.0])
    .unwrap()
    .with_coord("riskfactor", values!["foo"])
    .unwrap();
    assert_eq!(from_str(txt).unwrap(), expected);
}

#[test]
fn test_2d_onecol_multiindex() {
    let txt = "riskfactor,,foo\n\
               id,percentile,\n\
               S001,0.0,0.0\n\
               S001,0.11,11.11\n\
               S001,0.22,22.22\n\
               S001,0.33,33.33\n\
               S001,1.0,100.0";
    let expected = LabeledArray::new(
        vec!["riskfactor", "id", "percentile"],
        vec![1, 1, 5],
        values![0.0, 11.11, 22.22, 33.33, 100.0],
    )
    .unwrap()
    .with_coord("riskfactor", values!["foo"])
    .unwrap()
    .with_coord("id", values!["S001"])
    .unwrap()
    .with_coord("percentile", values![0.0, 0.11, 0.22, 0.33, 1.0])
    .unwrap();
    assert_eq!(from_str(txt).unwrap(), expected);
}

#[test]
fn test_ambiguous_nonindex_coords() {
    let err = from_str("x,y,z (x),\n0,0,0,1\n0,1,1,1\n").unwrap_err();
    assert!(matches!(err, Error::Ambiguous { .. }));
    assert_eq!(
        err.to_string(),
        "Auxiliary coordinate z (x) has different values for the same value of its dimension x"
    );
}

#[test]
fn test_nonindex_coords_with_multiindex() {
    let txt = "x,y,z (x),\nx1,y1,z1,1\nx1,y2,z1,2\nx2,y1,z2,3\nx2,y2,z2,4\n";

    let unstacked = LabeledArray::new(vec!["x", "y"], vec![2, 2], values![1, 2, 3, 4])
        .unwrap()
        .with_coord("x", values!["x1", "x2"])
        .unwrap()
        .with_coord("y", values!["y1", "y2"])
        .unwrap()
        .with_aux_coord("z", "x", values!["z1", "z2"])
        .unwrap();
    assert_eq!(read(txt, true).unwrap(), unstacked);

    let mi = MultiIndex::from_tuples(
        vec!["x".into(), "y".into()],
        vec![
            values!["x1", "y1"],
            values!["x1", "y2"],
            values!["x2", "y1"],
            values!["x2", "y2"],
        ],
    )
    .unwrap();
    let stacked = LabeledArray::from_vec("dim_0", values![1, 2, 3, 4])
        .with_multi_index("dim_0", mi)
        .unwrap()
        .with_aux_coord("z", "dim_0", values!["z1", "z1", "z2", "z2"])
        .unwrap();
    assert_eq!(read(txt, false).unwrap(), stacked);
}

#[test]
fn test_missing_index_coord() {
    let one = LabeledArray::from_vec("x", values![1, 2])
        .with_aux_coord("y", "x", values![10, 20])
        .unwrap();
    let two = one
        .clone()
        .with_aux_coord("z", "x", values![30, 40])
        .unwrap();
    for unstack in [false, true] {
        assert_eq!(read("y (x),\n10,1\n20,2\n", unstack).unwrap(), one);
        assert_eq!(read("y (x),z (x),\n10,30,1\n20,40,2\n", unstack).unwrap(), two);
    }
}

#[test]
fn test_float_precision() {
    for txt in ["0.99988\n", "x,\nx1,0.99988\n", "c,c1\nr,\nr1,0.99988\n"] {
        let a = from_str(txt).unwrap();
        assert_eq!(a.data()[0].as_f64(), Some(0.99988), "{}", txt);
    }
}

#[test]
fn test_crlf_and_blank_lines() {
    let a = from_str("x,\r\nx1,1\r\n\r\nx2,2\r\n").unwrap();
    assert_eq!(a.dims(), ["x"]);
    assert_eq!(a.data(), values![1, 2].as_slice());
}

#[test]
fn test_quoted_cells() {
    let a = from_str("x,\n\"a,b\",1\n\"c\",2\n").unwrap();
    assert_eq!(labels_of(&a, "x"), values!["a,b", "c"]);
}

#[test]
fn test_unstack_fills_gaps() {
    let a = from_str("r,c,\n1,a,1\n1,b,2\n2,a,3\n").unwrap();
    assert_eq!(a.dims(), ["r", "c"]);
    assert_eq!(a.data(), values![1.0, 2.0, 3.0, nan].as_slice());
}

#[test]
fn test_unstack_keeps_file_order() {
    let a = from_str("r,c,\nb,z,1\nb,y,2\na,z,3\na,y,4\n").unwrap();
    assert_eq!(labels_of(&a, "r"), values!["b", "a"]);
    assert_eq!(labels_of(&a, "c"), values!["z", "y"]);
    assert_eq!(a.data(), values![1, 2, 3, 4].as_slice());
}

#[test]
fn test_too_many_cells() {
    let err = from_str("c,c1,c2\nr,,\nr1,1,2,3\n").unwrap_err();
    assert!(matches!(err, Error::Format { .. }));
}
