//! Property-based tests for the write-then-read guarantee.
//!
//! Labels are drawn so that type inference cannot reinterpret them: every
//! generated string starts with a letter prefix no number, date, boolean or
//! missing-value token shares.

use ndcsv::{from_str, to_string, LabeledArray, Value};
use proptest::prelude::*;

fn roundtrip(a: &LabeledArray) -> bool {
    match to_string(a) {
        Ok(written) => match from_str(&written) {
            Ok(back) => {
                if &back != a {
                    eprintln!("Read back differs, text was:\n{}", written);
                }
                &back == a
            }
            Err(e) => {
                eprintln!("Read failed: {}", e);
                eprintln!("Written was: {}", written);
                false
            }
        },
        Err(e) => {
            eprintln!("Write failed: {}", e);
            false
        }
    }
}

fn labels(prefix: &'static str, len: usize) -> impl Strategy<Value = Vec<Value>> {
    Just((0..len).map(|i| Value::from(format!("{}{}", prefix, i))).collect::<Vec<_>>())
        .prop_shuffle()
}

fn finite_float() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO
}

proptest! {
    #[test]
    fn prop_scalar_int(n in any::<i64>()) {
        prop_assert!(roundtrip(&LabeledArray::scalar(n)));
    }

    #[test]
    fn prop_scalar_float(f in finite_float()) {
        prop_assert!(roundtrip(&LabeledArray::scalar(f)));
    }

    #[test]
    fn prop_1d_ints(data in prop::collection::vec(any::<i64>(), 1..20)) {
        let n = data.len();
        let a = LabeledArray::from_vec("x", data.into_iter().map(Value::from).collect())
            .with_coord("x", (0..n).map(|i| Value::from(format!("k{}", i))).collect::<Vec<_>>())
            .unwrap();
        prop_assert!(roundtrip(&a));
    }

    #[test]
    fn prop_1d_strings(data in prop::collection::vec("s_[a-z,\"]{0,6}", 1..10)) {
        let n = data.len();
        let a = LabeledArray::from_vec("x", data.into_iter().map(Value::from).collect())
            .with_coord("x", (0..n).map(Value::from).collect::<Vec<_>>())
            .unwrap();
        prop_assert!(roundtrip(&a));
    }

    #[test]
    fn prop_2d_floats(
        (rows, cols, data) in (1usize..5, 1usize..5).prop_flat_map(|(r, c)| {
            (labels("r", r), labels("c", c), prop::collection::vec(finite_float(), r * c))
        })
    ) {
        let shape = vec![rows.len(), cols.len()];
        let a = LabeledArray::new(vec!["row", "col"], shape, data.into_iter().map(Value::from).collect())
            .unwrap()
            .with_coord("row", rows)
            .unwrap()
            .with_coord("col", cols)
            .unwrap();
        prop_assert!(roundtrip(&a));
    }

    #[test]
    fn prop_3d_label_order(
        (xs, ys, zs) in (1usize..4, 1usize..4, 1usize..4)
            .prop_flat_map(|(x, y, z)| (labels("x", x), labels("y", y), labels("z", z)))
    ) {
        let shape = vec![xs.len(), ys.len(), zs.len()];
        let cells = (0..shape.iter().product::<usize>()).map(Value::from).collect();
        let a = LabeledArray::new(vec!["x", "y", "z"], shape, cells)
            .unwrap()
            .with_coord("x", xs)
            .unwrap()
            .with_coord("y", ys)
            .unwrap()
            .with_coord("z", zs)
            .unwrap();
        prop_assert!(roundtrip(&a));
    }
}
