/// Builds a `Vec<Value>` from a list of literals.
///
/// Every element goes through `Value::from`, so integers, floats, booleans
/// and string slices can be mixed freely. `nan` stands for the missing value.
///
/// # Examples
///
/// ```rust
/// use ndcsv::{values, Value};
///
/// let labels = values!["x1", "x2"];
/// assert_eq!(labels, vec![Value::from("x1"), Value::from("x2")]);
///
/// let cells = values![1.5, nan, 3.0];
/// assert!(cells[1].is_missing());
/// ```
#[macro_export]
macro_rules! values {
    (@one nan) => {
        $crate::Value::nan()
    };

    (@one $elem:expr) => {
        $crate::Value::from($elem)
    };

    // Handle empty list
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };

    ($($elem:tt),+ $(,)?) => {
        vec![$($crate::values!(@one $elem)),+]
    };
}

#[cfg(test)]
mod tests {
    use crate::Value;

    #[test]
    fn test_empty() {
        let v: Vec<Value> = values![];
        assert!(v.is_empty());
    }

    #[test]
    fn test_mixed() {
        let v = values![1, 2.5, "a", true, nan];
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], Value::from(1));
        assert_eq!(v[2], Value::from("a"));
        assert!(v[4].is_missing());
    }

    #[test]
    fn test_negative_literal() {
        // negative numbers are two tokens; wrap them in parentheses
        let v = values![(-1), (-2.5)];
        assert_eq!(v, vec![Value::from(-1), Value::from(-2.5)]);
    }
}
