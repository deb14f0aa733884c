//! Positional argument container
//!
//! [`Args`] is an immutable, ordered, fixed-length snapshot of call
//! arguments. Typed retrieval is positional: a position past the end yields
//! the requested type's zero value rather than failing, while a present
//! value of the wrong kind is a coercion error.

use crate::convert::{FromValue, IntoValue};
use crate::value::{Value, ValueError};

/// Immutable, ordered argument container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Value>,
}

impl Args {
    /// Create a container from an ordered list of values
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Create an empty container
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// Number of positional arguments
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Check if the container holds no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed retrieval by position.
    ///
    /// A position at or past [`count`](Self::count) yields `T`'s zero
    /// value; a present value that is not a `T` is a coercion error.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, ValueError> {
        match self.values.get(index) {
            None => Ok(T::zero()),
            Some(value) => T::coerce(value),
        }
    }

    /// The full ordered sequence, uncoerced
    pub fn get_all(&self) -> &[Value] {
        &self.values
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Build an [`Args`] container from heterogeneous Rust values.
///
/// Each expression is lifted through [`IntoValue`], in order:
/// `args![1, "x", true]` holds an `i32`, a `str` and a `bool`.
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::empty()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new(vec![$($crate::IntoValue::into_value($value)),+])
    };
}

/// Lift a slice of Rust values; convenience for handler code iterating raw
/// sequences.
pub fn values_of<T: IntoValue, I: IntoIterator<Item = T>>(items: I) -> Vec<Value> {
    items.into_iter().map(IntoValue::into_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count() {
        let args = args![1, "x", true];
        assert_eq!(args.count(), 3);
        assert!(!args.is_empty());
        assert!(args![].is_empty());
    }

    #[test]
    fn test_typed_get() {
        let args = args![1, "x", true];
        assert_eq!(args.get::<i32>(0).unwrap(), 1);
        assert_eq!(args.get::<String>(1).unwrap(), "x");
        assert!(args.get::<bool>(2).unwrap());
    }

    #[test]
    fn test_out_of_range_returns_zero() {
        let args = args![1];
        assert_eq!(args.get::<i32>(1).unwrap(), 0);
        assert_eq!(args.get::<String>(5).unwrap(), "");
        assert!(!args.get::<bool>(99).unwrap());
        assert!(args.get::<Value>(2).unwrap().is_null());
    }

    #[test]
    fn test_mismatch_is_error() {
        let args = args!["x"];
        let err = args.get::<i32>(0).unwrap_err();
        assert_eq!(
            err,
            ValueError::Coercion {
                wanted: "i32",
                got: "str"
            }
        );
    }

    #[test]
    fn test_get_all_preserves_order() {
        let args = args![1, "x", true];
        let raw = args.get_all();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[0], Value::i32(1));
        assert_eq!(raw[1], Value::str("x"));
        assert_eq!(raw[2], Value::bool(true));
    }

    #[test]
    fn test_from_vec() {
        let args = Args::from(vec![Value::i32(2), Value::null()]);
        assert_eq!(args.count(), 2);
        assert_eq!(args.get::<i32>(0).unwrap(), 2);
    }

    #[test]
    fn test_values_of() {
        let raw = values_of([1, 2, 3]);
        assert_eq!(raw, vec![Value::i32(1), Value::i32(2), Value::i32(3)]);
    }
}
