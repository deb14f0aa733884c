//! Traits for converting between Rust values and [`Value`].
//!
//! `IntoValue` lifts a Rust value into the tagged union; `FromValue` is the
//! checked extraction used by [`crate::Args::get`], with a `zero`
//! constructor supplying the out-of-range default.

use crate::value::{Value, ValueError};

/// Lift a Rust value into a [`Value`].
pub trait IntoValue {
    /// Convert into the tagged union
    fn into_value(self) -> Value;
}

/// Checked extraction of a Rust value out of a [`Value`].
pub trait FromValue: Sized {
    /// Extract from the tagged union; `None` on a kind mismatch
    fn from_value(value: &Value) -> Option<Self>;

    /// The zero value of this type (returned for absent positions)
    fn zero() -> Self;

    /// Extract with a first-class coercion error on mismatch
    fn coerce(value: &Value) -> Result<Self, ValueError> {
        Self::from_value(value).ok_or(ValueError::Coercion {
            wanted: Self::type_name(),
            got: value.type_name(),
        })
    }

    /// Name of the requested type, for diagnostics
    fn type_name() -> &'static str;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn zero() -> Self {
        Value::Null
    }

    fn type_name() -> &'static str {
        "value"
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl FromValue for () {
    fn from_value(value: &Value) -> Option<Self> {
        value.is_null().then_some(())
    }

    fn zero() -> Self {}

    fn type_name() -> &'static str {
        "unit"
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn zero() -> Self {
        false
    }

    fn type_name() -> &'static str {
        "bool"
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::I32(self)
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i32()
    }

    fn zero() -> Self {
        0
    }

    fn type_name() -> &'static str {
        "i32"
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::I64(self)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn zero() -> Self {
        0
    }

    fn type_name() -> &'static str {
        "i64"
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::F64(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn zero() -> Self {
        0.0
    }

    fn type_name() -> &'static str {
        "f64"
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn zero() -> Self {
        String::new()
    }

    fn type_name() -> &'static str {
        "str"
    }
}
