//! Tagged-union value representation
//!
//! Proxy calls carry their arguments and return values as [`Value`]s: an
//! ordinary Rust enum with one variant per representable kind plus an
//! `Opaque` variant for arbitrary shared payloads. Every coercion out of a
//! `Value` is explicit and checked; a mismatch is a [`ValueError`], never a
//! silent cast.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The kinds of value a proxy signature can name.
///
/// Tags appear in method and property signatures and drive the coercion
/// checks at call boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// No value (method without a result; the `Null` value)
    Unit,
    /// Boolean
    Bool,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 64-bit float
    F64,
    /// Owned UTF-8 string
    Str,
    /// Arbitrary shared payload (`Arc<dyn Any>`)
    Opaque,
}

impl TypeTag {
    /// Static name for diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            TypeTag::Unit => "unit",
            TypeTag::Bool => "bool",
            TypeTag::I32 => "i32",
            TypeTag::I64 => "i64",
            TypeTag::F64 => "f64",
            TypeTag::Str => "str",
            TypeTag::Opaque => "opaque",
        }
    }

    /// The default-constructed value of this kind.
    ///
    /// `Opaque` has no zero value: there is nothing sensible to construct
    /// for an arbitrary payload, so a backing slot of that kind cannot be
    /// synthesized.
    pub fn zero_value(&self) -> Option<Value> {
        match self {
            TypeTag::Unit => Some(Value::Null),
            TypeTag::Bool => Some(Value::Bool(false)),
            TypeTag::I32 => Some(Value::I32(0)),
            TypeTag::I64 => Some(Value::I64(0)),
            TypeTag::F64 => Some(Value::F64(0.0)),
            TypeTag::Str => Some(Value::Str(String::new())),
            TypeTag::Opaque => None,
        }
    }

    /// Check whether a value is acceptable in a slot declared with this tag.
    ///
    /// Tags match exactly; an `Opaque` slot admits any value. There is no
    /// implicit numeric widening.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            TypeTag::Opaque => true,
            tag => value.tag() == *tag,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coercion errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// A value could not be coerced to the requested type
    #[error("cannot coerce {got} to {wanted}")]
    Coercion {
        /// Requested type name
        wanted: &'static str,
        /// Actual type name
        got: &'static str,
    },
}

/// Tagged-union value
///
/// `Value` is `Clone` (strings by copy, opaque payloads by `Arc` handle)
/// and compares opaque payloads by identity, not content.
#[derive(Clone)]
pub enum Value {
    /// No value
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit float
    F64(f64),
    /// Owned UTF-8 string
    Str(String),
    /// Arbitrary shared payload
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a null value
    #[inline]
    pub const fn null() -> Self {
        Value::Null
    }

    /// Create a boolean value
    #[inline]
    pub const fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create an i32 value
    #[inline]
    pub const fn i32(i: i32) -> Self {
        Value::I32(i)
    }

    /// Create an i64 value
    #[inline]
    pub const fn i64(i: i64) -> Self {
        Value::I64(i)
    }

    /// Create an f64 value
    #[inline]
    pub const fn f64(f: f64) -> Self {
        Value::F64(f)
    }

    /// Create a string value
    #[inline]
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create an opaque value wrapping an arbitrary payload
    #[inline]
    pub fn opaque<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Opaque(Arc::new(payload))
    }

    /// Create an opaque value from an existing handle
    #[inline]
    pub fn from_arc(payload: Arc<dyn Any + Send + Sync>) -> Self {
        Value::Opaque(payload)
    }

    // ========================================================================
    // Type checks
    // ========================================================================

    /// The tag of this value
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Unit,
            Value::Bool(_) => TypeTag::Bool,
            Value::I32(_) => TypeTag::I32,
            Value::I64(_) => TypeTag::I64,
            Value::F64(_) => TypeTag::F64,
            Value::Str(_) => TypeTag::Str,
            Value::Opaque(_) => TypeTag::Opaque,
        }
    }

    /// Check if this value is null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.tag().name()
    }

    // ========================================================================
    // Extractors
    // ========================================================================

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract i32 value
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract i64 value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract f64 value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast an opaque payload to a concrete type
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Value::Opaque(payload) => payload.clone().downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Opaque payloads compare by handle identity
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "bool({})", b),
            Value::I32(i) => write!(f, "i32({})", i),
            Value::I64(i) => write!(f, "i64({})", i),
            Value::F64(v) => write!(f, "f64({})", v),
            Value::Str(s) => write!(f, "str({:?})", s),
            Value::Opaque(p) => write!(f, "opaque({:p})", Arc::as_ptr(p)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I32(i) => write!(f, "{}", i),
            Value::I64(i) => write!(f, "{}", i),
            Value::F64(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
            Value::Opaque(p) => write!(f, "[opaque@{:p}]", Arc::as_ptr(p)),
        }
    }
}
