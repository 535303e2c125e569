use core::fmt;

use crate::Erased;

/// The natural representation types a Lua leaf can have.
///
/// Lua strings, integers, floats and booleans map one-to-one onto
/// `String`, `i64`, `f64` and `bool`. No conversion ever happens between
/// them: an integer literal never lands in an `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `String`
    String,
    /// `i64`
    Integer,
    /// `f64`
    Float,
    /// `bool`
    Boolean,
}

impl ScalarType {
    /// Name of the Rust type this scalar is delivered as.
    pub const fn rust_name(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Integer => "i64",
            ScalarType::Float => "f64",
            ScalarType::Boolean => "bool",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

/// A classified Lua leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A Lua string.
    String(String),
    /// A Lua integer.
    Integer(i64),
    /// A Lua float.
    Float(f64),
    /// A Lua boolean.
    Boolean(bool),
}

impl Scalar {
    /// The natural representation type of this scalar.
    pub const fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::String(_) => ScalarType::String,
            Scalar::Integer(_) => ScalarType::Integer,
            Scalar::Float(_) => ScalarType::Float,
            Scalar::Boolean(_) => ScalarType::Boolean,
        }
    }

    /// Box the scalar as its natural Rust type.
    pub fn into_erased(self) -> Erased {
        match self {
            Scalar::String(s) => Box::new(s),
            Scalar::Integer(i) => Box::new(i),
            Scalar::Float(x) => Box::new(x),
            Scalar::Boolean(b) => Box::new(b),
        }
    }
}

/// Renders the scalar the way Lua's `tostring` would.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => fmt_lua_float(*x, f),
            Scalar::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// Lua prints integral floats with a trailing `.0` and spells out
/// non-finite values in lowercase.
pub(crate) fn fmt_lua_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str(if x.is_sign_negative() { "-nan" } else { "nan" })
    } else if x.is_infinite() {
        f.write_str(if x < 0.0 { "-inf" } else { "inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

/// One of the four natural scalar types.
///
/// Used by [`bind_leaf!`](crate::bind_leaf) to find out which scalar a
/// constructor argument expects.
pub trait NaturalScalar: Sized + 'static {
    /// The scalar type this Rust type represents.
    const TYPE: ScalarType;

    /// Extract the value, or `None` if the scalar is of another type.
    fn from_scalar(scalar: Scalar) -> Option<Self>;
}

impl NaturalScalar for String {
    const TYPE: ScalarType = ScalarType::String;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl NaturalScalar for i64 {
    const TYPE: ScalarType = ScalarType::Integer;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Integer(i) => Some(i),
            _ => None,
        }
    }
}

impl NaturalScalar for f64 {
    const TYPE: ScalarType = ScalarType::Float;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Float(x) => Some(x),
            _ => None,
        }
    }
}

impl NaturalScalar for bool {
    const TYPE: ScalarType = ScalarType::Boolean;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_render_like_lua() {
        assert_eq!(Scalar::Float(1.0).to_string(), "1.0");
        assert_eq!(Scalar::Float(1.25).to_string(), "1.25");
        assert_eq!(Scalar::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Scalar::Integer(-3).to_string(), "-3");
    }

    #[test]
    fn natural_extraction_is_exact() {
        assert_eq!(i64::from_scalar(Scalar::Integer(3)), Some(3));
        assert_eq!(f64::from_scalar(Scalar::Integer(3)), None);
        assert_eq!(String::from_scalar(Scalar::Boolean(true)), None);
    }
}
