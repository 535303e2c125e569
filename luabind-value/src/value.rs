use core::fmt;

use luabind_core::Scalar;

use crate::LuaTable;

/// A Lua value as produced by a configuration chunk.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LuaValue {
    /// `nil`
    #[default]
    Nil,
    /// `true` / `false`
    Boolean(bool),
    /// An integer-subtype number.
    Integer(i64),
    /// A float-subtype number.
    Float(f64),
    /// A string.
    String(String),
    /// A table.
    Table(LuaTable),
}

/// The type of a [`LuaValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `nil`
    Nil,
    /// `boolean`
    Boolean,
    /// `number` with the integer subtype.
    Integer,
    /// `number` with the float subtype.
    Float,
    /// `string`
    String,
    /// `table`
    Table,
}

impl ValueKind {
    /// The name Lua's `type()` returns for this kind.
    pub const fn type_name(self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer | ValueKind::Float => "number",
            ValueKind::String => "string",
            ValueKind::Table => "table",
        }
    }

    /// Whether values of this kind classify as a [`Scalar`].
    pub const fn is_scalar(self) -> bool {
        !matches!(self, ValueKind::Nil | ValueKind::Table)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl LuaValue {
    /// The kind of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            LuaValue::Nil => ValueKind::Nil,
            LuaValue::Boolean(_) => ValueKind::Boolean,
            LuaValue::Integer(_) => ValueKind::Integer,
            LuaValue::Float(_) => ValueKind::Float,
            LuaValue::String(_) => ValueKind::String,
            LuaValue::Table(_) => ValueKind::Table,
        }
    }

    /// Whether this is `nil`.
    pub const fn is_nil(&self) -> bool {
        matches!(self, LuaValue::Nil)
    }

    /// The table, if this is one.
    pub fn as_table(&self) -> Option<&LuaTable> {
        match self {
            LuaValue::Table(t) => Some(t),
            _ => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LuaValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Classify a leaf value. `nil` and tables are not scalars.
    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            LuaValue::Boolean(b) => Some(Scalar::Boolean(*b)),
            LuaValue::Integer(i) => Some(Scalar::Integer(*i)),
            LuaValue::Float(x) => Some(Scalar::Float(*x)),
            LuaValue::String(s) => Some(Scalar::String(s.clone())),
            LuaValue::Nil | LuaValue::Table(_) => None,
        }
    }
}

/// Renders scalars the way Lua's `tostring` does; tables render as `table`.
impl fmt::Display for LuaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuaValue::Nil => f.write_str("nil"),
            LuaValue::Boolean(b) => write!(f, "{b}"),
            LuaValue::Integer(i) => write!(f, "{i}"),
            LuaValue::Float(x) => write!(f, "{}", Scalar::Float(*x)),
            LuaValue::String(s) => f.write_str(s),
            LuaValue::Table(_) => f.write_str("table"),
        }
    }
}

impl From<bool> for LuaValue {
    fn from(b: bool) -> Self {
        LuaValue::Boolean(b)
    }
}

impl From<i64> for LuaValue {
    fn from(i: i64) -> Self {
        LuaValue::Integer(i)
    }
}

impl From<f64> for LuaValue {
    fn from(x: f64) -> Self {
        LuaValue::Float(x)
    }
}

impl From<&str> for LuaValue {
    fn from(s: &str) -> Self {
        LuaValue::String(s.to_string())
    }
}

impl From<String> for LuaValue {
    fn from(s: String) -> Self {
        LuaValue::String(s)
    }
}

impl From<LuaTable> for LuaValue {
    fn from(t: LuaTable) -> Self {
        LuaValue::Table(t)
    }
}

impl<T: Into<LuaValue>> From<Option<T>> for LuaValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(LuaValue::Nil, Into::into)
    }
}
