use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Def;

/// TypeId equivalent usable in const contexts.
#[derive(Copy, Clone)]
pub struct ConstTypeId {
    type_id_fn: fn() -> TypeId,
}

impl ConstTypeId {
    /// Create a [`ConstTypeId`] for a type.
    #[must_use]
    pub const fn of<T: 'static>() -> Self {
        ConstTypeId {
            type_id_fn: TypeId::of::<T>,
        }
    }

    /// Get the underlying [`TypeId`].
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }
}

impl fmt::Debug for ConstTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

impl PartialEq for ConstTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for ConstTypeId {}

impl Hash for ConstTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}

/// Last path segment of a stringified type, with its generic arguments kept.
///
/// `stringify!(net :: Host)` becomes `Host`, `a::Wrapper<b::C>` becomes
/// `Wrapper<b::C>`.
#[doc(hidden)]
pub const fn type_identifier_of(path: &'static str) -> &'static str {
    let bytes = path.as_bytes();

    let mut end = 0;
    while end < bytes.len() && bytes[end] != b'<' {
        end += 1;
    }
    while end > 0 && bytes[end - 1] == b' ' {
        end -= 1;
    }

    let mut start = end;
    while start > 0 && bytes[start - 1] != b':' && bytes[start - 1] != b' ' {
        start -= 1;
    }

    path.split_at(start).1.trim_ascii()
}

/// Static description of a bindable type.
#[derive(Clone, Copy)]
pub struct Shape {
    /// Unqualified type name, without generic parameters (`Vec`, `Server`).
    pub type_identifier: &'static str,

    /// Identity of the described type. Used as the schema cache key.
    pub id: ConstTypeId,

    /// How values of this type are built.
    pub def: Def,
}

impl Shape {
    /// The [`TypeId`] of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id.get()
    }

    /// Whether the shape is parameterized (`Option`, a list, a map, or any
    /// other generic wrapper).
    ///
    /// Generic arguments of a generic shape must themselves be concrete.
    pub const fn is_generic(&self) -> bool {
        matches!(
            self.def,
            Def::Option(_) | Def::List(_) | Def::Map(_) | Def::Generic(_)
        )
    }

    /// Returns `true` if this shape describes `T`.
    pub fn is_type<T: 'static>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({self})")
    }
}

/// Renders the type with its generic arguments, e.g. `HashMap<String, Vec<Host>>`.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.def {
            Def::Option(def) => write!(f, "{}<{}>", self.type_identifier, (def.t)()),
            Def::List(def) => write!(f, "{}<{}>", self.type_identifier, (def.t)()),
            Def::Map(def) => write!(f, "{}<{}, {}>", self.type_identifier, (def.k)(), (def.v)()),
            Def::Generic(def) => write!(f, "{}<{}>", self.type_identifier, (def.t)()),
            Def::Object(_) | Def::Enum(_) | Def::Primitive => f.write_str(self.type_identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::type_identifier_of;

    #[test]
    fn qualified_paths_keep_their_last_segment() {
        assert_eq!(type_identifier_of("Port"), "Port");
        assert_eq!(type_identifier_of("net :: Host"), "Host");
        assert_eq!(type_identifier_of("crate::net::Host"), "Host");
        assert_eq!(type_identifier_of("::net::Host"), "Host");
        assert_eq!(type_identifier_of("a::Wrapper<b::C>"), "Wrapper<b::C>");
        assert_eq!(type_identifier_of("a :: Wrapper < b :: C >"), "Wrapper < b :: C >");
    }
}
