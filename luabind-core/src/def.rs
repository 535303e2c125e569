use core::any::Any;
use core::fmt;

use crate::{Erased, Scalar, ScalarType, Shape, Slots, SlotError};

/// Returns the shape of a type referenced from another shape.
pub type ShapeFn = fn() -> &'static Shape;

/// Formats a type-erased value of a known type.
pub type DisplayFn = fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result;

/// The kind of a [`Shape`] and everything needed to build values of it.
#[derive(Clone, Copy)]
pub enum Def {
    /// A concrete, non-enum type: built from a scalar, from a table of
    /// fields, or both.
    Object(ObjectDef),

    /// A unit-only enum, matched by variant name.
    Enum(EnumDef),

    /// A fixed-width machine primitive (`i32`, `u8`, `f32`, `char`, ...).
    /// Never bindable.
    Primitive,

    /// `Option<T>`
    Option(OptionDef),

    /// A sequence or set.
    List(ListDef),

    /// A key/value map.
    Map(MapDef),

    /// Any other parameterized type. Never bindable.
    Generic(GenericDef),
}

/// Definition of a concrete type.
#[derive(Clone, Copy)]
pub struct ObjectDef {
    /// The natural scalar this type *is*, for `String`, `i64`, `f64` and
    /// `bool`.
    pub natural: Option<ScalarType>,

    /// Single-argument constructors, at most one per scalar type.
    pub ctors: &'static [ScalarCtor],

    /// Field layout, present iff the type can be built from a table.
    pub fields: Option<&'static StructDef>,

    /// Renders a value of this type, used for map keys in error paths.
    pub display: Option<DisplayFn>,
}

impl ObjectDef {
    /// A type that is built only from scalars.
    pub const fn leaf(ctors: &'static [ScalarCtor], display: Option<DisplayFn>) -> Self {
        Self {
            natural: None,
            ctors,
            fields: None,
            display,
        }
    }

    /// The constructor accepting `ty`, if declared.
    pub fn ctor_for(&self, ty: ScalarType) -> Option<&'static ScalarCtor> {
        self.ctors.iter().find(|ctor| ctor.param == ty)
    }
}

/// A validating constructor taking one natural scalar.
#[derive(Clone, Copy)]
pub struct ScalarCtor {
    /// The scalar type accepted.
    pub param: ScalarType,

    /// Builds the value. Only ever called with a scalar of type `param`.
    pub call: fn(Scalar) -> Result<Erased, CtorError>,
}

/// Why a [`ScalarCtor`] did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtorError {
    /// The constructor returned an error: the value is invalid.
    Rejected(String),

    /// The constructor could not be run to completion.
    Failed(String),
}

impl fmt::Display for CtorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtorError::Rejected(msg) | CtorError::Failed(msg) => f.write_str(msg),
        }
    }
}

impl core::error::Error for CtorError {}

/// Field layout of a struct declared with [`bind_struct!`](crate::bind_struct).
pub struct StructDef {
    /// The struct's own fields, in declaration order.
    pub fields: &'static [FieldDef],

    /// The embedded base struct, bound from the same table.
    pub base: Option<BaseDef>,

    /// Moves the filled slots (own fields, then base) into a new value.
    pub assemble: fn(&mut Slots) -> Result<Erased, SlotError>,
}

impl StructDef {
    /// Number of slots needed to assemble a value.
    pub const fn slot_count(&self) -> usize {
        self.fields.len() + if self.base.is_some() { 1 } else { 0 }
    }
}

/// One declared field.
#[derive(Clone, Copy)]
pub struct FieldDef {
    /// Field name, also the table key.
    pub name: &'static str,

    /// Field type.
    pub shape: ShapeFn,

    /// Produces the default value, if the field declares one.
    pub default: Option<fn() -> Erased>,
}

/// The embedded base of a struct.
#[derive(Clone, Copy)]
pub struct BaseDef {
    /// Name of the field holding the base.
    pub name: &'static str,

    /// Base type. Must itself be a struct.
    pub shape: ShapeFn,
}

/// Definition of a unit-only enum.
#[derive(Clone, Copy)]
pub struct EnumDef {
    /// All variants, in declaration order.
    pub variants: &'static [Variant],
}

impl EnumDef {
    /// Case-sensitive lookup by name.
    pub fn variant_named(&self, name: &str) -> Option<&'static Variant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// A unit enum variant.
#[derive(Clone, Copy)]
pub struct Variant {
    /// The symbol accepted in the input.
    pub name: &'static str,

    /// Produces the variant.
    pub build: fn() -> Erased,
}

/// Definition of `Option<T>`.
#[derive(Clone, Copy)]
pub struct OptionDef {
    /// Inner type.
    pub t: ShapeFn,

    /// Wraps an inner value in `Some`. `None` on a type mismatch.
    pub some: fn(Erased) -> Option<Erased>,

    /// Produces `None`.
    pub none: fn() -> Erased,
}

/// Whether a list keeps every element or only distinct ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// Insertion-ordered, duplicates kept.
    Sequence,
    /// Duplicates collapsed.
    Set,
}

/// Definition of a sequence or set.
#[derive(Clone, Copy)]
pub struct ListDef {
    /// Sequence or set.
    pub kind: CollectionKind,

    /// Element type.
    pub t: ShapeFn,

    /// Builds the collection from elements in input order. `None` if an
    /// element is not of type `t`.
    pub build: fn(Vec<Erased>) -> Option<Erased>,
}

/// Definition of a map.
#[derive(Clone, Copy)]
pub struct MapDef {
    /// Key type.
    pub k: ShapeFn,

    /// Value type.
    pub v: ShapeFn,

    /// Builds the map from entries. `None` on a type mismatch.
    pub build: fn(Vec<(Erased, Erased)>) -> Option<Erased>,
}

/// Definition of any other generic wrapper (`Box<T>`, `Rc<T>`, `Arc<T>`).
#[derive(Clone, Copy)]
pub struct GenericDef {
    /// The wrapped type.
    pub t: ShapeFn,
}
