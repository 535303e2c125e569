//! Per-kind readers that turn a dynamic value into a typed one.
//!
//! Every reader either produces a value or records at least one error and
//! produces nothing. A reader never stops a sibling from being read.

mod collection;
mod enums;
mod leaf;
mod map;
mod object;
mod optional;
mod rejected;

use log::trace;
use luabind_core::{Def, Erased, Shape};
use luabind_path::Path;
use luabind_value::DynamicValue;

use crate::collector::ErrorCollector;
use crate::{ConfigErrorKind, GenericRole};

pub(crate) use collection::CollectionAdapter;
pub(crate) use enums::EnumAdapter;
pub(crate) use map::MapAdapter;
pub(crate) use object::ObjectAdapter;
pub(crate) use optional::OptionalAdapter;
pub(crate) use rejected::{PrimitiveAdapter, UnsupportedAdapter};

/// A bound value, or `None` once the problem has been recorded.
pub(crate) type ReadResult = Option<Erased>;

/// Reads values of one target type.
pub(crate) trait TypeAdapter {
    /// Read a present, non-nil value.
    fn read<V: DynamicValue>(
        &self,
        path: &Path<'_>,
        value: &V,
        errors: &mut ErrorCollector,
    ) -> ReadResult;

    /// Produce a value for an absent key of a field without a default.
    fn missing(&self, path: &Path<'_>, errors: &mut ErrorCollector) -> ReadResult {
        errors.add(path, ConfigErrorKind::MissingRequiredField);
        None
    }
}

/// The adapter chosen for a shape.
#[derive(Clone, Copy)]
pub(crate) enum Adapter {
    Object(ObjectAdapter),
    Enum(EnumAdapter),
    Collection(CollectionAdapter),
    Map(MapAdapter),
    Optional(OptionalAdapter),
    Primitive(PrimitiveAdapter),
    Unsupported(UnsupportedAdapter),
}

impl Adapter {
    /// Select the adapter for `shape`. Checked in a fixed order: optional,
    /// map, collection, other generics, primitives, enums, then objects.
    pub(crate) fn for_shape(shape: &'static Shape) -> Adapter {
        match shape.def {
            Def::Option(def) => Adapter::Optional(OptionalAdapter { shape, def }),
            Def::Map(def) => Adapter::Map(MapAdapter { shape, def }),
            Def::List(def) => Adapter::Collection(CollectionAdapter { shape, def }),
            Def::Generic(_) => Adapter::Unsupported(UnsupportedAdapter { shape }),
            Def::Primitive => Adapter::Primitive(PrimitiveAdapter { shape }),
            Def::Enum(def) => Adapter::Enum(EnumAdapter { shape, def }),
            Def::Object(def) => Adapter::Object(ObjectAdapter { shape, def }),
        }
    }
}

impl TypeAdapter for Adapter {
    fn read<V: DynamicValue>(
        &self,
        path: &Path<'_>,
        value: &V,
        errors: &mut ErrorCollector,
    ) -> ReadResult {
        match self {
            Adapter::Object(a) => a.read(path, value, errors),
            Adapter::Enum(a) => a.read(path, value, errors),
            Adapter::Collection(a) => a.read(path, value, errors),
            Adapter::Map(a) => a.read(path, value, errors),
            Adapter::Optional(a) => a.read(path, value, errors),
            Adapter::Primitive(a) => a.read(path, value, errors),
            Adapter::Unsupported(a) => a.read(path, value, errors),
        }
    }

    fn missing(&self, path: &Path<'_>, errors: &mut ErrorCollector) -> ReadResult {
        match self {
            Adapter::Object(a) => a.missing(path, errors),
            Adapter::Enum(a) => a.missing(path, errors),
            Adapter::Collection(a) => a.missing(path, errors),
            Adapter::Map(a) => a.missing(path, errors),
            Adapter::Optional(a) => a.missing(path, errors),
            Adapter::Primitive(a) => a.missing(path, errors),
            Adapter::Unsupported(a) => a.missing(path, errors),
        }
    }
}

/// Read `value` as `shape`.
pub(crate) fn read_value<V: DynamicValue>(
    shape: &'static Shape,
    path: &Path<'_>,
    value: &V,
    errors: &mut ErrorCollector,
) -> ReadResult {
    trace!("{path}: reading {shape} from {}", value.type_name());
    Adapter::for_shape(shape).read(path, value, errors)
}

/// Records an error and returns `false` if a generic argument is itself
/// generic.
fn require_concrete(
    arg: &'static Shape,
    role: GenericRole,
    path: &Path<'_>,
    errors: &mut ErrorCollector,
) -> bool {
    if arg.is_generic() {
        errors.add(path, ConfigErrorKind::NonConcreteGenericArgument { role, arg });
        false
    } else {
        true
    }
}
