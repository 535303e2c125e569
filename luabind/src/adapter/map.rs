use core::any::Any;
use core::fmt::{self, Write};

use luabind_core::{Def, DisplayFn, MapDef, ObjectDef, Shape};
use luabind_path::Path;
use luabind_value::DynamicValue;

use super::{ReadResult, TypeAdapter, read_value, require_concrete};
use crate::collector::ErrorCollector;
use crate::{ConfigErrorKind, GenericRole};

/// Maps, read from every entry of a table.
///
/// Key errors are reported at `{raw}`, value errors at `[key]` where `key`
/// is the bound key rendered for humans.
#[derive(Clone, Copy)]
pub(crate) struct MapAdapter {
    pub(crate) shape: &'static Shape,
    pub(crate) def: MapDef,
}

impl TypeAdapter for MapAdapter {
    fn read<V: DynamicValue>(
        &self,
        path: &Path<'_>,
        value: &V,
        errors: &mut ErrorCollector,
    ) -> ReadResult {
        if !value.is_table() {
            errors.add(
                path,
                ConfigErrorKind::TableExpected {
                    target: self.shape,
                    got: value.type_name(),
                },
            );
            return None;
        }

        let k = (self.def.k)();
        let v = (self.def.v)();
        let key_ok = require_concrete(k, GenericRole::MapKey, path, errors);
        let value_ok = require_concrete(v, GenericRole::MapValue, path, errors);
        if !(key_ok && value_ok) {
            return None;
        }

        let mut entries = Vec::new();
        let mut failed = false;
        for (raw_key, raw_value) in value.pairs() {
            let token = raw_key.raw_token();
            let Some(key) = read_value(k, &path.raw_key(token.as_str()), &raw_key, errors) else {
                failed = true;
                continue;
            };
            let label = key_label(k, &*key, &token);
            match read_value(v, &path.key(label), raw_value, errors) {
                Some(value) => entries.push((key, value)),
                None => failed = true,
            }
        }
        if failed {
            return None;
        }

        let built = (self.def.build)(entries);
        if built.is_none() {
            errors.add(
                path,
                ConfigErrorKind::FieldTypeMismatch {
                    target: self.shape,
                    message: format!("an entry is not a ({k}, {v}) pair"),
                },
            );
        }
        built
    }
}

/// How a bound key appears in the path of its value.
fn key_label(shape: &'static Shape, key: &dyn Any, token: &str) -> String {
    match shape.def {
        Def::Object(ObjectDef {
            display: Some(display),
            ..
        }) => {
            let mut label = String::new();
            match write!(label, "{}", ErasedDisplay { value: key, display }) {
                Ok(()) => label,
                Err(_) => format!("<{shape}>"),
            }
        }
        Def::Enum(_) => token.to_string(),
        _ => format!("<{shape}>"),
    }
}

struct ErasedDisplay<'a> {
    value: &'a dyn Any,
    display: DisplayFn,
}

impl fmt::Display for ErasedDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.display)(self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luabind_core::Bind;

    struct Opaque;

    luabind_core::bind_leaf!(Opaque { String => |_s: String| Ok::<_, String>(Opaque) });

    #[test]
    fn labels_use_display_when_available() {
        let key: Box<dyn Any> = Box::new(String::from("primary"));
        assert_eq!(key_label(String::SHAPE, &*key, "primary"), "primary");

        let key: Box<dyn Any> = Box::new(7_i64);
        assert_eq!(key_label(i64::SHAPE, &*key, "7"), "7");
    }

    #[test]
    fn labels_fall_back_to_the_type_name() {
        let key: Box<dyn Any> = Box::new(Opaque);
        assert_eq!(key_label(Opaque::SHAPE, &*key, "x"), "<Opaque>");
    }
}
