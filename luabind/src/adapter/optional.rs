use luabind_core::{OptionDef, Shape};
use luabind_path::Path;
use luabind_value::DynamicValue;

use super::{ReadResult, TypeAdapter, read_value, require_concrete};
use crate::{ConfigErrorKind, GenericRole};
use crate::collector::ErrorCollector;

/// `Option<T>`: absent and `nil` read as `None`.
#[derive(Clone, Copy)]
pub(crate) struct OptionalAdapter {
    pub(crate) shape: &'static Shape,
    pub(crate) def: OptionDef,
}

impl TypeAdapter for OptionalAdapter {
    fn read<V: DynamicValue>(
        &self,
        path: &Path<'_>,
        value: &V,
        errors: &mut ErrorCollector,
    ) -> ReadResult {
        if value.is_nil() {
            return Some((self.def.none)());
        }

        let inner = (self.def.t)();
        if !require_concrete(inner, GenericRole::OptionalInner, path, errors) {
            // The error is recorded; the field itself is left empty.
            return Some((self.def.none)());
        }

        let value = read_value(inner, path, value, errors)?;
        let wrapped = (self.def.some)(value);
        if wrapped.is_none() {
            errors.add(
                path,
                ConfigErrorKind::FieldTypeMismatch {
                    target: self.shape,
                    message: format!("the value is not a {inner}"),
                },
            );
        }
        wrapped
    }

    fn missing(&self, _path: &Path<'_>, _errors: &mut ErrorCollector) -> ReadResult {
        Some((self.def.none)())
    }
}
