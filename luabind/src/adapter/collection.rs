use luabind_core::{ListDef, Shape};
use luabind_path::Path;
use luabind_value::DynamicValue;

use super::{ReadResult, TypeAdapter, read_value, require_concrete};
use crate::collector::ErrorCollector;
use crate::{ConfigErrorKind, GenericRole};

/// Sequences and sets, read from the array view `t[1..n]` of a table.
#[derive(Clone, Copy)]
pub(crate) struct CollectionAdapter {
    pub(crate) shape: &'static Shape,
    pub(crate) def: ListDef,
}

impl TypeAdapter for CollectionAdapter {
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

        let elem = (self.def.t)();
        if !require_concrete(elem, GenericRole::CollectionElement, path, errors) {
            return None;
        }

        let mut items = Vec::new();
        let mut failed = false;
        let mut index = 1;
        while let Some(item) = value.get_index(index as i64) {
            match read_value(elem, &path.index(index), item, errors) {
                Some(item) => items.push(item),
                None => failed = true,
            }
            index += 1;
        }
        if failed {
            return None;
        }

        let built = (self.def.build)(items);
        if built.is_none() {
            errors.add(
                path,
                ConfigErrorKind::FieldTypeMismatch {
                    target: self.shape,
                    message: format!("an element is not a {elem}"),
                },
            );
        }
        built
    }
}
