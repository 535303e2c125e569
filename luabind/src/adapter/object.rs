use luabind_core::{ObjectDef, Shape, Slots, StructDef};
use luabind_path::Path;
use luabind_value::DynamicValue;

use super::leaf::read_leaf;
use super::{ReadResult, TypeAdapter};
use crate::ConfigErrorKind;
use crate::collector::ErrorCollector;
use crate::schema::{ClassSchema, schema_for};

/// Concrete types: built field by field from a table, or from a scalar.
#[derive(Clone, Copy)]
pub(crate) struct ObjectAdapter {
    pub(crate) shape: &'static Shape,
    pub(crate) def: ObjectDef,
}

impl TypeAdapter for ObjectAdapter {
    fn read<V: DynamicValue>(
        &self,
        path: &Path<'_>,
        value: &V,
        errors: &mut ErrorCollector,
    ) -> ReadResult {
        if value.is_table() {
            read_object(self.shape, self.def.fields, path, value, errors)
        } else {
            read_leaf(self.shape, &self.def, path, value, errors)
        }
    }
}

fn read_object<V: DynamicValue>(
    shape: &'static Shape,
    fields: Option<&'static StructDef>,
    path: &Path<'_>,
    value: &V,
    errors: &mut ErrorCollector,
) -> ReadResult {
    let Some(def) = fields else {
        errors.add(path, ConfigErrorKind::NoZeroArgConstructor { target: shape });
        return None;
    };
    let schema = schema_for(shape, def);
    bind_fields(&schema, path, value, errors)
}

/// Fill one slot per field, then the base, then assemble.
///
/// Every field is attempted even after one fails.
fn bind_fields<V: DynamicValue>(
    schema: &ClassSchema,
    path: &Path<'_>,
    value: &V,
    errors: &mut ErrorCollector,
) -> ReadResult {
    let mut slots = Slots::new(schema.def.slot_count());

    for (index, binding) in schema.bindings.iter().enumerate() {
        let field_path = path.field(binding.key);
        match value.get_field(binding.key) {
            None => {
                let missing = match binding.default {
                    Some(default) => Some(default()),
                    None => binding.adapter.missing(&field_path, errors),
                };
                if let Some(v) = missing {
                    slots.fill(index, v);
                }
            }
            Some(raw) => {
                // A default survives a failed read.
                if let Some(default) = binding.default {
                    slots.fill(index, default());
                }
                if let Some(v) = binding.adapter.read(&field_path, raw, errors) {
                    slots.fill(index, v);
                }
            }
        }
    }

    if let Some(base) = &schema.base {
        let bound = match &base.schema {
            Some(base_schema) => bind_fields(base_schema, path, value, errors),
            None => {
                errors.add(
                    path,
                    ConfigErrorKind::NoZeroArgConstructor { target: base.shape },
                );
                None
            }
        };
        if let Some(v) = bound {
            slots.fill(schema.bindings.len(), v);
        }
    }

    if !slots.is_complete() {
        return None;
    }

    match (schema.def.assemble)(&mut slots) {
        Ok(v) => Some(v),
        Err(err) => {
            errors.add(
                path,
                ConfigErrorKind::ObjectInstantiationFailed {
                    target: schema.shape,
                    message: err.to_string(),
                },
            );
            None
        }
    }
}
