//! Per-type field layout, computed once and shared.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use log::debug;
use luabind_core::{ConstTypeId, Def, Erased, Shape, StructDef};
use parking_lot::RwLock;

use crate::adapter::Adapter;

/// How to bind one struct type.
pub(crate) struct ClassSchema {
    pub(crate) shape: &'static Shape,
    pub(crate) def: &'static StructDef,
    /// Own fields, in declaration order.
    pub(crate) bindings: Vec<FieldBinding>,
    pub(crate) base: Option<BaseBinding>,
}

/// One field: its key, the adapter for its type, and its default.
pub(crate) struct FieldBinding {
    pub(crate) key: &'static str,
    pub(crate) adapter: Adapter,
    pub(crate) default: Option<fn() -> Erased>,
}

/// The embedded base struct.
pub(crate) struct BaseBinding {
    pub(crate) shape: &'static Shape,
    /// `None` if the base type cannot be built from fields.
    pub(crate) schema: Option<Arc<ClassSchema>>,
}

impl ClassSchema {
    fn build(shape: &'static Shape, def: &'static StructDef) -> Self {
        let bindings = def
            .fields
            .iter()
            .map(|field| FieldBinding {
                key: field.name,
                adapter: Adapter::for_shape((field.shape)()),
                default: field.default,
            })
            .collect();

        let base = def.base.map(|base| {
            let base_shape = (base.shape)();
            let schema = match base_shape.def {
                Def::Object(object) => object.fields.map(|fields| schema_for(base_shape, fields)),
                _ => None,
            };
            BaseBinding {
                shape: base_shape,
                schema,
            }
        });

        debug!(
            "built schema for {shape}: {} fields{}",
            def.fields.len(),
            if base.is_some() { " and a base" } else { "" }
        );

        ClassSchema {
            shape,
            def,
            bindings,
            base,
        }
    }
}

type SchemaCell = Arc<OnceLock<Arc<ClassSchema>>>;

static CACHE: OnceLock<RwLock<HashMap<ConstTypeId, SchemaCell>>> = OnceLock::new();

/// The schema for `shape`, built on first use.
///
/// Concurrent first uses of one type all receive the same schema. No lock
/// is held while a schema is built, so building a schema may look up the
/// schema of its base.
pub(crate) fn schema_for(shape: &'static Shape, def: &'static StructDef) -> Arc<ClassSchema> {
    let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    let cell = {
        let read = cache.read();
        read.get(&shape.id).cloned()
    };
    let cell = match cell {
        Some(cell) => cell,
        None => cache.write().entry(shape.id).or_default().clone(),
    };

    cell.get_or_init(|| Arc::new(ClassSchema::build(shape, def)))
        .clone()
}
