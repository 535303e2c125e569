use luabind_core::Shape;
use luabind_path::Path;
use luabind_value::DynamicValue;

use super::{ReadResult, TypeAdapter};
use crate::ConfigErrorKind;
use crate::collector::ErrorCollector;

/// Fixed-width primitives are refused whether present or absent.
#[derive(Clone, Copy)]
pub(crate) struct PrimitiveAdapter {
    pub(crate) shape: &'static Shape,
}

impl TypeAdapter for PrimitiveAdapter {
    fn read<V: DynamicValue>(
        &self,
        path: &Path<'_>,
        _value: &V,
        errors: &mut ErrorCollector,
    ) -> ReadResult {
        self.missing(path, errors)
    }

    fn missing(&self, path: &Path<'_>, errors: &mut ErrorCollector) -> ReadResult {
        errors.add(
            path,
            ConfigErrorKind::PrimitiveNotSupported { target: self.shape },
        );
        None
    }
}

/// Generic types no other adapter handles.
#[derive(Clone, Copy)]
pub(crate) struct UnsupportedAdapter {
    pub(crate) shape: &'static Shape,
}

impl TypeAdapter for UnsupportedAdapter {
    fn read<V: DynamicValue>(
        &self,
        path: &Path<'_>,
        _value: &V,
        errors: &mut ErrorCollector,
    ) -> ReadResult {
        self.missing(path, errors)
    }

    fn missing(&self, path: &Path<'_>, errors: &mut ErrorCollector) -> ReadResult {
        errors.add(
            path,
            ConfigErrorKind::UnsupportedGenericShape { target: self.shape },
        );
        None
    }
}
