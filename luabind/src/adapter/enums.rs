use luabind_core::{EnumDef, Scalar, Shape};
use luabind_path::Path;
use luabind_value::DynamicValue;

use super::{ReadResult, TypeAdapter};
use crate::ConfigErrorKind;
use crate::collector::ErrorCollector;

/// Minimum Jaro-Winkler similarity for a variant to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Unit enums, matched by exact variant name.
#[derive(Clone, Copy)]
pub(crate) struct EnumAdapter {
    pub(crate) shape: &'static Shape,
    pub(crate) def: EnumDef,
}

impl TypeAdapter for EnumAdapter {
    fn read<V: DynamicValue>(
        &self,
        path: &Path<'_>,
        value: &V,
        errors: &mut ErrorCollector,
    ) -> ReadResult {
        let Some(Scalar::String(name)) = value.to_scalar() else {
            errors.add(
                path,
                ConfigErrorKind::NonStringEnumInput {
                    got: value.type_name(),
                },
            );
            return None;
        };

        if let Some(variant) = self.def.variant_named(&name) {
            return Some((variant.build)());
        }

        let suggestion = self.suggest(&name);
        errors.add(
            path,
            ConfigErrorKind::UnknownEnumValue {
                target: self.shape,
                value: name,
                expected: self.def.variants.iter().map(|v| v.name).collect(),
                suggestion,
            },
        );
        None
    }
}

impl EnumAdapter {
    fn suggest(&self, name: &str) -> Option<&'static str> {
        self.def
            .variants
            .iter()
            .map(|v| (v.name, strsim::jaro_winkler(name, v.name)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(name, _)| name)
    }
}
