use luabind_core::{CtorError, ObjectDef, Shape};
use luabind_path::Path;
use luabind_value::DynamicValue;

use super::ReadResult;
use crate::ConfigErrorKind;
use crate::collector::ErrorCollector;

/// Build a scalar-backed value.
///
/// A scalar of the target's natural type passes through unchanged.
/// Otherwise the constructor registered for the scalar's type is run.
pub(super) fn read_leaf<V: DynamicValue>(
    shape: &'static Shape,
    def: &ObjectDef,
    path: &Path<'_>,
    value: &V,
    errors: &mut ErrorCollector,
) -> ReadResult {
    let Some(scalar) = value.to_scalar() else {
        errors.add(
            path,
            ConfigErrorKind::ScalarExpected {
                got: value.type_name(),
            },
        );
        return None;
    };

    let arg = scalar.scalar_type();
    if def.natural == Some(arg) {
        return Some(scalar.into_erased());
    }

    let Some(ctor) = def.ctor_for(arg) else {
        errors.add(
            path,
            ConfigErrorKind::NoCoercionConstructor { target: shape, arg },
        );
        return None;
    };

    match (ctor.call)(scalar) {
        Ok(value) => Some(value),
        Err(CtorError::Rejected(message)) => {
            errors.add(
                path,
                ConfigErrorKind::ConstructorRejected {
                    target: shape,
                    message,
                },
            );
            None
        }
        Err(CtorError::Failed(message)) => {
            errors.add(
                path,
                ConfigErrorKind::ConstructorInvocationFailed {
                    target: shape,
                    message,
                },
            );
            None
        }
    }
}
