use crate::{Bind, ConstTypeId, Def, ObjectDef, ScalarType, Shape, display_erased};

macro_rules! impl_natural {
    ($ty:ty, $name:literal, $scalar:expr) => {
        impl Bind for $ty {
            const SHAPE: &'static Shape = &Shape {
                type_identifier: $name,
                id: ConstTypeId::of::<$ty>(),
                def: Def::Object(ObjectDef {
                    natural: Some($scalar),
                    ctors: &[],
                    fields: None,
                    display: Some(display_erased::<$ty>),
                }),
            };
        }
    };
}

impl_natural!(String, "String", ScalarType::String);
impl_natural!(i64, "i64", ScalarType::Integer);
impl_natural!(f64, "f64", ScalarType::Float);
impl_natural!(bool, "bool", ScalarType::Boolean);
