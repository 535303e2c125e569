use std::rc::Rc;
use std::sync::Arc;

use crate::{Bind, ConstTypeId, Def, GenericDef, Shape, shape_of};

macro_rules! impl_wrapper {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<T: Bind> Bind for $wrapper<T> {
                const SHAPE: &'static Shape = &const {
                    Shape {
                        type_identifier: stringify!($wrapper),
                        id: ConstTypeId::of::<$wrapper<T>>(),
                        def: Def::Generic(GenericDef { t: shape_of::<T> }),
                    }
                };
            }
        )*
    };
}

impl_wrapper!(Box, Rc, Arc);
