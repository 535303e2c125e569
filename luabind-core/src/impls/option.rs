use crate::{Bind, ConstTypeId, Def, Erased, OptionDef, Shape, shape_of};

fn some<T: 'static>(value: Erased) -> Option<Erased> {
    let value = value.downcast::<T>().ok()?;
    Some(Box::new(Some(*value)))
}

fn none<T: 'static>() -> Erased {
    Box::new(None::<T>)
}

impl<T: Bind> Bind for Option<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "Option",
            id: ConstTypeId::of::<Option<T>>(),
            def: Def::Option(OptionDef {
                t: shape_of::<T>,
                some: some::<T>,
                none: none::<T>,
            }),
        }
    };
}
