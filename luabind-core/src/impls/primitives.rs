use crate::{Bind, ConstTypeId, Def, Shape};

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Bind for $ty {
                const SHAPE: &'static Shape = &Shape {
                    type_identifier: stringify!($ty),
                    id: ConstTypeId::of::<$ty>(),
                    def: Def::Primitive,
                };
            }
        )*
    };
}

// Lua has no representation for these without a lossy conversion.
impl_primitive!(i8, i16, i32, i128, isize, u8, u16, u32, u64, u128, usize, f32, char);
