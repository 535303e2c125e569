/// Declares a struct that is bound from a Lua table.
///
/// Each field is read from the key of the same name. A field may declare a
/// default with `= expr`; the default is kept when the key is absent or
/// when the key is present but fails to bind. A field without a default is
/// required unless its type is an `Option`.
///
/// `extends base: Base` embeds another bound struct whose fields are read
/// from the same table. The base becomes the last field of the struct.
///
/// ```
/// use luabind_core::{Bind, Def, bind_struct};
///
/// bind_struct! {
///     pub struct Common {
///         pub name: String,
///     }
/// }
///
/// bind_struct! {
///     pub struct Worker extends common: Common {
///         pub threads: i64 = 4,
///         pub tags: Vec<String>,
///     }
/// }
///
/// let Def::Object(def) = Worker::SHAPE.def else { unreachable!() };
/// let fields = def.fields.unwrap();
/// assert_eq!(fields.fields.len(), 2);
/// assert!(fields.base.is_some());
/// ```
#[macro_export]
macro_rules! bind_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(extends $base:ident : $base_ty:ty)? {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
            $(
                #[doc = "Embedded base, bound from the same table."]
                $vis $base: $base_ty,
            )?
        }

        impl $crate::Bind for $name {
            const SHAPE: &'static $crate::Shape = &$crate::Shape {
                type_identifier: ::core::stringify!($name),
                id: $crate::ConstTypeId::of::<$name>(),
                def: $crate::Def::Object($crate::ObjectDef {
                    natural: ::core::option::Option::None,
                    ctors: &[],
                    fields: ::core::option::Option::Some(&$crate::StructDef {
                        fields: &[
                            $(
                                $crate::FieldDef {
                                    name: ::core::stringify!($field),
                                    shape: $crate::shape_of::<$fty>,
                                    default: $crate::__field_default!($fty $(, $default)?),
                                },
                            )*
                        ],
                        base: $crate::__base_def!($($base, $base_ty)?),
                        assemble: {
                            fn assemble(
                                slots: &mut $crate::Slots,
                            ) -> ::core::result::Result<$crate::Erased, $crate::SlotError> {
                                // Struct literal fields are evaluated in source order.
                                ::core::result::Result::Ok(::std::boxed::Box::new($name {
                                    $( $field: slots.take::<$fty>()?, )*
                                    $( $base: slots.take::<$base_ty>()?, )?
                                }))
                            }
                            assemble
                        },
                    }),
                    display: ::core::option::Option::None,
                }),
            };
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_default {
    ($ty:ty) => {
        ::core::option::Option::None
    };
    ($ty:ty, $default:expr) => {
        ::core::option::Option::Some({
            fn default() -> $crate::Erased {
                let value: $ty = $default;
                ::std::boxed::Box::new(value)
            }
            default
        })
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __base_def {
    () => {
        ::core::option::Option::None
    };
    ($base:ident, $base_ty:ty) => {
        ::core::option::Option::Some($crate::BaseDef {
            name: ::core::stringify!($base),
            shape: $crate::shape_of::<$base_ty>,
        })
    };
}

/// Declares a unit-only enum bound from its variant names.
///
/// Matching is case-sensitive: `Dev` accepts `"Dev"` only.
///
/// ```
/// use luabind_core::{Bind, Def, bind_enum};
///
/// bind_enum! {
///     #[derive(Debug, PartialEq)]
///     pub enum Mode { Dev, Prod }
/// }
///
/// let Def::Enum(def) = Mode::SHAPE.def else { unreachable!() };
/// assert!(def.variant_named("Prod").is_some());
/// assert!(def.variant_named("prod").is_none());
/// ```
#[macro_export]
macro_rules! bind_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $crate::Bind for $name {
            const SHAPE: &'static $crate::Shape = &$crate::Shape {
                type_identifier: ::core::stringify!($name),
                id: $crate::ConstTypeId::of::<$name>(),
                def: $crate::Def::Enum($crate::EnumDef {
                    variants: &[
                        $(
                            $crate::Variant {
                                name: ::core::stringify!($variant),
                                build: {
                                    fn build() -> $crate::Erased {
                                        ::std::boxed::Box::new($name::$variant)
                                    }
                                    build
                                },
                            },
                        )*
                    ],
                }),
            };
        }
    };
}

/// Implements [`Bind`](crate::Bind) for a validated scalar type.
///
/// Each `Scalar => ctor` pair registers a smart constructor taking one of
/// `String`, `i64`, `f64` or `bool` and returning `Result<Self, E>` where
/// `E: Display`. An `Err` is reported as a rejected value with the error's
/// message.
///
/// Prefix the type with `display` to render values with their `Display`
/// impl when they are used as map keys in error paths.
///
/// ```
/// use luabind_core::{Bind, Def, ScalarType, bind_leaf};
///
/// pub struct Port(u16);
///
/// impl Port {
///     fn new(v: i64) -> Result<Self, String> {
///         u16::try_from(v).map(Port).map_err(|_| format!("{v} is not a port"))
///     }
/// }
///
/// bind_leaf!(Port { i64 => Port::new });
///
/// let Def::Object(def) = Port::SHAPE.def else { unreachable!() };
/// assert!(def.ctor_for(ScalarType::Integer).is_some());
/// assert!(def.ctor_for(ScalarType::String).is_none());
/// ```
#[macro_export]
macro_rules! bind_leaf {
    (display $ty:ty { $($arg:ty => $ctor:expr),* $(,)? }) => {
        $crate::__bind_leaf!(
            $ty,
            ::core::option::Option::Some($crate::display_erased::<$ty>),
            $($arg => $ctor),*
        );
    };
    ($ty:ty { $($arg:ty => $ctor:expr),* $(,)? }) => {
        $crate::__bind_leaf!($ty, ::core::option::Option::None, $($arg => $ctor),*);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bind_leaf {
    ($ty:ty, $display:expr, $($arg:ty => $ctor:expr),*) => {
        impl $crate::Bind for $ty {
            const SHAPE: &'static $crate::Shape = &$crate::Shape {
                type_identifier: $crate::type_identifier_of(::core::stringify!($ty)),
                id: $crate::ConstTypeId::of::<$ty>(),
                def: $crate::Def::Object($crate::ObjectDef::leaf(
                    &[
                        $(
                            $crate::ScalarCtor {
                                param: <$arg as $crate::NaturalScalar>::TYPE,
                                call: {
                                    fn call(
                                        scalar: $crate::Scalar,
                                    ) -> ::core::result::Result<$crate::Erased, $crate::CtorError>
                                    {
                                        $crate::invoke_ctor::<$arg, $ty, _, _>(scalar, $ctor)
                                    }
                                    call
                                },
                            },
                        )*
                    ],
                    $display,
                )),
            };
        }
    };
}
