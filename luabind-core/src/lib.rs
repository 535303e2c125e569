#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod scalar;
pub use scalar::*;

mod shape;
pub use shape::*;

mod def;
pub use def::*;

mod slots;
pub use slots::{SlotError, Slots};

mod impls;
pub use impls::{build_collection, build_map, display_erased, invoke_ctor};

mod macros;

use core::any::Any;

/// A type-erased value produced while binding.
///
/// Adapters only ever hand these around between a container and the
/// monomorphized functions stored in its [`Shape`], which downcast them
/// back to the concrete type.
pub type Erased = Box<dyn Any>;

/// A type that can be bound from a Lua value.
///
/// The implementation is a single static [`Shape`]. Use [`bind_struct!`],
/// [`bind_enum!`] or [`bind_leaf!`] for your own types; std containers are
/// covered by this crate.
pub trait Bind: Sized + 'static {
    /// The shape describing how to build `Self`.
    const SHAPE: &'static Shape;
}

/// Returns `T::SHAPE`.
///
/// Field descriptors store this as a function pointer so that a type may
/// refer to itself through a container (`children: Vec<Node>`) without
/// creating a cycle between constants.
pub const fn shape_of<T: Bind>() -> &'static Shape {
    T::SHAPE
}
