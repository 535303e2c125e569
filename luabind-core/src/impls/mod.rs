mod natural;

mod primitives;

mod option;

mod list;

mod map;

mod pointers;

#[cfg(feature = "indexmap")]
mod indexmap;

use core::any::Any;
use core::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::{CtorError, Erased, NaturalScalar, Scalar};

/// A [`DisplayFn`](crate::DisplayFn) for `T`.
///
/// Fails with [`fmt::Error`] if `value` is not a `T`.
pub fn display_erased<T: fmt::Display + 'static>(
    value: &dyn Any,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => fmt::Display::fmt(value, f),
        None => Err(fmt::Error),
    }
}

/// Downcasts every element to `T` and collects them into `C`.
///
/// Returns `None` as soon as an element has another type.
pub fn build_collection<C, T>(items: Vec<Erased>) -> Option<Erased>
where
    C: FromIterator<T> + 'static,
    T: 'static,
{
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(*item.downcast::<T>().ok()?);
    }
    Some(Box::new(out.into_iter().collect::<C>()))
}

/// Downcasts every entry to `(K, V)` and collects them into `M`.
pub fn build_map<M, K, V>(entries: Vec<(Erased, Erased)>) -> Option<Erased>
where
    M: FromIterator<(K, V)> + 'static,
    K: 'static,
    V: 'static,
{
    let mut out = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        out.push((*k.downcast::<K>().ok()?, *v.downcast::<V>().ok()?));
    }
    Some(Box::new(out.into_iter().collect::<M>()))
}

/// Runs a smart constructor against a scalar.
///
/// An `Err` from the constructor is a rejection of the value; a scalar of
/// the wrong type or a panic inside the constructor is a failure to invoke it.
#[doc(hidden)]
pub fn invoke_ctor<A, T, E, F>(scalar: Scalar, ctor: F) -> Result<Erased, CtorError>
where
    A: NaturalScalar,
    T: 'static,
    E: fmt::Display,
    F: FnOnce(A) -> Result<T, E>,
{
    let found = scalar.scalar_type();
    let arg = A::from_scalar(scalar).ok_or_else(|| {
        CtorError::Failed(format!("expected a {} argument, got a {found}", A::TYPE))
    })?;
    match catch_unwind(AssertUnwindSafe(|| ctor(arg))) {
        Ok(Ok(value)) => Ok(Box::new(value)),
        Ok(Err(err)) => Err(CtorError::Rejected(err.to_string())),
        Err(payload) => Err(CtorError::Failed(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "constructor panicked".to_string()
    }
}
