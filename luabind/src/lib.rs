#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use luabind_core::*;
pub use luabind_path::{Path, PathStep};
pub use luabind_value::{
    DynamicValue, InvalidKey, LuaTable, LuaValue, SyntaxError, SyntaxErrorKind, TableKey,
    ValueKind,
};

mod error;
pub use error::*;

mod adapter;
mod collector;
mod schema;

use adapter::read_value;
use collector::ErrorCollector;

/// Read a literal Lua chunk into a [`LuaValue`] without binding it.
pub use luabind_value::from_str as parse;

/// Bind an already-read value to `T`.
///
/// The whole value is always visited: the error lists every problem found,
/// each with the path where it was found.
///
/// ```
/// use luabind::{LuaValue, bind_struct, from_value};
///
/// bind_struct! {
///     #[derive(Debug)]
///     pub struct Server {
///         pub host: String,
///         pub port: i64 = 8080,
///     }
/// }
///
/// let value = luabind::parse("return { host = 'example.org' }").unwrap();
/// let server: Server = from_value(&value).unwrap();
/// assert_eq!(server.host, "example.org");
/// assert_eq!(server.port, 8080);
///
/// let err = from_value::<Server, _>(&LuaValue::from(42_i64)).unwrap_err();
/// assert_eq!(err.errors()[0].path(), "$");
/// ```
pub fn from_value<T: Bind, V: DynamicValue>(value: &V) -> Result<T, DeserializeError> {
    let mut errors = ErrorCollector::new();
    let root = Path::root();
    let bound = read_value(T::SHAPE, &root, value, &mut errors);
    errors.finish()?;

    match bound.map(|v| v.downcast::<T>()) {
        Some(Ok(v)) => Ok(*v),
        Some(Err(_)) => Err(mismatch::<T>("the bound value has another type")),
        None => Err(mismatch::<T>("no value was produced")),
    }
}

fn mismatch<T: Bind>(message: &str) -> DeserializeError {
    DeserializeError::new(vec![ConfigError::new(
        Path::root().format(),
        ConfigErrorKind::FieldTypeMismatch {
            target: T::SHAPE,
            message: message.to_string(),
        },
    )])
}

/// Read a literal Lua chunk and bind it to `T`.
///
/// ```
/// use luabind::{bind_enum, bind_struct};
///
/// bind_enum! {
///     #[derive(Debug, PartialEq)]
///     pub enum Mode { Dev, Prod }
/// }
///
/// bind_struct! {
///     pub struct App {
///         pub mode: Mode,
///         pub workers: Vec<String>,
///     }
/// }
///
/// let app: App = luabind::from_str("return { mode = 'Prod', workers = { 'a', 'b' } }").unwrap();
/// assert_eq!(app.mode, Mode::Prod);
/// assert_eq!(app.workers, ["a", "b"]);
/// ```
pub fn from_str<T: Bind>(src: &str) -> Result<T, Error> {
    let value = luabind_value::from_str(src)?;
    Ok(from_value(&value)?)
}

/// Read a Lua configuration file and bind it to `T`.
pub fn from_path<T: Bind>(path: impl AsRef<std::path::Path>) -> Result<T, Error> {
    let path = path.as_ref();
    log::debug!("reading {}", path.display());
    let src = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&src)
}
