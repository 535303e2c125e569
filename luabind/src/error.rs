//! Errors produced while binding.

use core::fmt::{self, Display};
use std::path::PathBuf;

use luabind_core::{Def, ScalarType, Shape};
use luabind_value::SyntaxError;
use miette::Diagnostic;

/// Which generic argument of a container was not a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericRole {
    /// The `T` of `Option<T>`.
    OptionalInner,
    /// The element of a sequence or set.
    CollectionElement,
    /// The key of a map.
    MapKey,
    /// The value of a map.
    MapValue,
}

impl Display for GenericRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenericRole::OptionalInner => "Optional inner type",
            GenericRole::CollectionElement => "Collection element type",
            GenericRole::MapKey => "Map key type",
            GenericRole::MapValue => "Map value type",
        })
    }
}

/// Classification of [`ConfigError`]s.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    /// A required field is absent and has no default.
    MissingRequiredField,

    /// A leaf type was given a `nil` or a table.
    ScalarExpected {
        /// Lua type name of the input.
        got: &'static str,
    },

    /// The target type has no constructor taking this kind of scalar.
    NoCoercionConstructor {
        /// Target type.
        target: &'static Shape,
        /// Scalar type of the input.
        arg: ScalarType,
    },

    /// The constructor refused the value.
    ConstructorRejected {
        /// Target type.
        target: &'static Shape,
        /// The constructor's error message.
        message: String,
    },

    /// The constructor could not be invoked.
    ConstructorInvocationFailed {
        /// Target type.
        target: &'static Shape,
        /// What went wrong.
        message: String,
    },

    /// An enum was given something other than a string.
    NonStringEnumInput {
        /// Lua type name of the input.
        got: &'static str,
    },

    /// No enum variant has this name.
    UnknownEnumValue {
        /// Target enum.
        target: &'static Shape,
        /// The string given.
        value: String,
        /// Every accepted name, in declaration order.
        expected: Vec<&'static str>,
        /// The closest accepted name, if one is close enough.
        suggestion: Option<&'static str>,
    },

    /// A sequence, set or map was given something other than a table.
    TableExpected {
        /// Target container.
        target: &'static Shape,
        /// Lua type name of the input.
        got: &'static str,
    },

    /// A container argument is itself generic.
    NonConcreteGenericArgument {
        /// Which argument.
        role: GenericRole,
        /// The offending argument type.
        arg: &'static Shape,
    },

    /// A table was given for a type that cannot be built from fields.
    NoZeroArgConstructor {
        /// Target type.
        target: &'static Shape,
    },

    /// Assembling a struct from its bound fields failed.
    ObjectInstantiationFailed {
        /// Target type.
        target: &'static Shape,
        /// What went wrong.
        message: String,
    },

    /// The target is a fixed-width primitive such as `i32`.
    PrimitiveNotSupported {
        /// Target type.
        target: &'static Shape,
    },

    /// The target is a generic type no adapter handles (`Box<T>`, ...).
    UnsupportedGenericShape {
        /// Target type.
        target: &'static Shape,
    },

    /// A bound value did not have the type its container expected.
    FieldTypeMismatch {
        /// Type that was expected.
        target: &'static Shape,
        /// What went wrong.
        message: String,
    },
}

impl ConfigErrorKind {
    /// Returns an error code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigErrorKind::MissingRequiredField => "luabind::missing_field",
            ConfigErrorKind::ScalarExpected { .. } => "luabind::scalar_expected",
            ConfigErrorKind::NoCoercionConstructor { .. } => "luabind::no_constructor",
            ConfigErrorKind::ConstructorRejected { .. } => "luabind::rejected",
            ConfigErrorKind::ConstructorInvocationFailed { .. } => "luabind::constructor_failed",
            ConfigErrorKind::NonStringEnumInput { .. } => "luabind::enum_not_string",
            ConfigErrorKind::UnknownEnumValue { .. } => "luabind::unknown_variant",
            ConfigErrorKind::TableExpected { .. } => "luabind::table_expected",
            ConfigErrorKind::NonConcreteGenericArgument { .. } => "luabind::nested_generic",
            ConfigErrorKind::NoZeroArgConstructor { .. } => "luabind::not_a_struct",
            ConfigErrorKind::ObjectInstantiationFailed { .. } => "luabind::instantiation_failed",
            ConfigErrorKind::PrimitiveNotSupported { .. } => "luabind::primitive",
            ConfigErrorKind::UnsupportedGenericShape { .. } => "luabind::unsupported_type",
            ConfigErrorKind::FieldTypeMismatch { .. } => "luabind::type_mismatch",
        }
    }

    fn help(&self) -> Option<String> {
        match self {
            ConfigErrorKind::UnknownEnumValue {
                expected,
                suggestion: Some(suggestion),
                ..
            } => Some(format!(
                "did you mean '{suggestion}'? expected one of: {}",
                expected.join(", ")
            )),
            ConfigErrorKind::UnknownEnumValue { expected, .. } => {
                Some(format!("expected one of: {}", expected.join(", ")))
            }
            ConfigErrorKind::PrimitiveNotSupported { .. } => {
                Some("use i64, f64, bool, or a bind_leaf! newtype".to_string())
            }
            ConfigErrorKind::NonConcreteGenericArgument { .. } => {
                Some("wrap the inner container in a bind_struct! type".to_string())
            }
            _ => None,
        }
    }
}

impl Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErrorKind::MissingRequiredField => {
                write!(f, "Missing required field (no default value).")
            }
            ConfigErrorKind::ScalarExpected { got } => {
                write!(f, "Expected scalar (string/number/boolean), got: {got}")
            }
            ConfigErrorKind::NoCoercionConstructor { target, arg } => {
                write!(f, "No 1-arg constructor on {target} accepting {arg}")
            }
            ConfigErrorKind::ConstructorRejected { target, message } => {
                write!(f, "Value rejected by {target} constructor: {message}")
            }
            ConfigErrorKind::ConstructorInvocationFailed { target, message } => {
                write!(f, "Failed calling constructor for {target}: {message}")
            }
            ConfigErrorKind::NonStringEnumInput { got } => {
                write!(f, "Enum expects string name, got: {got}")
            }
            ConfigErrorKind::UnknownEnumValue { target, value, .. } => {
                write!(f, "Unknown enum value '{value}' for {target}")
            }
            ConfigErrorKind::TableExpected { target, got } => match target.def {
                Def::Map(_) => {
                    write!(f, "Expected table for {}, got: {got}", target.type_identifier)
                }
                _ => write!(
                    f,
                    "Expected table/array for {}, got: {got}",
                    target.type_identifier
                ),
            },
            ConfigErrorKind::NonConcreteGenericArgument { role, arg } => {
                write!(f, "{role} must be a concrete type (no nested generics). Got: {arg}")
            }
            ConfigErrorKind::NoZeroArgConstructor { target } => {
                write!(f, "No no-arg constructor for nested object type: {target}")
            }
            ConfigErrorKind::ObjectInstantiationFailed { target, message } => {
                write!(f, "Failed to instantiate {target}: {message}")
            }
            ConfigErrorKind::PrimitiveNotSupported { target } => {
                write!(f, "Primitive field types are not supported: {target}")
            }
            ConfigErrorKind::UnsupportedGenericShape { target } => {
                write!(f, "Unsupported parameterized type: {target}")
            }
            ConfigErrorKind::FieldTypeMismatch { target, message } => {
                write!(f, "Failed to set field (type mismatch): expected {target}, {message}")
            }
        }
    }
}

/// One binding problem, located by its path in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    path: String,
    kind: ConfigErrorKind,
}

impl ConfigError {
    pub(crate) fn new(path: impl Into<String>, kind: ConfigErrorKind) -> Self {
        ConfigError {
            path: path.into(),
            kind,
        }
    }

    /// Where the problem is, e.g. `$.servers[2].host`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// What the problem is.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }

    /// The human-readable message, without the path.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

impl core::error::Error for ConfigError {}

impl Diagnostic for ConfigError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.kind
            .help()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

/// Every problem found while binding one value, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeserializeError {
    errors: Vec<ConfigError>,
}

impl DeserializeError {
    pub(crate) fn new(errors: Vec<ConfigError>) -> Self {
        DeserializeError { errors }
    }

    /// The individual problems. Never empty.
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// Consume the report, returning the individual problems.
    pub fn into_errors(self) -> Vec<ConfigError> {
        self.errors
    }
}

/// One header line, then ` - <path>: <message>` per problem.
impl Display for DeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config deserialization failed:")?;
        for error in &self.errors {
            write!(f, "\n - {error}")?;
        }
        Ok(())
    }
}

impl core::error::Error for DeserializeError {}

impl Diagnostic for DeserializeError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new("luabind::deserialize"))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        Some(Box::new(
            self.errors.iter().map(|e| e as &dyn Diagnostic),
        ))
    }
}

/// Anything that can go wrong between a source file and a bound value.
#[derive(Debug)]
pub enum Error {
    /// The source is not a literal Lua chunk.
    Syntax(SyntaxError),
    /// The value does not fit the target type.
    Deserialize(DeserializeError),
    /// The source file could not be read.
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax(err)
    }
}

impl From<DeserializeError> for Error {
    fn from(err: DeserializeError) -> Self {
        Error::Deserialize(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(err) => write!(f, "{err}"),
            Error::Deserialize(err) => write!(f, "{err}"),
            Error::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::Deserialize(err) => Some(err),
            Error::Io { source, .. } => Some(source),
        }
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match self {
            Error::Syntax(err) => err.code(),
            Error::Deserialize(err) => err.code(),
            Error::Io { .. } => Some(Box::new("luabind::io")),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match self {
            Error::Syntax(err) => err.help(),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Error::Syntax(err) => err.source_code(),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        match self {
            Error::Syntax(err) => err.labels(),
            _ => None,
        }
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        match self {
            Error::Deserialize(err) => err.related(),
            _ => None,
        }
    }
}
