#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod value;
pub use value::*;

mod table;
pub use table::*;

mod dynamic;
pub use dynamic::DynamicValue;

pub mod error;
pub use error::{SyntaxError, SyntaxErrorKind};

mod lexer;

mod parser;
pub use parser::from_str;
