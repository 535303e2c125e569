//! Validated leaf types shared by the integration tests.
#![allow(dead_code)]

use core::fmt;

use luabind::{bind_enum, bind_leaf};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonBlankString(String);

impl NonBlankString {
    pub fn new(s: String) -> Result<Self, &'static str> {
        if s.trim().is_empty() {
            Err("must be non-empty")
        } else {
            Ok(NonBlankString(s))
        }
    }

    pub fn of(s: &str) -> Self {
        NonBlankString(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonBlankString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bind_leaf!(display NonBlankString { String => NonBlankString::new });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositiveInt(i64);

impl PositiveInt {
    pub fn new(v: i64) -> Result<Self, String> {
        if v > 0 {
            Ok(PositiveInt(v))
        } else {
            Err(format!("must be > 0, got {v}"))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PositiveInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bind_leaf!(display PositiveInt { i64 => PositiveInt::new });

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositiveFloat(f64);

impl PositiveFloat {
    pub fn new(v: f64) -> Result<Self, String> {
        if v > 0.0 {
            Ok(PositiveFloat(v))
        } else {
            Err(format!("must be > 0, got {v}"))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

bind_leaf!(PositiveFloat { f64 => PositiveFloat::new });

bind_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum Mode {
        Dev,
        Prod,
    }
}

/// Paths of every error in a report, in order.
pub fn paths(err: &luabind::DeserializeError) -> Vec<&str> {
    err.errors().iter().map(|e| e.path()).collect()
}

/// Expects a binding failure and returns its report.
pub fn deserialize_error<T: luabind::Bind>(src: &str) -> luabind::DeserializeError {
    match luabind::from_str::<T>(src) {
        Ok(_) => panic!("expected {src:?} to fail"),
        Err(luabind::Error::Deserialize(err)) => err,
        Err(other) => panic!("expected a binding error, got {other}"),
    }
}
