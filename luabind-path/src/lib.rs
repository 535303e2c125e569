#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use core::fmt;

/// A single step from a value into one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// A struct field, rendered `.name`.
    Field(&'static str),
    /// A 1-based array position, rendered `[i]`.
    Index(usize),
    /// A map entry under its bound key, rendered `[key]`.
    Key(String),
    /// A map entry whose key failed to bind, rendered `{raw}`.
    RawKey(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field(name) => write!(f, ".{name}"),
            PathStep::Index(i) => write!(f, "[{i}]"),
            PathStep::Key(key) => write!(f, "[{key}]"),
            PathStep::RawKey(raw) => write!(f, "{{{raw}}}"),
        }
    }
}

/// An immutable location inside the input value.
///
/// Children borrow their parent, so a path lives exactly as long as the
/// traversal frame that created it and nothing is rendered until an error
/// is actually reported.
#[derive(Debug, Clone)]
pub struct Path<'a> {
    parent: Option<&'a Path<'a>>,
    step: Option<PathStep>,
}

impl<'a> Path<'a> {
    /// The root of the input, rendered `$`.
    pub const fn root() -> Path<'static> {
        Path {
            parent: None,
            step: None,
        }
    }

    /// Whether this is the root.
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    fn push(&'a self, step: PathStep) -> Path<'a> {
        Path {
            parent: Some(self),
            step: Some(step),
        }
    }

    /// The child at struct field `name`.
    pub fn field(&'a self, name: &'static str) -> Path<'a> {
        self.push(PathStep::Field(name))
    }

    /// The child at 1-based array position `i`.
    pub fn index(&'a self, i: usize) -> Path<'a> {
        self.push(PathStep::Index(i))
    }

    /// The map entry under its bound key.
    pub fn key(&'a self, key: impl Into<String>) -> Path<'a> {
        self.push(PathStep::Key(key.into()))
    }

    /// The map entry under a key that failed to bind.
    pub fn raw_key(&'a self, raw: impl Into<String>) -> Path<'a> {
        self.push(PathStep::RawKey(raw.into()))
    }

    /// The last step, `None` at the root.
    pub fn last(&self) -> Option<&PathStep> {
        self.step.as_ref()
    }

    /// The steps from the root to here.
    pub fn steps(&self) -> Vec<&PathStep> {
        let mut steps = Vec::new();
        let mut cur = Some(self);
        while let Some(path) = cur {
            if let Some(step) = &path.step {
                steps.push(step);
            }
            cur = path.parent;
        }
        steps.reverse();
        steps
    }

    /// Render the path, e.g. `$.servers[2].limits[cpu]`.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in self.steps() {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_as_dollar() {
        assert_eq!(Path::root().format(), "$");
        assert!(Path::root().is_root());
    }

    #[test]
    fn parent_is_unchanged_by_children() {
        let root = Path::root();
        let servers = root.field("servers");
        let first = servers.index(1);
        let second = servers.index(2);
        assert_eq!(first.format(), "$.servers[1]");
        assert_eq!(second.format(), "$.servers[2]");
        assert_eq!(servers.format(), "$.servers");
    }
}
