use log::debug;
use luabind_path::Path;

use crate::{ConfigError, ConfigErrorKind, DeserializeError};

/// Accumulates binding problems for one top-level call.
///
/// Adapters never stop at the first problem: they record it here and keep
/// going, so one run reports everything wrong with the input.
#[derive(Debug, Default)]
pub(crate) struct ErrorCollector {
    errors: Vec<ConfigError>,
}

impl ErrorCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, path: &Path<'_>, kind: ConfigErrorKind) {
        let error = ConfigError::new(path.format(), kind);
        debug!("{error}");
        self.errors.push(error);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Err` with every recorded problem, or `Ok` if there were none.
    pub(crate) fn finish(self) -> Result<(), DeserializeError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DeserializeError::new(self.errors))
        }
    }
}
