use core::any::type_name;
use core::fmt;

use crate::Erased;

/// Holds field values while a struct is being bound.
///
/// The binder fills slots by index in any order; the struct's `assemble`
/// function then takes them back out in declaration order.
pub struct Slots {
    values: Vec<Option<Erased>>,
    cursor: usize,
}

impl Slots {
    /// `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self {
            values: (0..len).map(|_| None).collect(),
            cursor: 0,
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Store `value` at `index`, replacing what was there.
    pub fn fill(&mut self, index: usize, value: Erased) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = Some(value);
        }
    }

    /// Whether `index` holds a value.
    pub fn is_filled(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Some(_)))
    }

    /// Whether every slot holds a value.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Take the next slot, in declaration order, as a `T`.
    pub fn take<T: 'static>(&mut self) -> Result<T, SlotError> {
        let index = self.cursor;
        self.cursor += 1;
        let value = self
            .values
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(SlotError::Empty { index })?;
        value
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| SlotError::Mismatch {
                index,
                expected: type_name::<T>(),
            })
    }
}

/// A slot could not be moved into the struct under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// The slot was never filled.
    Empty {
        /// Slot index.
        index: usize,
    },
    /// The slot holds a value of another type.
    Mismatch {
        /// Slot index.
        index: usize,
        /// Expected type name.
        expected: &'static str,
    },
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::Empty { index } => write!(f, "slot {index} is empty"),
            SlotError::Mismatch { index, expected } => {
                write!(f, "slot {index} does not hold a {expected}")
            }
        }
    }
}

impl core::error::Error for SlotError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_follows_declaration_order() {
        let mut slots = Slots::new(2);
        slots.fill(1, Box::new(true));
        assert!(!slots.is_complete());
        slots.fill(0, Box::new(7_i64));
        assert!(slots.is_complete());

        assert_eq!(slots.take::<i64>(), Ok(7));
        assert_eq!(slots.take::<bool>(), Ok(true));
        assert_eq!(slots.take::<bool>(), Err(SlotError::Empty { index: 2 }));
    }

    #[test]
    fn take_reports_type_mismatch() {
        let mut slots = Slots::new(1);
        slots.fill(0, Box::new("x".to_string()));
        assert!(matches!(
            slots.take::<i64>(),
            Err(SlotError::Mismatch { index: 0, .. })
        ));
    }
}
