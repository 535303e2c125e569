use core::fmt;
use std::collections::HashMap;

use crate::LuaValue;

/// A valid table key: any non-nil scalar except NaN.
///
/// Float keys with an integral value are stored as integers, so `t[1.0]`
/// and `t[1]` are the same entry, as in Lua.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    /// A boolean key.
    Boolean(bool),
    /// An integer key.
    Integer(i64),
    /// A non-integral float key, stored as its bit pattern.
    Float(u64),
    /// A string key.
    String(String),
}

/// Why a value cannot be used as a table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKey {
    /// `nil`
    Nil,
    /// A NaN float.
    NaN,
    /// A table.
    Table,
}

impl fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidKey::Nil => f.write_str("table index is nil"),
            InvalidKey::NaN => f.write_str("table index is NaN"),
            InvalidKey::Table => f.write_str("tables cannot be used as table keys"),
        }
    }
}

impl core::error::Error for InvalidKey {}

impl TableKey {
    /// A float key, normalised to an integer key when integral.
    pub fn float(x: f64) -> Result<Self, InvalidKey> {
        if x.is_nan() {
            return Err(InvalidKey::NaN);
        }
        // `i64::MAX as f64` rounds up to 2^63, which is out of range.
        if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
            Ok(TableKey::Integer(x as i64))
        } else {
            Ok(TableKey::Float(x.to_bits()))
        }
    }

    /// Convert a value into a key.
    pub fn from_value(value: &LuaValue) -> Result<Self, InvalidKey> {
        match value {
            LuaValue::Nil => Err(InvalidKey::Nil),
            LuaValue::Boolean(b) => Ok(TableKey::Boolean(*b)),
            LuaValue::Integer(i) => Ok(TableKey::Integer(*i)),
            LuaValue::Float(x) => TableKey::float(*x),
            LuaValue::String(s) => Ok(TableKey::String(s.clone())),
            LuaValue::Table(_) => Err(InvalidKey::Table),
        }
    }

    /// The key as a value.
    pub fn to_value(&self) -> LuaValue {
        match self {
            TableKey::Boolean(b) => LuaValue::Boolean(*b),
            TableKey::Integer(i) => LuaValue::Integer(*i),
            TableKey::Float(bits) => LuaValue::Float(f64::from_bits(*bits)),
            TableKey::String(s) => LuaValue::String(s.clone()),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl From<&str> for TableKey {
    fn from(s: &str) -> Self {
        TableKey::String(s.to_string())
    }
}

impl From<String> for TableKey {
    fn from(s: String) -> Self {
        TableKey::String(s)
    }
}

impl From<i64> for TableKey {
    fn from(i: i64) -> Self {
        TableKey::Integer(i)
    }
}

impl From<bool> for TableKey {
    fn from(b: bool) -> Self {
        TableKey::Boolean(b)
    }
}

/// A Lua table.
///
/// Keys `1..=n` with no gap live in the array part; everything else lives
/// in the hash part, whose iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LuaTable {
    array: Vec<LuaValue>,
    hash: HashMap<TableKey, LuaValue>,
}

impl LuaTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table whose array part holds `items`, in order.
    ///
    /// `nil` items leave a gap: the array view ends before the first one.
    pub fn from_items(items: impl IntoIterator<Item = LuaValue>) -> Self {
        let mut table = Self::new();
        for (i, item) in items.into_iter().enumerate() {
            table.set(TableKey::Integer(i as i64 + 1), item);
        }
        table
    }

    /// Assign `t[key] = value`. Assigning `nil` removes the key.
    pub fn set(&mut self, key: impl Into<TableKey>, value: impl Into<LuaValue>) {
        let key = key.into();
        let value = value.into();

        if let TableKey::Integer(i) = key
            && let Some(slot) = self.array_slot(i)
        {
            if value.is_nil() {
                self.truncate_array(slot);
            } else {
                self.array[slot] = value;
            }
            return;
        }

        if value.is_nil() {
            self.hash.remove(&key);
            return;
        }

        if key == TableKey::Integer(self.array.len() as i64 + 1) {
            self.array.push(value);
            self.migrate_to_array();
        } else {
            self.hash.insert(key, value);
        }
    }

    /// Read `t[key]`. Absent keys read as `None`.
    pub fn get(&self, key: &TableKey) -> Option<&LuaValue> {
        if let TableKey::Integer(i) = key
            && let Some(slot) = self.array_slot(*i)
        {
            return self.array.get(slot);
        }
        self.hash.get(key)
    }

    /// Read `t[name]`.
    pub fn get_str(&self, name: &str) -> Option<&LuaValue> {
        self.hash.get(&TableKey::String(name.to_string()))
    }

    /// Read `t[i]`.
    pub fn get_int(&self, i: i64) -> Option<&LuaValue> {
        self.get(&TableKey::Integer(i))
    }

    /// The length of the array view: the last index of `1..` before the
    /// first absent one.
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Whether the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.array.is_empty() && self.hash.is_empty()
    }

    /// Number of entries in both parts.
    pub fn entry_count(&self) -> usize {
        self.array.len() + self.hash.len()
    }

    /// The array view, `t[1]..t[len]`.
    pub fn items(&self) -> &[LuaValue] {
        &self.array
    }

    /// All entries: the array part in order, then the hash part in
    /// unspecified order.
    pub fn pairs(&self) -> impl Iterator<Item = (TableKey, &LuaValue)> + '_ {
        self.array
            .iter()
            .enumerate()
            .map(|(i, v)| (TableKey::Integer(i as i64 + 1), v))
            .chain(self.hash.iter().map(|(k, v)| (k.clone(), v)))
    }

    fn array_slot(&self, i: i64) -> Option<usize> {
        let slot = usize::try_from(i).ok()?.checked_sub(1)?;
        (slot < self.array.len()).then_some(slot)
    }

    /// Remove `array[slot]`; the elements after it move to the hash part.
    fn truncate_array(&mut self, slot: usize) {
        let tail = self.array.split_off(slot);
        for (offset, value) in tail.into_iter().enumerate().skip(1) {
            self.hash
                .insert(TableKey::Integer((slot + offset) as i64 + 1), value);
        }
    }

    fn migrate_to_array(&mut self) {
        while let Some(next) = self
            .hash
            .remove(&TableKey::Integer(self.array.len() as i64 + 1))
        {
            self.array.push(next);
        }
    }
}

impl FromIterator<(TableKey, LuaValue)> for LuaTable {
    fn from_iter<I: IntoIterator<Item = (TableKey, LuaValue)>>(iter: I) -> Self {
        let mut table = LuaTable::new();
        for (k, v) in iter {
            table.set(k, v);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_integer_keys_form_the_array_part() {
        let mut t = LuaTable::new();
        t.set(2_i64, "b");
        t.set(3_i64, "c");
        assert_eq!(t.len(), 0);
        t.set(1_i64, "a");
        assert_eq!(t.len(), 3);
        assert_eq!(t.get_int(3), Some(&LuaValue::from("c")));
    }

    #[test]
    fn nil_removes_and_cuts_the_array_view() {
        let mut t = LuaTable::from_items(["a", "b", "c"].map(LuaValue::from));
        t.set(2_i64, LuaValue::Nil);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get_int(2), None);
        assert_eq!(t.get_int(3), Some(&LuaValue::from("c")));
        assert_eq!(t.entry_count(), 2);
    }

    #[test]
    fn integral_float_keys_are_integer_keys() {
        assert_eq!(TableKey::float(2.0), Ok(TableKey::Integer(2)));
        assert!(matches!(TableKey::float(2.5), Ok(TableKey::Float(_))));
        assert_eq!(TableKey::float(f64::NAN), Err(InvalidKey::NaN));
    }

    #[test]
    fn string_and_integer_keys_are_distinct() {
        let mut t = LuaTable::new();
        t.set("1", true);
        t.set(1_i64, false);
        assert_eq!(t.get_str("1"), Some(&LuaValue::Boolean(true)));
        assert_eq!(t.get_int(1), Some(&LuaValue::Boolean(false)));
    }
}
