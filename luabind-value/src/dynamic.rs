use luabind_core::Scalar;

use crate::{LuaValue, TableKey, ValueKind};

/// Read access to a dynamically typed value tree.
///
/// The binder depends only on this trait, so any tree that can answer
/// these questions can be bound, not just [`LuaValue`].
pub trait DynamicValue: Sized {
    /// The kind of this value.
    fn kind(&self) -> ValueKind;

    /// Whether this is `nil`.
    fn is_nil(&self) -> bool {
        self.kind() == ValueKind::Nil
    }

    /// Whether this is a table.
    fn is_table(&self) -> bool {
        self.kind() == ValueKind::Table
    }

    /// The type name used in error messages (`string`, `number`, ...).
    fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// The scalar this value holds, `None` for `nil` and tables.
    fn to_scalar(&self) -> Option<Scalar>;

    /// `t[name]` for a table. `None` when the key is absent or holds `nil`,
    /// or when this is not a table.
    fn get_field(&self, name: &str) -> Option<&Self>;

    /// `t[i]` for a table, with the same rules as [`get_field`](Self::get_field).
    fn get_index(&self, i: i64) -> Option<&Self>;

    /// Every entry of a table, keys as owned values. Empty for non-tables.
    fn pairs(&self) -> Box<dyn Iterator<Item = (Self, &Self)> + '_>;

    /// The literal text of this value when used as a key.
    fn raw_token(&self) -> String;
}

impl DynamicValue for LuaValue {
    fn kind(&self) -> ValueKind {
        LuaValue::kind(self)
    }

    fn to_scalar(&self) -> Option<Scalar> {
        LuaValue::to_scalar(self)
    }

    fn get_field(&self, name: &str) -> Option<&Self> {
        self.as_table()?.get_str(name)
    }

    fn get_index(&self, i: i64) -> Option<&Self> {
        self.as_table()?.get(&TableKey::Integer(i))
    }

    fn pairs(&self) -> Box<dyn Iterator<Item = (Self, &Self)> + '_> {
        match self {
            LuaValue::Table(t) => Box::new(t.pairs().map(|(k, v)| (k.to_value(), v))),
            _ => Box::new(core::iter::empty()),
        }
    }

    fn raw_token(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LuaTable;

    #[test]
    fn field_access_on_non_tables_is_absent() {
        let v = LuaValue::from("x");
        assert!(v.get_field("x").is_none());
        assert!(v.get_index(1).is_none());
        assert_eq!(v.pairs().count(), 0);
    }

    #[test]
    fn pairs_yield_array_part_first() {
        let mut t = LuaTable::from_items([LuaValue::from("a"), LuaValue::from("b")]);
        t.set("k", 1_i64);
        let v = LuaValue::Table(t);
        let keys: Vec<String> = v.pairs().map(|(k, _)| k.raw_token()).collect();
        assert_eq!(keys, vec!["1", "2", "k"]);
    }

    #[test]
    fn raw_tokens_follow_lua_tostring() {
        assert_eq!(LuaValue::Float(2.5).raw_token(), "2.5");
        assert_eq!(LuaValue::Boolean(true).raw_token(), "true");
        assert_eq!(LuaValue::Integer(-1).raw_token(), "-1");
    }
}
