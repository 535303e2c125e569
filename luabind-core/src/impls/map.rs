use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::{Bind, ConstTypeId, Def, MapDef, Shape, build_map, shape_of};

impl<K: Bind + Eq + Hash, V: Bind> Bind for HashMap<K, V> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "HashMap",
            id: ConstTypeId::of::<HashMap<K, V>>(),
            def: Def::Map(MapDef {
                k: shape_of::<K>,
                v: shape_of::<V>,
                build: build_map::<HashMap<K, V>, K, V>,
            }),
        }
    };
}

impl<K: Bind + Ord, V: Bind> Bind for BTreeMap<K, V> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "BTreeMap",
            id: ConstTypeId::of::<BTreeMap<K, V>>(),
            def: Def::Map(MapDef {
                k: shape_of::<K>,
                v: shape_of::<V>,
                build: build_map::<BTreeMap<K, V>, K, V>,
            }),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_arguments() {
        assert_eq!(
            <HashMap<String, Vec<i64>>>::SHAPE.to_string(),
            "HashMap<String, Vec<i64>>"
        );
        assert_eq!(<BTreeMap<i64, bool>>::SHAPE.to_string(), "BTreeMap<i64, bool>");
    }
}
