use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::{
    Bind, CollectionKind, ConstTypeId, Def, ListDef, MapDef, Shape, build_collection, build_map,
    shape_of,
};

impl<T: Bind + Eq + Hash> Bind for IndexSet<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "IndexSet",
            id: ConstTypeId::of::<IndexSet<T>>(),
            def: Def::List(ListDef {
                kind: CollectionKind::Set,
                t: shape_of::<T>,
                build: build_collection::<IndexSet<T>, T>,
            }),
        }
    };
}

impl<K: Bind + Eq + Hash, V: Bind> Bind for IndexMap<K, V> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "IndexMap",
            id: ConstTypeId::of::<IndexMap<K, V>>(),
            def: Def::Map(MapDef {
                k: shape_of::<K>,
                v: shape_of::<V>,
                build: build_map::<IndexMap<K, V>, K, V>,
            }),
        }
    };
}
