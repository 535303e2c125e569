use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;

use crate::{Bind, CollectionKind, ConstTypeId, Def, ListDef, Shape, build_collection, shape_of};

impl<T: Bind> Bind for Vec<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "Vec",
            id: ConstTypeId::of::<Vec<T>>(),
            def: Def::List(ListDef {
                kind: CollectionKind::Sequence,
                t: shape_of::<T>,
                build: build_collection::<Vec<T>, T>,
            }),
        }
    };
}

impl<T: Bind> Bind for VecDeque<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "VecDeque",
            id: ConstTypeId::of::<VecDeque<T>>(),
            def: Def::List(ListDef {
                kind: CollectionKind::Sequence,
                t: shape_of::<T>,
                build: build_collection::<VecDeque<T>, T>,
            }),
        }
    };
}

impl<T: Bind + Eq + Hash> Bind for HashSet<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "HashSet",
            id: ConstTypeId::of::<HashSet<T>>(),
            def: Def::List(ListDef {
                kind: CollectionKind::Set,
                t: shape_of::<T>,
                build: build_collection::<HashSet<T>, T>,
            }),
        }
    };
}

impl<T: Bind + Ord> Bind for BTreeSet<T> {
    const SHAPE: &'static Shape = &const {
        Shape {
            type_identifier: "BTreeSet",
            id: ConstTypeId::of::<BTreeSet<T>>(),
            def: Def::List(ListDef {
                kind: CollectionKind::Set,
                t: shape_of::<T>,
                build: build_collection::<BTreeSet<T>, T>,
            }),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Erased;

    #[test]
    fn set_build_collapses_duplicates() {
        let Def::List(def) = <HashSet<i64>>::SHAPE.def else {
            panic!("HashSet is a list");
        };
        assert_eq!(def.kind, CollectionKind::Set);
        let items: Vec<Erased> = vec![Box::new(1_i64), Box::new(1_i64), Box::new(2_i64)];
        let set = (def.build)(items).unwrap().downcast::<HashSet<i64>>().unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_includes_arguments() {
        assert_eq!(<Vec<String>>::SHAPE.to_string(), "Vec<String>");
        assert_eq!(<BTreeSet<Vec<i64>>>::SHAPE.to_string(), "BTreeSet<Vec<i64>>");
        assert!(<Vec<String>>::SHAPE.is_generic());
        assert!(!String::SHAPE.is_generic());
    }
}
