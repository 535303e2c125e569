//! Sequences, sets, maps and optionals.

mod fixtures;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use fixtures::{Mode, NonBlankString, PositiveInt, deserialize_error, paths};
use indexmap::{IndexMap, IndexSet};
use luabind::{ConfigErrorKind, GenericRole, bind_struct};

bind_struct! {
    #[derive(Debug)]
    struct Lists {
        tags: Vec<NonBlankString>,
        queue: VecDeque<i64> = VecDeque::new(),
        unique: HashSet<NonBlankString> = HashSet::new(),
        sorted: BTreeSet<PositiveInt> = BTreeSet::new(),
        ordered: IndexSet<String> = IndexSet::new(),
    }
}

#[test]
fn sequences_keep_input_order() {
    luabind_testhelpers::setup();

    let l: Lists = luabind::from_str("return { tags = { 'c', 'a', 'b', 'a' }, queue = { 3, 1, 2 } }").unwrap();
    let tags: Vec<&str> = l.tags.iter().map(|t| t.as_str()).collect();
    assert_eq!(tags, ["c", "a", "b", "a"]);
    assert_eq!(l.queue, [3, 1, 2]);
}

#[test]
fn sets_collapse_duplicates() {
    luabind_testhelpers::setup();

    let l: Lists = luabind::from_str(
        "return { tags = {}, unique = { 'x', 'y', 'x' }, sorted = { 3, 1, 3 }, ordered = { 'b', 'a', 'b' } }",
    )
    .unwrap();
    assert_eq!(l.unique.len(), 2);
    let sorted: Vec<i64> = l.sorted.iter().map(|p| p.get()).collect();
    assert_eq!(sorted, [1, 3]);
    let ordered: Vec<&str> = l.ordered.iter().map(String::as_str).collect();
    assert_eq!(ordered, ["b", "a"]);
}

#[test]
fn element_errors_are_indexed_from_one() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Lists>("return { tags = { 'ok', '', 'fine', 7 } }");
    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $.tags[2]: Value rejected by NonBlankString constructor: must be non-empty
     - $.tags[4]: No 1-arg constructor on NonBlankString accepting i64
    ");
}

#[test]
fn the_array_view_ends_at_the_first_gap() {
    luabind_testhelpers::setup();

    let l: Lists = luabind::from_str("return { tags = { 'a', 'b', [4] = 'd', name = 'x' } }").unwrap();
    assert_eq!(l.tags.len(), 2);
}

#[test]
fn a_list_needs_a_table() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Lists>("return { tags = 'a,b' }");
    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $.tags: Expected table/array for Vec, got: string
    ");
}

bind_struct! {
    #[derive(Debug)]
    struct Limits {
        limits: HashMap<NonBlankString, PositiveInt>,
    }
}

bind_struct! {
    #[derive(Debug)]
    struct ByMode {
        by_mode: BTreeMap<Mode, i64> = BTreeMap::new(),
        by_port: IndexMap<PositiveInt, String> = IndexMap::new(),
    }
}

#[test]
fn maps_bind_every_entry() {
    luabind_testhelpers::setup();

    let l: Limits = luabind::from_str("return { limits = { cpu = 2, mem = 512 } }").unwrap();
    assert_eq!(l.limits.len(), 2);
    assert_eq!(l.limits[&NonBlankString::of("mem")].get(), 512);

    let m: ByMode = luabind::from_str("return { by_mode = { Dev = 1, Prod = 2 }, by_port = { [80] = 'http' } }").unwrap();
    assert_eq!(m.by_mode[&Mode::Prod], 2);
    assert_eq!(m.by_port[&PositiveInt::new(80).unwrap()], "http");
}

#[test]
fn a_bad_key_is_reported_at_its_raw_token() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Limits>("return { limits = { [1] = 1 } }");
    assert_eq!(paths(&err), ["$.limits{1}"]);
    assert_eq!(
        err.errors()[0].message(),
        "No 1-arg constructor on NonBlankString accepting i64"
    );
}

#[test]
fn a_bad_value_is_reported_at_its_resolved_key() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Limits>("return { limits = { cpu = 0 } }");
    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $.limits[cpu]: Value rejected by PositiveInt constructor: must be > 0, got 0
    ");

    let err = deserialize_error::<ByMode>("return { by_mode = { Dev = 'one' }, by_port = { [8080] = 1 } }");
    assert_eq!(paths(&err), ["$.by_mode[Dev]", "$.by_port[8080]"]);
}

#[test]
fn enum_keys_are_checked_like_enum_values() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<ByMode>("return { by_mode = { Staging = 1 } }");
    assert_eq!(paths(&err), ["$.by_mode{Staging}"]);
}

#[test]
fn a_map_needs_a_table() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Limits>("return { limits = 5 }");
    assert_eq!(
        err.errors()[0].message(),
        "Expected table for HashMap, got: number"
    );
}

bind_struct! {
    struct NestedGenerics {
        bad: HashMap<NonBlankString, Vec<NonBlankString>>,
    }
}

bind_struct! {
    struct NestedEverywhere {
        grid: Vec<Vec<i64>> = Vec::new(),
        lookup: HashMap<Option<String>, Vec<i64>> = HashMap::new(),
        maybe: Option<Vec<String>>,
    }
}

#[test]
fn nested_generics_are_rejected_once_at_the_container() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<NestedGenerics>("return { bad = { foo = { 'a' } } }");
    assert_eq!(paths(&err), ["$.bad"]);
    assert!(err.errors()[0].message().contains("no nested generics"));
    insta::assert_snapshot!(err.errors()[0].message(), @"Map value type must be a concrete type (no nested generics). Got: Vec<NonBlankString>");
}

#[test]
fn each_non_concrete_argument_is_reported() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<NestedEverywhere>(
        "return { grid = { { 1 } }, lookup = {}, maybe = { 'x' } }",
    );
    let roles: Vec<(&str, GenericRole)> = err
        .errors()
        .iter()
        .map(|e| match e.kind() {
            ConfigErrorKind::NonConcreteGenericArgument { role, .. } => (e.path(), *role),
            other => panic!("unexpected {other}"),
        })
        .collect();
    assert_eq!(
        roles,
        [
            ("$.grid", GenericRole::CollectionElement),
            ("$.lookup", GenericRole::MapKey),
            ("$.lookup", GenericRole::MapValue),
            ("$.maybe", GenericRole::OptionalInner),
        ]
    );
}

bind_struct! {
    #[derive(Debug)]
    struct Optionals {
        name: Option<NonBlankString>,
        mode: Option<Mode>,
        ports: Option<Vec<PositiveInt>>,
    }
}

bind_struct! {
    #[derive(Debug)]
    struct OptionalItems {
        items: Option<Lists>,
    }
}

#[test]
fn optional_fields_may_be_absent_or_nil() {
    luabind_testhelpers::setup();

    let o: OptionalItems = luabind::from_str("return {}").unwrap();
    assert!(o.items.is_none());
    let o: OptionalItems = luabind::from_str("return { items = nil }").unwrap();
    assert!(o.items.is_none());
    let o: OptionalItems = luabind::from_str("return { items = { tags = { 'a' } } }").unwrap();
    assert_eq!(o.items.map(|l| l.tags.len()), Some(1));
}

#[test]
fn present_optionals_bind_their_inner_type() {
    luabind_testhelpers::setup();

    let o: Optionals = luabind::from_str("return { name = 'n', mode = 'Prod' }").unwrap();
    assert_eq!(o.name, Some(NonBlankString::of("n")));
    assert_eq!(o.mode, Some(Mode::Prod));
    assert!(o.ports.is_none());

    let err = deserialize_error::<Optionals>("return { name = '', mode = 'Dev', ports = { 1 } }");
    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $.name: Value rejected by NonBlankString constructor: must be non-empty
     - $.ports: Optional inner type must be a concrete type (no nested generics). Got: Vec<PositiveInt>
    ");
}
