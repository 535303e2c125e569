//! Nested structs, embedded bases and error aggregation.

mod fixtures;

use fixtures::{Mode, NonBlankString, PositiveInt, deserialize_error, paths};
use indoc::indoc;
use luabind::{ConfigErrorKind, bind_struct};

bind_struct! {
    #[derive(Debug)]
    struct Database {
        host: NonBlankString,
        port: PositiveInt = PositiveInt::new(5432).unwrap(),
    }
}

bind_struct! {
    #[derive(Debug)]
    struct App {
        name: NonBlankString,
        mode: Mode,
        db: Database,
        replicas: Vec<Database>,
    }
}

#[test]
fn nested_objects_bind_recursively() -> eyre::Result<()> {
    luabind_testhelpers::setup();

    let app: App = luabind::from_str(indoc! {r#"
        return {
          name = "billing",
          mode = "Prod",
          db = { host = "db1" },
          replicas = {
            { host = "db2", port = 6432 },
            { host = "db3" },
          },
        }
    "#})?;

    assert_eq!(app.name.as_str(), "billing");
    assert_eq!(app.mode, Mode::Prod);
    assert_eq!(app.db.host.as_str(), "db1");
    assert_eq!(app.db.port.get(), 5432);
    assert_eq!(app.replicas.len(), 2);
    assert_eq!(app.replicas[0].port.get(), 6432);
    assert_eq!(app.replicas[1].host.as_str(), "db3");
    Ok(())
}

#[test]
fn every_problem_is_reported_in_traversal_order() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<App>(indoc! {r#"
        return {
          name = "",
          mode = "prod",
          db = { port = -1 },
          replicas = {
            { host = "ok" },
            { host = 42 },
          },
        }
    "#});

    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $.name: Value rejected by NonBlankString constructor: must be non-empty
     - $.mode: Unknown enum value 'prod' for Mode
     - $.db.host: Missing required field (no default value).
     - $.db.port: Value rejected by PositiveInt constructor: must be > 0, got -1
     - $.replicas[2].host: No 1-arg constructor on NonBlankString accepting i64
    ");
}

#[test]
fn a_nested_field_error_fails_its_parents_silently() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<App>(indoc! {r#"
        return {
          name = "x",
          mode = "Dev",
          db = { host = "" },
          replicas = {},
        }
    "#});
    assert_eq!(paths(&err), ["$.db.host"]);
}

bind_struct! {
    #[derive(Debug)]
    struct Endpoint {
        host: NonBlankString,
        port: PositiveInt,
    }
}

#[test]
fn a_table_for_a_leaf_field_is_reported_once() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Endpoint>(indoc! {r#"
        return {
          host = { host = "", port = -1, extra = {} },
          port = 0,
        }
    "#});

    assert_eq!(paths(&err), ["$.host", "$.port"]);
    assert!(matches!(
        err.errors()[0].kind(),
        ConfigErrorKind::NoZeroArgConstructor { .. }
    ));
    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $.host: No no-arg constructor for nested object type: NonBlankString
     - $.port: Value rejected by PositiveInt constructor: must be > 0, got 0
    ");
}

bind_struct! {
    #[derive(Debug)]
    struct Common {
        name: String,
        tags: Vec<String>,
    }
}

bind_struct! {
    #[derive(Debug)]
    struct Worker extends common: Common {
        threads: i64 = 4,
    }
}

#[test]
fn base_fields_bind_from_the_same_table() {
    luabind_testhelpers::setup();

    let w: Worker = luabind::from_str("return { name = 'w1', tags = { 'a' }, threads = 8 }").unwrap();
    assert_eq!(w.threads, 8);
    assert_eq!(w.common.name, "w1");
    assert_eq!(w.common.tags, ["a"]);
}

#[test]
fn own_fields_are_reported_before_base_fields() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Worker>("return { threads = 'many' }");
    assert_eq!(paths(&err), ["$.threads", "$.name", "$.tags"]);
}

#[test]
fn a_struct_root_needs_a_table() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Database>("return 'nope'");
    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $: No 1-arg constructor on Database accepting String
    ");
}

bind_struct! {
    #[derive(Debug)]
    struct Primitives {
        small: i32,
        name: String,
        byte: u8 = 0,
    }
}

#[test]
fn fixed_width_primitives_are_rejected() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Primitives>("return { small = 1, name = 'n', byte = 2 }");
    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $.small: Primitive field types are not supported: i32
     - $.byte: Primitive field types are not supported: u8
    ");

    // Absent without a default still reports the primitive, not a missing field.
    let err = deserialize_error::<Primitives>("return { name = 'n' }");
    assert_eq!(paths(&err), ["$.small"]);
    assert!(matches!(
        err.errors()[0].kind(),
        ConfigErrorKind::PrimitiveNotSupported { .. }
    ));
}

bind_struct! {
    struct Boxed {
        inner: Box<String>,
    }
}

#[test]
fn other_generic_wrappers_are_unsupported() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Boxed>("return { inner = 'x' }");
    assert_eq!(
        err.errors()[0].message(),
        "Unsupported parameterized type: Box<String>"
    );
}
