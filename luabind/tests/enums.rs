//! Unit enums matched by name.

mod fixtures;

use fixtures::{Mode, deserialize_error};
use luabind::{ConfigErrorKind, bind_struct};
use miette::Diagnostic;

bind_struct! {
    #[derive(Debug)]
    struct Deploy {
        mode: Mode,
    }
}

#[test]
fn exact_names_match() {
    luabind_testhelpers::setup();

    let d: Deploy = luabind::from_str("return { mode = 'Dev' }").unwrap();
    assert_eq!(d.mode, Mode::Dev);
}

#[test]
fn matching_is_case_sensitive() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Deploy>("return { mode = 'prod' }");
    let error = &err.errors()[0];
    assert_eq!(error.message(), "Unknown enum value 'prod' for Mode");
    let ConfigErrorKind::UnknownEnumValue {
        expected,
        suggestion,
        ..
    } = error.kind()
    else {
        panic!("unexpected {}", error.kind());
    };
    assert_eq!(expected, &["Dev", "Prod"]);
    assert_eq!(*suggestion, Some("Prod"));
    insta::assert_snapshot!(
        error.help().unwrap().to_string(),
        @"did you mean 'Prod'? expected one of: Dev, Prod"
    );
}

#[test]
fn far_off_names_get_no_suggestion() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Deploy>("return { mode = 'staging' }");
    let error = &err.errors()[0];
    assert!(matches!(
        error.kind(),
        ConfigErrorKind::UnknownEnumValue {
            suggestion: None,
            ..
        }
    ));
    assert_eq!(
        error.help().unwrap().to_string(),
        "expected one of: Dev, Prod"
    );
}

#[test]
fn enums_need_a_string() {
    luabind_testhelpers::setup();

    let err = deserialize_error::<Deploy>("return { mode = 1 }");
    assert_eq!(err.errors()[0].message(), "Enum expects string name, got: number");

    let err = deserialize_error::<Deploy>("return { mode = { 'Dev' } }");
    assert_eq!(err.errors()[0].message(), "Enum expects string name, got: table");
}
