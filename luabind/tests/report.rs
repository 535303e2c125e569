//! The aggregated report and the file/source entry points.

mod fixtures;

use std::io::Write;

use fixtures::{NonBlankString, PositiveInt};
use luabind::{Error, SyntaxErrorKind, bind_struct};
use miette::Diagnostic;

bind_struct! {
    #[derive(Debug)]
    struct Service {
        name: NonBlankString,
        port: PositiveInt,
        tags: Vec<String> = Vec::new(),
    }
}

#[test]
fn report_lists_every_error_under_one_header() {
    luabind_testhelpers::setup();

    let err = luabind::from_str::<Service>("return { name = '', tags = { 1 } }").unwrap_err();
    insta::assert_snapshot!(err, @r"
    Config deserialization failed:
     - $.name: Value rejected by NonBlankString constructor: must be non-empty
     - $.port: Missing required field (no default value).
     - $.tags[1]: No 1-arg constructor on String accepting i64
    ");
}

#[test]
fn every_error_is_a_related_diagnostic() {
    luabind_testhelpers::setup();

    let Err(Error::Deserialize(err)) = luabind::from_str::<Service>("return { name = '' }") else {
        panic!("expected a binding error");
    };
    assert_eq!(err.code().unwrap().to_string(), "luabind::deserialize");

    let codes: Vec<String> = err
        .related()
        .unwrap()
        .map(|d| d.code().unwrap().to_string())
        .collect();
    assert_eq!(codes, ["luabind::rejected", "luabind::missing_field"]);

    let errors = err.into_errors();
    assert_eq!(errors[1].path(), "$.port");
}

#[test]
fn syntax_errors_are_not_binding_errors() {
    luabind_testhelpers::setup();

    let err = luabind::from_str::<Service>("return { name = 'x' port = 1 }").unwrap_err();
    let Error::Syntax(syntax) = &err else {
        panic!("expected a syntax error, got {err}");
    };
    assert!(matches!(
        syntax.kind(),
        SyntaxErrorKind::UnexpectedToken { .. }
    ));
    assert_eq!(err.code().unwrap().to_string(), "lua::unexpected_token");
    assert!(err.labels().is_some());
}

#[test]
fn from_path_reads_the_file() -> eyre::Result<()> {
    luabind_testhelpers::setup();

    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "-- service")?;
    writeln!(file, "return {{ name = 'api', port = 8080, tags = {{ 'edge' }} }}")?;

    let service: Service = luabind::from_path(file.path())?;
    assert_eq!(service.name.as_str(), "api");
    assert_eq!(service.port.get(), 8080);
    assert_eq!(service.tags, ["edge"]);
    Ok(())
}

#[test]
fn from_path_reports_unreadable_files() {
    luabind_testhelpers::setup();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.lua");
    let err = luabind::from_path::<Service>(&missing).unwrap_err();
    let Error::Io { path, .. } = &err else {
        panic!("expected an io error, got {err}");
    };
    assert_eq!(path, &missing);
    assert_eq!(err.code().unwrap().to_string(), "luabind::io");
    assert!(std::error::Error::source(&err).is_some());
}
