//! Batch export behaviour of `ExportSession`.

use anyhow::{Result, anyhow, ensure};
use config_export::{
    EntryCollector, ExportError, ExportOptions, ExportSession, FilterParser, KeyKind, ModuleParser,
    ParsedConfig, SettingsParser, master::master_service_schema,
};
use rstest::rstest;
use test_helpers::fixtures::{self, MAIL};

#[rstest]
fn batch_stops_at_the_failing_module() -> Result<()> {
    let modules = [
        ModuleParser::new(fixtures::master_settings("/run/mail")),
        ModuleParser::failed(
            SettingsParser::new(&MAIL),
            "Error: mail_location: Unknown mailbox format: mbax",
        ),
        ModuleParser::new(fixtures::mail_settings()),
    ];
    let mut keys = Vec::new();
    let result = {
        let sink = |key: &str, _value: &str, _kind: KeyKind| keys.push(key.to_owned());
        let mut session = ExportSession::open(ExportOptions::default(), sink);
        session.set_module_parsers(&modules);
        session.export_all()
    };
    let Err(err) = result else {
        return Err(anyhow!("batch export should fail"));
    };
    ensure!(
        err.to_string() == "Error: mail_location: Unknown mailbox format: mbax",
        "unexpected message: {err}"
    );
    ensure!(
        matches!(&err, ExportError::Delayed { module, .. } if module == "mail"),
        "unexpected error: {err:?}"
    );
    ensure!(
        keys.first().map(String::as_str) == Some("base_dir"),
        "master module should be exported first: {keys:?}"
    );
    ensure!(
        !keys.iter().any(|key| key.starts_with("service")),
        "later modules must not be exported: {keys:?}"
    );
    Ok(())
}

#[rstest]
fn batch_returns_the_section_index_reached() -> Result<()> {
    let modules = [
        ModuleParser::new(fixtures::mail_settings()),
        ModuleParser::new(fixtures::master_settings("/run/mail")),
    ];
    let mut collector = EntryCollector::new();
    let reached = {
        let mut session =
            ExportSession::open(ExportOptions::default(), collector.sink()).with_section_index(7);
        session.set_module_parsers(&modules);
        session.export_all()?
    };
    // Two services, two inet listeners and one unix listener.
    ensure!(reached == 12, "unexpected section index {reached}");
    ensure!(!collector.is_empty(), "nothing exported");
    Ok(())
}

#[rstest]
fn duplicated_and_borrowed_modules_export_alike() -> Result<()> {
    let global = FilterParser::new(vec![
        ModuleParser::new(fixtures::master_settings("/srv/mail")),
        ModuleParser::new(fixtures::mail_settings()),
    ]);
    let parsed = ParsedConfig::new(global);

    let mut duplicated = ExportSession::open(ExportOptions::default(), EntryCollector::new());
    duplicated.dup_module_parsers(&parsed);
    let mut borrowed = ExportSession::open(ExportOptions::default(), EntryCollector::new());
    borrowed.set_module_parsers(parsed.global_filter().module_parsers());

    ensure!(duplicated.parser_count() == 2, "duplicated count");
    ensure!(borrowed.parser_count() == 2, "borrowed count");
    ensure!(
        duplicated
            .parser_schema(0)
            .is_some_and(|schema| std::ptr::eq(schema, master_service_schema())),
        "first module should be the master service"
    );
    ensure!(duplicated.base_dir() == "/srv/mail", "duplicated base_dir");
    ensure!(borrowed.base_dir() == "/srv/mail", "borrowed base_dir");

    for idx in 0..2 {
        duplicated.export_module(idx)?;
        borrowed.export_module(idx)?;
    }
    let from_copy = duplicated.into_sink();
    let from_borrow = borrowed.into_sink();
    ensure!(from_copy == from_borrow, "exports differ");
    Ok(())
}

#[rstest]
fn master_lookups_read_current_values() -> Result<()> {
    let modules = [
        ModuleParser::new(fixtures::mail_settings()),
        ModuleParser::new(fixtures::master_settings("/var/run/imap")),
    ];
    let mut session = ExportSession::open(ExportOptions::default(), EntryCollector::new());
    session.set_module_parsers(&modules);
    ensure!(session.base_dir() == "/var/run/imap", "base_dir");
    ensure!(
        session
            .import_environment()
            .split_whitespace()
            .any(|name| name == "TZ"),
        "import_environment default: {}",
        session.import_environment()
    );
    Ok(())
}
