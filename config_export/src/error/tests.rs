//! Unit tests for error construction and display.

use rstest::rstest;

use super::{ExportError, SchemaError};
use crate::schema::ValueKind;

#[test]
fn delayed_error_displays_message_verbatim() {
    let err = ExportError::delayed("mail", "Invalid setting: mail_location");
    assert_eq!(err.to_string(), "Invalid setting: mail_location");
    match err {
        ExportError::Delayed { module, .. } => assert_eq!(module, "mail"),
        other => panic!("expected Delayed, got {other:?}"),
    }
}

#[test]
fn options_error_wraps_figment() {
    let err = ExportError::options(figment::Error::from("bad scope"));
    assert!(err.to_string().starts_with("Failed to load export options:"));
}

#[rstest]
#[case(
    SchemaError::unknown_key("service", "chroot"),
    "schema 'service' has no field 'chroot'"
)]
#[case(
    SchemaError::kind_mismatch("service", "process_limit", ValueKind::UnsignedInt, ValueKind::String),
    "field 'process_limit' of schema 'service' is unsigned_int, got a string value"
)]
fn schema_error_messages(#[case] err: SchemaError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}
