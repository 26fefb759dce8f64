//! Unit tests for scalar formatting.

use rstest::rstest;

use super::{format_duration, format_duration_millis, format_scalar, format_size};
use crate::value::ScalarValue;

#[rstest]
#[case(0, "0")]
#[case(1, "1 B")]
#[case(1023, "1023 B")]
#[case(1024, "1 k")]
#[case(1536, "1536 B")]
#[case(3 * 1024 * 1024, "3 M")]
#[case(1024 * 1024 * 1024, "1 G")]
#[case(5 * 1024 * 1024 * 1024 * 1024, "5 T")]
#[case(2048 * 1024 * 1024 * 1024 * 1024, "2048 T")]
fn sizes_use_the_largest_exact_unit(#[case] size: u64, #[case] expected: &str) {
    assert_eq!(format_size(size), expected);
}

#[rstest]
#[case(0, "0")]
#[case(59, "59 secs")]
#[case(120, "2 mins")]
#[case(3600, "1 hours")]
#[case(3661, "3661 secs")]
#[case(5400, "90 mins")]
#[case(172_800, "2 days")]
#[case(604_800, "1 weeks")]
#[case(1_209_600, "2 weeks")]
fn durations_promote_while_exact(#[case] secs: u32, #[case] expected: &str) {
    assert_eq!(format_duration(secs), expected);
}

#[rstest]
#[case(0, "0")]
#[case(1500, "1500 ms")]
#[case(2000, "2 secs")]
#[case(60_000, "1 mins")]
#[case(1, "1 ms")]
fn millisecond_durations(#[case] msecs: u32, #[case] expected: &str) {
    assert_eq!(format_duration_millis(msecs), expected);
}

#[rstest]
#[case(ScalarValue::Bool(true), "yes")]
#[case(ScalarValue::Bool(false), "no")]
#[case(ScalarValue::UnsignedInt(100), "100")]
#[case(ScalarValue::UnsignedOctal(0o077), "077")]
#[case(ScalarValue::UnsignedOctal(0), "00")]
#[case(ScalarValue::Port(993), "993")]
#[case(ScalarValue::ByteSize(256 * 1024 * 1024), "256 M")]
#[case(ScalarValue::Duration(300), "5 mins")]
#[case(ScalarValue::DurationMillis(250), "250 ms")]
#[case(ScalarValue::string("imap pop3"), "imap pop3")]
#[case(ScalarValue::unexpanded("%u@%d"), "%u@%d")]
#[case(ScalarValue::selected("required"), "required")]
fn forced_values_always_render(#[case] value: ScalarValue, #[case] expected: &str) {
    assert_eq!(format_scalar(&value, Some(&value), true).as_deref(), Some(expected));
}

#[rstest]
#[case(ScalarValue::Bool(true))]
#[case(ScalarValue::ByteSize(1024))]
#[case(ScalarValue::UnsignedInt(7))]
#[case(ScalarValue::UnsignedOctal(0o022))]
#[case(ScalarValue::Duration(60))]
#[case(ScalarValue::DurationMillis(1500))]
#[case(ScalarValue::Port(143))]
#[case(ScalarValue::string("syslog"))]
#[case(ScalarValue::unexpanded("~/mail"))]
fn values_equal_to_their_default_are_omitted(#[case] value: ScalarValue) {
    assert_eq!(format_scalar(&value, Some(&value.clone()), false), None);
}

#[test]
fn values_differing_from_their_default_are_emitted() {
    let default = ScalarValue::UnsignedInt(100);
    assert_eq!(
        format_scalar(&ScalarValue::UnsignedInt(1000), Some(&default), false).as_deref(),
        Some("1000")
    );
}

#[test]
fn missing_default_counts_as_different() {
    assert_eq!(
        format_scalar(&ScalarValue::Bool(false), None, false).as_deref(),
        Some("no")
    );
}

#[test]
fn unset_strings_never_render() {
    let unset = ScalarValue::String(None);
    assert_eq!(format_scalar(&unset, None, true), None);
    let unset_vars = ScalarValue::ExpandableString(None);
    assert_eq!(format_scalar(&unset_vars, Some(&ScalarValue::unexpanded("x")), true), None);
}

#[test]
fn empty_strings_render_when_forced() {
    let empty = ScalarValue::string("");
    assert_eq!(format_scalar(&empty, Some(&empty), true).as_deref(), Some(""));
    assert_eq!(format_scalar(&empty, Some(&empty), false), None);
}

#[test]
fn expandable_strings_compare_without_the_sentinel() {
    let value = ScalarValue::unexpanded("/var/mail/%u");
    let default = ScalarValue::unexpanded("/var/mail/%u");
    assert_eq!(format_scalar(&value, Some(&default), false), None);

    let changed = ScalarValue::unexpanded("/srv/mail/%u");
    assert_eq!(
        format_scalar(&changed, Some(&default), false).as_deref(),
        Some("/srv/mail/%u")
    );
}

#[test]
#[should_panic(expected = "missing its '0' sentinel")]
fn expandable_strings_without_sentinel_panic() {
    let value = ScalarValue::ExpandableString(Some("plain".to_owned()));
    let _rendered = format_scalar(&value, None, true);
}

#[rstest]
#[case("b", None)]
#[case("ba", Some("ba"))]
#[case("a", Some("a"))]
#[case("b:a:b:c", None)]
fn enums_compare_the_selected_prefix(#[case] selected: &str, #[case] expected: Option<&str>) {
    let default = ScalarValue::Enum("b:a:b:c".to_owned());
    let value = ScalarValue::selected(selected);
    assert_eq!(format_scalar(&value, Some(&default), false).as_deref(), expected);
}

#[test]
fn enums_without_default_are_emitted() {
    assert_eq!(
        format_scalar(&ScalarValue::selected("no"), None, false).as_deref(),
        Some("no")
    );
}

#[test]
fn formatting_is_deterministic() {
    let value = ScalarValue::ByteSize(10 * 1024 * 1024);
    let default = ScalarValue::ByteSize(0);
    let first = format_scalar(&value, Some(&default), false);
    let second = format_scalar(&value, Some(&default), false);
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("10 M"));
}
