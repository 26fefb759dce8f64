//! Canonical textual forms of scalar setting values.
//!
//! [`format_scalar`] decides whether a value is emitted at all and, if so,
//! how it reads. The helpers for sizes and intervals are exposed for callers
//! that render values outside an export session.

use crate::{ENUM_SEPARATOR, UNEXPANDED_SENTINEL, value::ScalarValue};

const SIZE_SUFFIXES: [char; 5] = ['B', 'k', 'M', 'G', 'T'];

const TIME_UNITS: [(u32, &str); 4] = [(60, "mins"), (60, "hours"), (24, "days"), (7, "weeks")];

/// Formats a byte count using the largest unit that divides it exactly.
///
/// # Examples
///
/// ```
/// use config_export::format::format_size;
/// assert_eq!(format_size(0), "0");
/// assert_eq!(format_size(1000), "1000 B");
/// assert_eq!(format_size(64 * 1024), "64 k");
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "division only happens once the remainder is known to be zero"
)]
pub fn format_size(size: u64) -> String {
    if size == 0 {
        return "0".to_owned();
    }
    let mut magnitude = size;
    let mut suffix = 'B';
    for unit in SIZE_SUFFIXES.iter().skip(1) {
        if !magnitude.is_multiple_of(1024) {
            break;
        }
        magnitude /= 1024;
        suffix = *unit;
    }
    format!("{magnitude} {suffix}")
}

/// Formats an interval in seconds, promoting to larger units while they
/// divide the value exactly.
///
/// # Examples
///
/// ```
/// use config_export::format::format_duration;
/// assert_eq!(format_duration(3600), "1 hours");
/// assert_eq!(format_duration(3661), "3661 secs");
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "division only happens once the remainder is known to be zero"
)]
pub fn format_duration(secs: u32) -> String {
    if secs == 0 {
        return "0".to_owned();
    }
    let mut amount = secs;
    let mut unit = "secs";
    for (factor, name) in TIME_UNITS {
        if !amount.is_multiple_of(factor) {
            break;
        }
        amount /= factor;
        unit = name;
    }
    format!("{amount} {unit}")
}

/// Formats an interval in milliseconds.
///
/// Whole seconds are rendered like [`format_duration`]; anything else keeps
/// millisecond precision.
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "division only happens once the remainder is known to be zero"
)]
pub fn format_duration_millis(msecs: u32) -> String {
    if msecs.is_multiple_of(1000) {
        format_duration(msecs / 1000)
    } else {
        format!("{msecs} ms")
    }
}

/// Formats `value` for export.
///
/// Returns `None` when the value is omitted: `dump_default` is false, a
/// default is known and the value equals it, or the value is an unset
/// string. An explicitly empty string is returned as `Some("")` so the
/// caller still emits its key.
///
/// # Panics
///
/// Panics when an expandable string value or default lacks the
/// [`UNEXPANDED_SENTINEL`] byte; such values violate the parser's contract.
///
/// # Examples
///
/// ```
/// use config_export::{ScalarValue, format::format_scalar};
///
/// let default = ScalarValue::Enum("b:a:b:c".into());
/// assert_eq!(format_scalar(&ScalarValue::selected("b"), Some(&default), false), None);
/// assert_eq!(
///     format_scalar(&ScalarValue::selected("ba"), Some(&default), false).as_deref(),
///     Some("ba")
/// );
/// ```
#[must_use]
pub fn format_scalar(
    value: &ScalarValue,
    default: Option<&ScalarValue>,
    dump_default: bool,
) -> Option<String> {
    let differs = || default.is_none_or(|dval| dval != value);
    match value {
        ScalarValue::Bool(flag) => {
            (dump_default || differs()).then(|| if *flag { "yes" } else { "no" }.to_owned())
        }
        ScalarValue::ByteSize(size) => (dump_default || differs()).then(|| format_size(*size)),
        ScalarValue::UnsignedInt(number) => (dump_default || differs()).then(|| number.to_string()),
        ScalarValue::Port(port) => (dump_default || differs()).then(|| port.to_string()),
        ScalarValue::UnsignedOctal(mask) => {
            (dump_default || differs()).then(|| format!("0{mask:o}"))
        }
        ScalarValue::Duration(secs) => (dump_default || differs()).then(|| format_duration(*secs)),
        ScalarValue::DurationMillis(msecs) => {
            (dump_default || differs()).then(|| format_duration_millis(*msecs))
        }
        ScalarValue::String(text) => {
            let dval = match default {
                Some(ScalarValue::String(dval)) => dval.as_deref(),
                _ => None,
            };
            format_string(text.as_deref(), dval, dump_default)
        }
        ScalarValue::ExpandableString(text) => {
            let dval = match default {
                Some(ScalarValue::ExpandableString(dval)) => {
                    dval.as_deref().map(strip_sentinel)
                }
                _ => None,
            };
            format_string(text.as_deref().map(strip_sentinel), dval, dump_default)
        }
        ScalarValue::Enum(selected) => {
            let omit = !dump_default
                && matches!(default, Some(ScalarValue::Enum(options)) if selects_default(options, selected));
            (!omit && !selected.is_empty()).then(|| selected.clone())
        }
    }
}

fn format_string(value: Option<&str>, default: Option<&str>, dump_default: bool) -> Option<String> {
    let text = value?;
    (dump_default || default != Some(text)).then(|| text.to_owned())
}

/// Whether `selected` names the default option of `options`.
fn selects_default(options: &str, selected: &str) -> bool {
    options
        .strip_prefix(selected)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(ENUM_SEPARATOR))
}

fn strip_sentinel(stored: &str) -> &str {
    stored.strip_prefix(UNEXPANDED_SENTINEL).unwrap_or_else(|| {
        panic!("expandable string {stored:?} is missing its '{UNEXPANDED_SENTINEL}' sentinel")
    })
}

#[cfg(test)]
mod tests;
