//! Path segments naming the elements of repeated sections.
//!
//! Uniquely named sections use their escaped name; everything else uses the
//! running section index kept by the export session, so anonymous segments
//! never collide between sibling lists of one parent.

use std::borrow::Cow;

use crate::{
    MAP_SEPARATOR, SETTINGS_SEPARATOR,
    schema::{FieldDef, ValueKind},
    value::{ScalarValue, SettingValue, Settings},
};

/// Characters with structural meaning in a key path and their escape codes.
const ESCAPES: [(char, char); 6] = [
    ('=', 'e'),
    (SETTINGS_SEPARATOR, 's'),
    ('\\', '\\'),
    (' ', '_'),
    (',', '+'),
    (MAP_SEPARATOR, 'c'),
];

fn escape_code(ch: char) -> Option<char> {
    ESCAPES
        .iter()
        .find_map(|&(raw, code)| (raw == ch).then_some(code))
}

fn unescape_code(code: char) -> Option<char> {
    ESCAPES
        .iter()
        .find_map(|&(raw, esc)| (esc == code).then_some(raw))
}

/// Escapes a section name so it can be embedded in a key path.
///
/// # Examples
///
/// ```
/// use config_export::section::{section_escape, section_unescape};
/// let escaped = section_escape("a/b c");
/// assert_eq!(escaped, "a\\sb\\_c");
/// assert_eq!(section_unescape(&escaped), "a/b c");
/// ```
#[must_use]
pub fn section_escape(name: &str) -> Cow<'_, str> {
    if !name.chars().any(|ch| escape_code(ch).is_some()) {
        return Cow::Borrowed(name);
    }
    let mut escaped = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        match escape_code(ch) {
            Some(code) => {
                escaped.push('\\');
                escaped.push(code);
            }
            None => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Reverses [`section_escape`]. Unknown escape sequences are kept as-is.
#[must_use]
pub fn section_unescape(escaped: &str) -> Cow<'_, str> {
    if !escaped.contains('\\') {
        return Cow::Borrowed(escaped);
    }
    let mut name = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            name.push(ch);
            continue;
        }
        match chars.next() {
            Some(code) => match unescape_code(code) {
                Some(raw) => name.push(raw),
                None => {
                    name.push('\\');
                    name.push(code);
                }
            },
            None => name.push('\\'),
        }
    }
    Cow::Owned(name)
}

/// Path segment for one element of the section list `def`.
///
/// Elements of a [`ValueKind::UniqueSectionList`] are named by their
/// non-empty name field; all others, and unique elements without a usable
/// name, use `ordinal`.
#[must_use]
pub fn section_name(def: &FieldDef, element: &Settings, ordinal: usize) -> String {
    if def.kind() != ValueKind::UniqueSectionList {
        return ordinal.to_string();
    }
    let name = def
        .child()
        .and_then(|schema| schema.name_slot())
        .and_then(|slot| element.get(slot));
    match name {
        Some(SettingValue::Scalar(ScalarValue::String(Some(name)))) if !name.is_empty() => {
            section_escape(name).into_owned()
        }
        _ => ordinal.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use rstest::rstest;

    use super::{section_escape, section_name, section_unescape};
    use crate::{
        schema::{FieldSpec, Schema},
        value::{ScalarValue, SettingValue, Settings},
    };

    static LISTENER: LazyLock<Schema> = LazyLock::new(|| {
        Schema::builder("inet_listener")
            .field(FieldSpec::string("name", None))
            .field(FieldSpec::port("port", 0))
            .name_field("name")
            .build()
            .unwrap_or_else(|err| panic!("listener schema: {err}"))
    });

    static PARENT: LazyLock<Schema> = LazyLock::new(|| {
        Schema::builder("service")
            .field(FieldSpec::unique_section_list("inet_listener", &LISTENER))
            .field(FieldSpec::section_list("unix_listener", &LISTENER))
            .build()
            .unwrap_or_else(|err| panic!("service schema: {err}"))
    });

    fn listener(name: Option<&str>) -> Settings {
        Settings::from_values(vec![
            SettingValue::Scalar(ScalarValue::String(name.map(str::to_owned))),
            SettingValue::Scalar(ScalarValue::Port(143)),
        ])
    }

    #[rstest]
    #[case("imap", "imap")]
    #[case("a/b", "a\\sb")]
    #[case("k=v", "k\\ev")]
    #[case("back\\slash", "back\\\\slash")]
    #[case("two words", "two\\_words")]
    #[case("x,y", "x\\+y")]
    #[case("plugin:quota", "plugin\\cquota")]
    fn escaping_is_reversible(#[case] raw: &str, #[case] escaped: &str) {
        assert_eq!(section_escape(raw), escaped);
        assert_eq!(section_unescape(escaped), raw);
    }

    #[test]
    fn unknown_escapes_survive_unescaping() {
        assert_eq!(section_unescape("a\\qb\\"), "a\\qb\\");
    }

    #[test]
    fn unique_sections_use_their_name() {
        let def = PARENT.field("inet_listener").expect("inet_listener field");
        assert_eq!(section_name(def, &listener(Some("imaps")), 4), "imaps");
        assert_eq!(section_name(def, &listener(Some("a/b")), 4), "a\\sb");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn unnamed_unique_sections_fall_back_to_the_ordinal(#[case] name: Option<&str>) {
        let def = PARENT.field("inet_listener").expect("inet_listener field");
        assert_eq!(section_name(def, &listener(name), 7), "7");
    }

    #[test]
    fn plain_sections_always_use_the_ordinal() {
        let def = PARENT.field("unix_listener").expect("unix_listener field");
        assert_eq!(section_name(def, &listener(Some("imap")), 2), "2");
    }
}
