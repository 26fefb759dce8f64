//! Output boundary of an export session.
//!
//! Every emitted key reaches an [`ExportSink`]. Closures taking
//! `(key, value, kind)` are sinks; [`EntryCollector`] records entries for
//! later rendering.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Role of an emitted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// A leaf value.
    Normal,
    /// The list of section names of a repeated section.
    List,
    /// The name field of a uniquely named section.
    UniqueKey,
    /// Advisory entry announcing a string map; its value is always empty.
    KeyList,
}

/// Receiver of emitted entries.
///
/// Entries arrive in schema order, depth first. With deduplication
/// disabled the same key can arrive more than once; each occurrence is
/// cumulative rather than a replacement.
pub trait ExportSink {
    /// Receives one emitted entry.
    fn entry(&mut self, key: &str, value: &str, kind: KeyKind);
}

impl<F> ExportSink for F
where
    F: FnMut(&str, &str, KeyKind),
{
    fn entry(&mut self, key: &str, value: &str, kind: KeyKind) {
        self(key, value, kind);
    }
}

/// One recorded entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// Flattened key path.
    pub key: String,
    /// Formatted value; empty for advisory entries.
    pub value: String,
    /// Role of the key.
    pub kind: KeyKind,
}

/// Collects entries in emission order.
///
/// # Examples
///
/// ```
/// use config_export::{EntryCollector, ExportSink, KeyKind};
///
/// let mut collector = EntryCollector::new();
/// {
///     let mut sink = collector.sink();
///     sink.entry("plugin", "", KeyKind::KeyList);
///     sink.entry("plugin:quota", "maildir", KeyKind::Normal);
/// }
/// assert_eq!(collector.render(), "plugin:quota = maildir\n");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryCollector {
    entries: Vec<ExportEntry>,
}

impl EntryCollector {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records one entry.
    pub fn push(&mut self, key: &str, value: &str, kind: KeyKind) {
        self.entries.push(ExportEntry {
            key: key.to_owned(),
            value: value.to_owned(),
            kind,
        });
    }

    /// Borrows the collector as a sink for an export session.
    pub fn sink(&mut self) -> impl FnMut(&str, &str, KeyKind) + '_ {
        move |key: &str, value: &str, kind: KeyKind| self.push(key, value, kind)
    }

    /// Entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[ExportEntry] {
        &self.entries
    }

    /// Consumes the collector, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<ExportEntry> {
        self.entries
    }

    /// Entries emitted under `key`.
    pub fn get<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a ExportEntry> + use<'a, 'k> {
        self.entries.iter().filter(move |entry| entry.key == key)
    }

    /// Value of the first entry emitted under `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Keys in emission order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.key.as_str()).collect()
    }

    /// Number of recorded entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders every non-advisory entry as a `key = value` line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in self.entries.iter().filter(|entry| entry.kind != KeyKind::KeyList) {
            // Writing to a String cannot fail.
            let _written = writeln!(out, "{} = {}", entry.key, entry.value);
        }
        out
    }

    /// Serialises the recorded entries as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

impl ExportSink for EntryCollector {
    fn entry(&mut self, key: &str, value: &str, kind: KeyKind) {
        self.push(key, value, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryCollector, ExportEntry, ExportSink, KeyKind};

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        let mut sink = |key: &str, value: &str, kind: KeyKind| {
            seen.push((key.to_owned(), value.to_owned(), kind));
        };
        sink.entry("base_dir", "/run/mail", KeyKind::Normal);
        assert_eq!(
            seen,
            vec![("base_dir".to_owned(), "/run/mail".to_owned(), KeyKind::Normal)]
        );
    }

    #[test]
    fn repeated_keys_accumulate() {
        let mut collector = EntryCollector::new();
        collector.entry("protocols", "imap", KeyKind::Normal);
        collector.entry("protocols", "pop3", KeyKind::Normal);
        let values: Vec<&str> = collector.get("protocols").map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["imap", "pop3"]);
        assert_eq!(collector.value("protocols"), Some("imap"));
    }

    #[test]
    fn lookups_outlive_the_queried_key() {
        let mut collector = EntryCollector::new();
        collector.push("base_dir", "/run/mail", KeyKind::Normal);
        let found = {
            let key = String::from("base_dir");
            let value = collector.value(&key);
            let first = collector.get(&key).next();
            (value, first.map(|entry| entry.kind))
        };
        assert_eq!(found, (Some("/run/mail"), Some(KeyKind::Normal)));
    }

    #[test]
    fn render_skips_advisory_entries() {
        let mut collector = EntryCollector::new();
        collector.push("service", "imap pop3", KeyKind::List);
        collector.push("service/imap/name", "imap", KeyKind::UniqueKey);
        collector.push("plugin", "", KeyKind::KeyList);
        assert_eq!(
            collector.render(),
            "service = imap pop3\nservice/imap/name = imap\n"
        );
    }

    #[test]
    fn entries_serialise_with_snake_case_kinds() {
        let mut collector = EntryCollector::new();
        collector.push("service/imap/name", "imap", KeyKind::UniqueKey);
        let json = collector.to_json().expect("serialise entries");
        assert!(json.contains("\"unique_key\""), "unexpected json: {json}");
        let parsed: Vec<ExportEntry> = serde_json::from_str(&json).expect("parse entries");
        assert_eq!(parsed, collector.into_entries());
    }
}
