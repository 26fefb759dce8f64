//! Settings instances and their "explicitly set" shadows.
//!
//! A [`Settings`] instance stores one [`SettingValue`] per storage slot of its
//! schema, in schema order. The matching [`Changes`] shadow records, per slot,
//! whether the parser assigned the value explicitly; for section lists it
//! holds one child shadow per section.

use serde::{Deserialize, Serialize};

use crate::{UNEXPANDED_SENTINEL, schema::ValueKind};

/// A single scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScalarValue {
    /// Boolean flag.
    Bool(bool),
    /// Size in bytes.
    ByteSize(u64),
    /// Unsigned decimal integer.
    UnsignedInt(u32),
    /// Unsigned integer displayed in octal, such as a umask.
    UnsignedOctal(u32),
    /// Interval in seconds.
    Duration(u32),
    /// Interval in milliseconds.
    DurationMillis(u32),
    /// Network port.
    Port(u16),
    /// Plain string; `None` when unset.
    String(Option<String>),
    /// String carrying the expansion sentinel as its first byte; `None` when
    /// unset.
    ExpandableString(Option<String>),
    /// Enumeration. Defaults hold `selected:option1:option2`; parsed values
    /// hold the selected name.
    Enum(String),
}

impl ScalarValue {
    /// Kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::ByteSize(_) => ValueKind::ByteSize,
            Self::UnsignedInt(_) => ValueKind::UnsignedInt,
            Self::UnsignedOctal(_) => ValueKind::UnsignedOctal,
            Self::Duration(_) => ValueKind::Duration,
            Self::DurationMillis(_) => ValueKind::DurationMillis,
            Self::Port(_) => ValueKind::Port,
            Self::String(_) => ValueKind::String,
            Self::ExpandableString(_) => ValueKind::ExpandableString,
            Self::Enum(_) => ValueKind::Enum,
        }
    }

    /// Builds a plain string value.
    #[must_use]
    pub fn string(value: &str) -> Self {
        Self::String(Some(value.to_owned()))
    }

    /// Builds an expandable string whose variables have not been expanded
    /// yet, prefixing the sentinel byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_export::ScalarValue;
    /// let value = ScalarValue::unexpanded("maildir:~/Maildir");
    /// assert_eq!(value, ScalarValue::ExpandableString(Some("0maildir:~/Maildir".into())));
    /// ```
    #[must_use]
    pub fn unexpanded(value: &str) -> Self {
        let mut stored = String::with_capacity(value.len() + 1);
        stored.push(UNEXPANDED_SENTINEL);
        stored.push_str(value);
        Self::ExpandableString(Some(stored))
    }

    /// Builds an enumeration value selecting `name`.
    #[must_use]
    pub fn selected(name: &str) -> Self {
        Self::Enum(name.to_owned())
    }
}

/// The value stored in one slot of a settings instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingValue {
    /// A scalar value.
    Scalar(ScalarValue),
    /// Ordered `(key, value)` pairs; `None` when the map was never created.
    StringMap(Option<Vec<(String, String)>>),
    /// Child instances of a repeated section.
    Sections(Vec<Settings>),
}

impl SettingValue {
    /// Returns the scalar held in this slot, if any.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::StringMap(_) | Self::Sections(_) => None,
        }
    }

    /// Kind this value represents. Section lists report
    /// [`ValueKind::SectionList`] whether or not they are uniquely named.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(scalar) => scalar.kind(),
            Self::StringMap(_) => ValueKind::StringMap,
            Self::Sections(_) => ValueKind::SectionList,
        }
    }

    /// Whether this value may be stored in a field of `kind`.
    #[must_use]
    pub fn matches(&self, kind: ValueKind) -> bool {
        match self {
            Self::Scalar(scalar) => scalar.kind() == kind,
            Self::StringMap(_) => kind == ValueKind::StringMap,
            Self::Sections(_) => kind.is_section_list(),
        }
    }
}

impl From<ScalarValue> for SettingValue {
    fn from(value: ScalarValue) -> Self {
        Self::Scalar(value)
    }
}

/// Concrete values for one schema, one entry per storage slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    values: Vec<SettingValue>,
}

impl Settings {
    /// Wraps values already laid out in slot order.
    #[must_use]
    pub const fn from_values(values: Vec<SettingValue>) -> Self {
        Self { values }
    }

    /// Value stored in `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&SettingValue> {
        self.values.get(slot)
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut SettingValue> {
        self.values.get_mut(slot)
    }

    /// All values in slot order.
    #[must_use]
    pub fn values(&self) -> &[SettingValue] {
        &self.values
    }

    /// Number of storage slots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the instance has no slots.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Shadow state of one storage slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    /// Left at its schema default.
    #[default]
    Unchanged,
    /// Assigned explicitly by the parser.
    Changed,
    /// A section list that was populated; one shadow per section.
    Sections(Vec<Changes>),
}

/// Shadow of a settings instance, one [`Change`] per storage slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    entries: Vec<Change>,
}

impl Changes {
    /// Shadow with `slots` untouched entries.
    #[must_use]
    pub fn unchanged(slots: usize) -> Self {
        Self {
            entries: vec![Change::Unchanged; slots],
        }
    }

    /// Wraps entries already laid out in slot order.
    #[must_use]
    pub const fn from_entries(entries: Vec<Change>) -> Self {
        Self { entries }
    }

    /// Whether the value in `slot` was assigned explicitly.
    #[must_use]
    pub fn is_set(&self, slot: usize) -> bool {
        matches!(
            self.entries.get(slot),
            Some(Change::Changed | Change::Sections(_))
        )
    }

    /// Shadows of the sections stored in `slot`; empty unless the slot is a
    /// populated section list.
    #[must_use]
    pub fn sections(&self, slot: usize) -> &[Changes] {
        match self.entries.get(slot) {
            Some(Change::Sections(sections)) => sections,
            _ => &[],
        }
    }

    /// All entries in slot order.
    #[must_use]
    pub fn entries(&self) -> &[Change] {
        &self.entries
    }

    pub(crate) fn mark_changed(&mut self, slot: usize) {
        if let Some(entry) = self.entries.get_mut(slot) {
            *entry = Change::Changed;
        }
    }

    pub(crate) fn push_section(&mut self, slot: usize, section: Self) {
        let Some(entry) = self.entries.get_mut(slot) else {
            return;
        };
        match entry {
            Change::Sections(sections) => sections.push(section),
            Change::Unchanged | Change::Changed => *entry = Change::Sections(vec![section]),
        }
    }
}
