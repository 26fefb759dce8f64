//! Static schema metadata describing settings structures.
//!
//! A [`Schema`] is an ordered table of [`FieldDef`]s. Each field carries its
//! key, value kind, visibility flag and, for section lists, the schema of its
//! elements. Storage accessors are resolved once by [`SchemaBuilder::build`],
//! so the exporter never looks fields up by name while walking.
//!
//! Schemas are intended to live for the whole process, typically inside a
//! `static` [`std::sync::LazyLock`], and may be shared by several parents.

mod builder;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Changes, ScalarValue, SettingValue, Settings};

pub use builder::{FieldSpec, SchemaBuilder};

/// Kind of value a field stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `yes` / `no`.
    Bool,
    /// Size in bytes, displayed with a binary unit.
    ByteSize,
    /// Decimal integer.
    UnsignedInt,
    /// Integer displayed in octal.
    UnsignedOctal,
    /// Interval in seconds.
    Duration,
    /// Interval in milliseconds.
    DurationMillis,
    /// Network port.
    Port,
    /// Plain string.
    String,
    /// String that may contain `%variables`.
    ExpandableString,
    /// One name out of a fixed option list.
    Enum,
    /// Map of string keys to string values.
    StringMap,
    /// Repeated section addressed by position.
    SectionList,
    /// Repeated section addressed by its name field.
    UniqueSectionList,
    /// Alternative key for another field.
    Alias,
}

impl ValueKind {
    /// Snake-case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::ByteSize => "byte_size",
            Self::UnsignedInt => "unsigned_int",
            Self::UnsignedOctal => "unsigned_octal",
            Self::Duration => "duration",
            Self::DurationMillis => "duration_millis",
            Self::Port => "port",
            Self::String => "string",
            Self::ExpandableString => "expandable_string",
            Self::Enum => "enum",
            Self::StringMap => "string_map",
            Self::SectionList => "section_list",
            Self::UniqueSectionList => "unique_section_list",
            Self::Alias => "alias",
        }
    }

    /// Whether the kind holds child sections.
    #[must_use]
    pub const fn is_section_list(self) -> bool {
        matches!(self, Self::SectionList | Self::UniqueSectionList)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field's value lives inside a [`Settings`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// The field owns this storage slot.
    Slot(usize),
    /// The field is an alias reading another field's slot.
    Alias(usize),
}

impl Accessor {
    /// Storage slot read through this accessor.
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            Self::Slot(slot) | Self::Alias(slot) => slot,
        }
    }
}

/// Metadata for one field of a schema.
#[derive(Debug, Clone)]
pub struct FieldDef {
    key: &'static str,
    kind: ValueKind,
    hidden: bool,
    accessor: Accessor,
    child: Option<&'static Schema>,
}

impl FieldDef {
    /// Key of the field.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Kind of value stored.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether the field is hidden from full dumps unless explicitly set.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Resolved storage accessor.
    #[must_use]
    pub const fn accessor(&self) -> Accessor {
        self.accessor
    }

    /// Schema of the sections stored by a section list.
    #[must_use]
    pub const fn child(&self) -> Option<&'static Schema> {
        self.child
    }
}

/// Ordered field table for one settings structure.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldDef>,
    defaults: Settings,
    name_slot: Option<usize>,
}

impl Schema {
    /// Starts building a schema called `name`.
    #[must_use]
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Name of the schema.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Looks up a field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.key == key)
    }

    /// Default value of every storage slot, as declared.
    #[must_use]
    pub const fn defaults(&self) -> &Settings {
        &self.defaults
    }

    /// Storage slot of the field naming sections of this schema.
    #[must_use]
    pub const fn name_slot(&self) -> Option<usize> {
        self.name_slot
    }

    /// Number of storage slots an instance of this schema holds.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        self.defaults.len()
    }

    /// Creates an instance holding the defaults. Enumerations select their
    /// first option.
    #[must_use]
    pub fn new_settings(&self) -> Settings {
        let values = self
            .defaults
            .values()
            .iter()
            .map(|value| match value {
                SettingValue::Scalar(ScalarValue::Enum(options)) => {
                    SettingValue::Scalar(ScalarValue::Enum(first_option(options).to_owned()))
                }
                other => other.clone(),
            })
            .collect();
        Settings::from_values(values)
    }

    /// Creates a shadow in which nothing has been set.
    #[must_use]
    pub fn new_changes(&self) -> Changes {
        Changes::unchanged(self.slot_count())
    }
}

fn first_option(options: &str) -> &str {
    options
        .split_once(crate::ENUM_SEPARATOR)
        .map_or(options, |(first, _)| first)
}
