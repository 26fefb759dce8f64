//! Builder assembling and validating [`Schema`] tables.

use std::collections::HashSet;

use super::{Accessor, FieldDef, Schema, ValueKind};
use crate::{
    error::SchemaError,
    value::{ScalarValue, SettingValue, Settings},
};

/// Declaration of one field, consumed by [`SchemaBuilder::field`].
#[derive(Debug, Clone)]
pub struct FieldSpec {
    key: &'static str,
    kind: ValueKind,
    hidden: bool,
    default: Option<SettingValue>,
    child: Option<&'static Schema>,
    alias_of: Option<&'static str>,
}

impl FieldSpec {
    /// Declares a field of `kind` with an explicit default.
    ///
    /// The default must match `kind`; [`SchemaBuilder::build`] rejects it
    /// otherwise.
    #[must_use]
    pub const fn with_default(key: &'static str, kind: ValueKind, default: SettingValue) -> Self {
        Self {
            key,
            kind,
            hidden: false,
            default: Some(default),
            child: None,
            alias_of: None,
        }
    }

    fn scalar(key: &'static str, default: ScalarValue) -> Self {
        Self::with_default(key, default.kind(), SettingValue::Scalar(default))
    }

    /// Boolean field.
    #[must_use]
    pub fn bool(key: &'static str, default: bool) -> Self {
        Self::scalar(key, ScalarValue::Bool(default))
    }

    /// Byte size field.
    #[must_use]
    pub fn size(key: &'static str, default: u64) -> Self {
        Self::scalar(key, ScalarValue::ByteSize(default))
    }

    /// Decimal integer field.
    #[must_use]
    pub fn uint(key: &'static str, default: u32) -> Self {
        Self::scalar(key, ScalarValue::UnsignedInt(default))
    }

    /// Octal integer field.
    #[must_use]
    pub fn octal(key: &'static str, default: u32) -> Self {
        Self::scalar(key, ScalarValue::UnsignedOctal(default))
    }

    /// Interval in seconds.
    #[must_use]
    pub fn duration(key: &'static str, secs: u32) -> Self {
        Self::scalar(key, ScalarValue::Duration(secs))
    }

    /// Interval in milliseconds.
    #[must_use]
    pub fn duration_ms(key: &'static str, msecs: u32) -> Self {
        Self::scalar(key, ScalarValue::DurationMillis(msecs))
    }

    /// Port field.
    #[must_use]
    pub fn port(key: &'static str, default: u16) -> Self {
        Self::scalar(key, ScalarValue::Port(default))
    }

    /// Plain string field; `None` leaves it unset.
    #[must_use]
    pub fn string(key: &'static str, default: Option<&str>) -> Self {
        Self::scalar(key, ScalarValue::String(default.map(str::to_owned)))
    }

    /// Expandable string field. The default is stored unexpanded, carrying
    /// the sentinel byte like every parsed value.
    #[must_use]
    pub fn expandable(key: &'static str, default: Option<&str>) -> Self {
        let value = default.map_or(ScalarValue::ExpandableString(None), ScalarValue::unexpanded);
        Self::scalar(key, value)
    }

    /// Enumeration field. `options` lists the allowed names separated by
    /// `:`; the first one is the default selection.
    #[must_use]
    pub fn enumeration(key: &'static str, options: &str) -> Self {
        Self::scalar(key, ScalarValue::Enum(options.to_owned()))
    }

    /// String map field, initially not created.
    #[must_use]
    pub const fn str_map(key: &'static str) -> Self {
        Self::with_default(key, ValueKind::StringMap, SettingValue::StringMap(None))
    }

    /// Repeated section addressed by position.
    #[must_use]
    pub const fn section_list(key: &'static str, child: &'static Schema) -> Self {
        Self::list(key, ValueKind::SectionList, child)
    }

    /// Repeated section addressed by the child schema's name field.
    #[must_use]
    pub const fn unique_section_list(key: &'static str, child: &'static Schema) -> Self {
        Self::list(key, ValueKind::UniqueSectionList, child)
    }

    const fn list(key: &'static str, kind: ValueKind, child: &'static Schema) -> Self {
        Self {
            key,
            kind,
            hidden: false,
            default: Some(SettingValue::Sections(Vec::new())),
            child: Some(child),
            alias_of: None,
        }
    }

    /// Alternative key reading the storage of `target`, which must be
    /// declared earlier in the same schema.
    #[must_use]
    pub const fn alias(key: &'static str, target: &'static str) -> Self {
        Self {
            key,
            kind: ValueKind::Alias,
            hidden: false,
            default: None,
            child: None,
            alias_of: Some(target),
        }
    }

    /// Marks the field hidden: full dumps omit it unless explicitly set.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Collects field declarations and builds a validated [`Schema`].
///
/// # Examples
///
/// ```
/// use config_export::{FieldSpec, Schema};
///
/// let schema = Schema::builder("inet_listener")
///     .field(FieldSpec::string("name", None))
///     .field(FieldSpec::port("port", 0))
///     .name_field("name")
///     .build()?;
/// assert_eq!(schema.name_slot(), Some(0));
/// # Ok::<_, config_export::SchemaError>(())
/// ```
#[derive(Debug)]
#[must_use]
pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<FieldSpec>,
    name_field: Option<&'static str>,
}

impl SchemaBuilder {
    pub(super) const fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            name_field: None,
        }
    }

    /// Appends a field.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Designates the string field naming sections of this schema when they
    /// are stored in a unique section list.
    pub const fn name_field(mut self, key: &'static str) -> Self {
        self.name_field = Some(key);
        self
    }

    /// Validates the declarations and resolves storage accessors.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when keys repeat, an alias target is unknown
    /// or is itself an alias, a default does not match its kind, the name
    /// field is missing or not a string, or a unique list points at a schema
    /// without a name field.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let schema = self.name;
        let mut seen = HashSet::with_capacity(self.fields.len());
        let mut fields: Vec<FieldDef> = Vec::with_capacity(self.fields.len());
        let mut defaults = Vec::with_capacity(self.fields.len());

        for spec in self.fields {
            if !seen.insert(spec.key) {
                return Err(SchemaError::DuplicateKey {
                    schema: schema.to_owned(),
                    key: spec.key.to_owned(),
                });
            }
            let accessor = match (spec.alias_of, spec.default) {
                (Some(target), _) => resolve_alias(schema, spec.key, target, &fields)?,
                (None, Some(default)) => {
                    if !default.matches(spec.kind) {
                        return Err(SchemaError::kind_mismatch(
                            schema,
                            spec.key,
                            spec.kind,
                            default.kind(),
                        ));
                    }
                    defaults.push(default);
                    Accessor::Slot(defaults.len() - 1)
                }
                (None, None) => {
                    return Err(SchemaError::kind_mismatch(
                        schema,
                        spec.key,
                        spec.kind,
                        ValueKind::Alias,
                    ));
                }
            };
            if spec.kind == ValueKind::UniqueSectionList
                && let Some(child) = spec.child
                && child.name_slot().is_none()
            {
                return Err(SchemaError::ChildWithoutName {
                    schema: schema.to_owned(),
                    key: spec.key.to_owned(),
                    child: child.name().to_owned(),
                });
            }
            fields.push(FieldDef {
                key: spec.key,
                kind: spec.kind,
                hidden: spec.hidden,
                accessor,
                child: spec.child,
            });
        }

        let name_slot = self
            .name_field
            .map(|key| resolve_name_field(schema, key, &fields))
            .transpose()?;

        Ok(Schema {
            name: schema,
            fields,
            defaults: Settings::from_values(defaults),
            name_slot,
        })
    }
}

fn resolve_alias(
    schema: &str,
    alias: &str,
    target: &str,
    fields: &[FieldDef],
) -> Result<Accessor, SchemaError> {
    let def = fields.iter().find(|def| def.key == target).ok_or_else(|| {
        SchemaError::UnknownAliasTarget {
            schema: schema.to_owned(),
            alias: alias.to_owned(),
            target: target.to_owned(),
        }
    })?;
    match def.accessor {
        Accessor::Slot(slot) => Ok(Accessor::Alias(slot)),
        Accessor::Alias(_) => Err(SchemaError::NestedAlias {
            schema: schema.to_owned(),
            alias: alias.to_owned(),
            target: target.to_owned(),
        }),
    }
}

fn resolve_name_field(schema: &str, key: &str, fields: &[FieldDef]) -> Result<usize, SchemaError> {
    let def = fields
        .iter()
        .find(|def| def.key == key)
        .ok_or_else(|| SchemaError::NameFieldMissing {
            schema: schema.to_owned(),
            key: key.to_owned(),
        })?;
    match def.accessor {
        Accessor::Slot(slot) if def.kind == ValueKind::String => Ok(slot),
        _ => Err(SchemaError::NameFieldNotString {
            schema: schema.to_owned(),
            key: key.to_owned(),
            kind: def.kind,
        }),
    }
}
