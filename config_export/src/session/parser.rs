//! Settings parsers and the module lists an export session walks.
//!
//! A [`SettingsParser`] pairs a schema with its values and shadow. The
//! configuration parser fills it in; the export session only reads it.

use crate::{
    error::SchemaError,
    schema::{Accessor, FieldDef, Schema, ValueKind},
    value::{Changes, SettingValue, Settings},
};

/// Values and shadow for one schema.
#[derive(Debug, Clone)]
pub struct SettingsParser {
    schema: &'static Schema,
    settings: Settings,
    changes: Changes,
}

impl SettingsParser {
    /// Parser holding the schema defaults with nothing set.
    #[must_use]
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            settings: schema.new_settings(),
            changes: schema.new_changes(),
        }
    }

    /// Wraps values and shadow produced elsewhere.
    ///
    /// The pair is checked lazily: exporting a mismatched pair panics.
    #[must_use]
    pub const fn from_parts(schema: &'static Schema, settings: Settings, changes: Changes) -> Self {
        Self {
            schema,
            settings,
            changes,
        }
    }

    /// Schema describing the values.
    #[must_use]
    pub const fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Current values.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Shadow recording explicit assignments.
    #[must_use]
    pub const fn changes(&self) -> &Changes {
        &self.changes
    }

    /// Reads the value of `key`, following aliases.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        let def = self.schema.field(key)?;
        self.settings.get(def.accessor().slot())
    }

    /// Assigns `value` to `key` and marks it explicitly set. Aliases write
    /// through to their target.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownKey`] for keys the schema lacks and
    /// [`SchemaError::KindMismatch`] when `value` does not fit the field.
    /// Section lists are populated with [`SettingsParser::add_section`].
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> Result<(), SchemaError> {
        let stored: SettingValue = value.into();
        let (slot, kind) = self.storage(key)?;
        if kind.is_section_list() || !stored.matches(kind) {
            return Err(SchemaError::kind_mismatch(
                self.schema.name(),
                key,
                kind,
                stored.kind(),
            ));
        }
        self.store(slot, stored);
        Ok(())
    }

    /// Adds one `(name, value)` pair to the string map `key`, creating the
    /// map when needed.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when `key` is unknown or not a string map.
    pub fn insert_map_entry(
        &mut self,
        key: &str,
        name: &str,
        value: &str,
    ) -> Result<(), SchemaError> {
        let (slot, kind) = self.storage(key)?;
        if kind != ValueKind::StringMap {
            return Err(SchemaError::kind_mismatch(
                self.schema.name(),
                key,
                kind,
                ValueKind::StringMap,
            ));
        }
        if let Some(SettingValue::StringMap(map)) = self.settings.get_mut(slot) {
            map.get_or_insert_with(Vec::new)
                .push((name.to_owned(), value.to_owned()));
        }
        self.changes.mark_changed(slot);
        Ok(())
    }

    /// Appends `section` to the section list `key`, together with its
    /// shadow.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when `key` is unknown, not a section list,
    /// or declared with a different child schema.
    pub fn add_section(&mut self, key: &str, section: Self) -> Result<(), SchemaError> {
        let def = self.field_def(key)?;
        let slot = def.accessor().slot();
        match def.child() {
            Some(child) if std::ptr::eq(child, section.schema) => {}
            Some(child) => {
                return Err(SchemaError::SectionSchemaMismatch {
                    schema: self.schema.name().to_owned(),
                    key: key.to_owned(),
                    expected: child.name().to_owned(),
                    found: section.schema.name().to_owned(),
                });
            }
            None => {
                return Err(SchemaError::kind_mismatch(
                    self.schema.name(),
                    key,
                    def.kind(),
                    ValueKind::SectionList,
                ));
            }
        }
        if let Some(SettingValue::Sections(sections)) = self.settings.get_mut(slot) {
            sections.push(section.settings);
        }
        self.changes.push_section(slot, section.changes);
        Ok(())
    }

    fn field_def(&self, key: &str) -> Result<&'static FieldDef, SchemaError> {
        let schema: &'static Schema = self.schema;
        schema
            .field(key)
            .ok_or_else(|| SchemaError::unknown_key(schema.name(), key))
    }

    fn storage(&self, key: &str) -> Result<(usize, ValueKind), SchemaError> {
        let def = self.field_def(key)?;
        let kind = match def.accessor() {
            Accessor::Slot(_) => def.kind(),
            Accessor::Alias(slot) => self
                .schema
                .fields()
                .iter()
                .find(|target| target.accessor() == Accessor::Slot(slot))
                .map_or(def.kind(), FieldDef::kind),
        };
        Ok((def.accessor().slot(), kind))
    }

    fn store(&mut self, slot: usize, value: SettingValue) {
        if let Some(current) = self.settings.get_mut(slot) {
            *current = value;
        }
        self.changes.mark_changed(slot);
    }
}

/// Settings of one module (one root schema) bound to an export session.
#[derive(Debug, Clone)]
pub struct ModuleParser {
    parser: SettingsParser,
    delayed_error: Option<String>,
}

impl ModuleParser {
    /// Module exporting `parser`.
    #[must_use]
    pub const fn new(parser: SettingsParser) -> Self {
        Self {
            parser,
            delayed_error: None,
        }
    }

    /// Module whose settings could not be fully built. Exporting it
    /// reports `message` instead.
    #[must_use]
    pub fn failed(parser: SettingsParser, message: impl Into<String>) -> Self {
        Self {
            parser,
            delayed_error: Some(message.into()),
        }
    }

    /// Root schema of the module.
    #[must_use]
    pub const fn root(&self) -> &'static Schema {
        self.parser.schema()
    }

    /// The module's settings.
    #[must_use]
    pub const fn parser(&self) -> &SettingsParser {
        &self.parser
    }

    /// Error recorded while building the module, if any.
    #[must_use]
    pub fn delayed_error(&self) -> Option<&str> {
        self.delayed_error.as_deref()
    }
}

/// Module parsers sharing one configuration filter.
#[derive(Debug, Clone, Default)]
pub struct FilterParser {
    module_parsers: Vec<ModuleParser>,
}

impl FilterParser {
    /// Filter holding `module_parsers`.
    #[must_use]
    pub const fn new(module_parsers: Vec<ModuleParser>) -> Self {
        Self { module_parsers }
    }

    /// Module parsers in registration order.
    #[must_use]
    pub fn module_parsers(&self) -> &[ModuleParser] {
        &self.module_parsers
    }
}

/// Parsed configuration: the global filter plus any more specific ones.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfig {
    global: FilterParser,
    filters: Vec<FilterParser>,
}

impl ParsedConfig {
    /// Configuration whose global filter is `global`.
    #[must_use]
    pub const fn new(global: FilterParser) -> Self {
        Self {
            global,
            filters: Vec::new(),
        }
    }

    /// Adds a more specific filter.
    pub fn push_filter(&mut self, filter: FilterParser) {
        self.filters.push(filter);
    }

    /// The filter applying to every connection.
    #[must_use]
    pub const fn global_filter(&self) -> &FilterParser {
        &self.global
    }

    /// More specific filters in registration order.
    #[must_use]
    pub fn filters(&self) -> &[FilterParser] {
        &self.filters
    }
}
