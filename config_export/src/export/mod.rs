//! Recursive walk turning a settings tree into emitted entries.
//!
//! The walker visits fields in schema order and descends depth first into
//! section lists. The key prefix of the current section lives in one buffer
//! that [`PrefixGuard`] extends on entry and truncates when it is dropped.

mod guard;

use crate::{
    MAP_SEPARATOR, SETTINGS_SEPARATOR,
    dedup::KeyRegistry,
    format::format_scalar,
    options::{ExportFlags, ExportOptions, ExportScope},
    schema::{Accessor, FieldDef, Schema, ValueKind},
    section::section_name,
    sink::{ExportSink, KeyKind},
    value::{Changes, SettingValue, Settings},
};

use guard::PrefixGuard;

/// Mutable state of one export pass.
#[derive(Debug)]
pub(crate) struct ExportContext<S> {
    scope: ExportScope,
    flags: ExportFlags,
    prefix: String,
    keys: KeyRegistry,
    section_idx: usize,
    emitted: usize,
    sink: S,
}

impl<S> ExportContext<S> {
    pub(crate) fn new(options: ExportOptions, sink: S) -> Self {
        Self {
            scope: options.scope,
            flags: options.flags,
            prefix: String::with_capacity(64),
            keys: KeyRegistry::new(options.flags.deduplicate_keys),
            section_idx: 0,
            emitted: 0,
            sink,
        }
    }

    pub(crate) const fn section_index(&self) -> usize {
        self.section_idx
    }

    pub(crate) const fn set_section_index(&mut self, idx: usize) {
        self.section_idx = idx;
    }

    /// Number of entries handed to the sink so far.
    pub(crate) const fn emitted(&self) -> usize {
        self.emitted
    }

    pub(crate) fn registered_keys(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn into_sink(self) -> S {
        self.sink
    }

    fn composed_key(&self, def: &FieldDef) -> String {
        let mut key = String::with_capacity(self.prefix.len() + def.key().len());
        key.push_str(&self.prefix);
        key.push_str(def.key());
        key
    }
}

impl<S: ExportSink> ExportContext<S> {
    /// Emits every field of `set` as described by `schema`.
    ///
    /// `parent_unique` is true while walking an element of a uniquely named
    /// section list.
    pub(crate) fn export_settings(
        &mut self,
        schema: &Schema,
        parent_unique: bool,
        set: &Settings,
        changes: &Changes,
    ) {
        assert_eq!(
            set.values().len(),
            changes.entries().len(),
            "settings of schema '{}' and their shadow differ in length",
            schema.name()
        );
        for def in schema.fields() {
            self.export_field(schema, def, parent_unique, set, changes);
        }
    }

    fn export_field(
        &mut self,
        schema: &Schema,
        def: &FieldDef,
        parent_unique: bool,
        set: &Settings,
        changes: &Changes,
    ) {
        let Accessor::Slot(slot) = def.accessor() else {
            return;
        };
        let value = set.get(slot).unwrap_or_else(|| {
            panic!(
                "settings for schema '{}' have no slot {slot} for '{}'",
                schema.name(),
                def.key()
            )
        });
        assert!(
            value.matches(def.kind()),
            "field '{}' of schema '{}' is {}, found a {} value",
            def.key(),
            schema.name(),
            def.kind(),
            value.kind()
        );

        let explicitly_set = changes.is_set(slot);
        let is_name_field = schema.name_slot() == Some(slot);
        let mut dump_default = self.scope.dump_default(def.is_hidden(), explicitly_set);
        let mut default = schema.defaults().get(slot);
        if parent_unique && self.flags.hide_list_defaults {
            if !explicitly_set && !is_name_field {
                // Unset fields of a named section inherit the section's own
                // values, not the schema defaults.
                default = Some(value);
            } else {
                dump_default = true;
            }
        }

        match value {
            SettingValue::Scalar(scalar) => {
                let default_scalar = default.and_then(SettingValue::as_scalar);
                if let Some(text) = format_scalar(scalar, default_scalar, dump_default) {
                    let kind = if is_name_field && parent_unique {
                        KeyKind::UniqueKey
                    } else {
                        KeyKind::Normal
                    };
                    self.emit_field(def, &text, kind);
                }
            }
            SettingValue::StringMap(Some(pairs)) => self.export_map(def, pairs),
            SettingValue::StringMap(None) => {}
            SettingValue::Sections(children) => {
                let child_changes = changes.sections(slot);
                assert_eq!(
                    children.len(),
                    child_changes.len(),
                    "section list '{}' of schema '{}' and its shadow differ in length",
                    def.key(),
                    schema.name()
                );
                self.export_sections(def, children, child_changes);
            }
        }
    }

    fn emit_field(&mut self, def: &FieldDef, text: &str, kind: KeyKind) {
        let key = self.composed_key(def);
        if self.keys.contains(&key) {
            tracing::trace!(%key, "suppressed duplicate key");
            return;
        }
        self.emit(&key, text, kind);
        self.keys.register(key);
    }

    fn emit(&mut self, key: &str, value: &str, kind: KeyKind) {
        self.sink.entry(key, value, kind);
        self.emitted += 1;
    }

    fn export_map(&mut self, def: &FieldDef, pairs: &[(String, String)]) {
        let key = self.composed_key(def);
        if self.keys.contains(&key) {
            tracing::trace!(%key, "suppressed duplicate map");
            return;
        }
        self.emit(&key, "", KeyKind::KeyList);
        for (name, value) in pairs {
            let mut entry_key = String::with_capacity(key.len() + name.len() + 1);
            entry_key.push_str(&key);
            entry_key.push(MAP_SEPARATOR);
            entry_key.push_str(name);
            self.emit(&entry_key, value, KeyKind::Normal);
        }
        self.keys.register(key);
    }

    fn export_sections(&mut self, def: &FieldDef, children: &[Settings], changes: &[Changes]) {
        if children.is_empty() {
            return;
        }
        let Some(child_schema) = def.child() else {
            panic!("section list '{}' has no child schema", def.key());
        };
        let start = self.section_idx;
        let segments: Vec<String> = children
            .iter()
            .enumerate()
            .map(|(i, child)| section_name(def, child, start.wrapping_add(i)))
            .collect();
        self.emit_field(def, &segments.join(" "), KeyKind::List);

        // The ordinal counter wraps instead of overflowing.
        self.section_idx = self.section_idx.wrapping_add(children.len());
        let unique = def.kind() == ValueKind::UniqueSectionList;
        for ((child, child_changes), segment) in children.iter().zip(changes).zip(&segments) {
            let mut scope = PrefixGuard::new(self);
            scope.push(def.key());
            scope.push_char(SETTINGS_SEPARATOR);
            scope.push(segment);
            scope.push_char(SETTINGS_SEPARATOR);
            scope.export_settings(child_schema, unique, child, child_changes);
        }
    }
}
