//! Dump scope and flags controlling an export session.
//!
//! [`ExportOptions`] can be built directly or gathered from layered
//! providers: built-in defaults, an optional TOML file, then
//! `CONFIG_EXPORT_*` environment variables.
//!
//! ```toml
//! scope = "set_only"
//!
//! [flags]
//! deduplicate_keys = true
//! ```

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// Which fields are dumped even when they hold their default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
    /// Dump every field, hidden ones included.
    AllWithHidden,
    /// Dump every visible field; hidden fields only when explicitly set.
    #[default]
    AllWithoutHidden,
    /// Dump only explicitly set fields.
    SetOnly,
    /// Never force a default; only values that differ are dumped.
    ChangedOnly,
}

impl ExportScope {
    /// Whether a field is dumped regardless of its default.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_export::ExportScope;
    /// assert!(ExportScope::AllWithoutHidden.dump_default(false, false));
    /// assert!(!ExportScope::AllWithoutHidden.dump_default(true, false));
    /// assert!(ExportScope::SetOnly.dump_default(true, true));
    /// ```
    #[must_use]
    pub const fn dump_default(self, hidden: bool, explicitly_set: bool) -> bool {
        match self {
            Self::AllWithHidden => true,
            Self::AllWithoutHidden => !hidden || explicitly_set,
            Self::SetOnly => explicitly_set,
            Self::ChangedOnly => false,
        }
    }
}

/// Independent switches refining an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportFlags {
    /// Inside uniquely named sections, unset fields compare against the
    /// section's own values instead of the schema defaults.
    pub hide_list_defaults: bool,
    /// Emit each flattened key at most once per session.
    pub deduplicate_keys: bool,
}

impl ExportFlags {
    /// Enables [`ExportFlags::hide_list_defaults`].
    #[must_use]
    pub const fn hide_list_defaults(mut self) -> Self {
        self.hide_list_defaults = true;
        self
    }

    /// Enables [`ExportFlags::deduplicate_keys`].
    #[must_use]
    pub const fn deduplicate_keys(mut self) -> Self {
        self.deduplicate_keys = true;
        self
    }
}

/// Scope and flags of one export session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Dump policy.
    pub scope: ExportScope,
    /// Additional switches.
    pub flags: ExportFlags,
}

impl ExportOptions {
    /// Prefix of environment variables overriding options. Nested keys are
    /// separated by `__`, as in `CONFIG_EXPORT_FLAGS__DEDUPLICATE_KEYS`.
    pub const ENV_PREFIX: &'static str = "CONFIG_EXPORT_";

    /// Options with the given scope and flags.
    #[must_use]
    pub const fn new(scope: ExportScope, flags: ExportFlags) -> Self {
        Self { scope, flags }
    }

    /// Layered providers for options: defaults, then `file` when given,
    /// then environment variables.
    #[must_use]
    pub fn figment(file: Option<&Utf8Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path.as_std_path()));
        }
        figment.merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
    }

    /// Loads options from [`ExportOptions::figment`].
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Options`] when a provider fails or a value has
    /// the wrong shape, such as an unknown scope name.
    pub fn load(file: Option<&Utf8Path>) -> ExportResult<Self> {
        let options: Self = Self::figment(file)
            .extract()
            .map_err(ExportError::options)?;
        tracing::debug!(scope = ?options.scope, flags = ?options.flags, "loaded export options");
        Ok(options)
    }
}
