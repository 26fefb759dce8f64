//! Export sessions binding module parsers to a sink.
//!
//! A session owns the walk state shared by every module it exports: the
//! dedup registry and the running section index. Modules are either cloned
//! from a parsed configuration or borrowed from the caller.

mod parser;

use std::borrow::Cow;

use crate::{
    error::{ExportError, ExportResult},
    export::ExportContext,
    master::master_service_schema,
    options::ExportOptions,
    schema::Schema,
    sink::ExportSink,
    value::{ScalarValue, SettingValue},
};

pub use parser::{FilterParser, ModuleParser, ParsedConfig, SettingsParser};

/// One export pass over a list of modules.
///
/// Dropping the session releases every buffer it owns, including module
/// parsers copied by [`ExportSession::dup_module_parsers`].
#[derive(Debug)]
pub struct ExportSession<'a, S> {
    ctx: ExportContext<S>,
    modules: Cow<'a, [ModuleParser]>,
}

impl<'a, S: ExportSink> ExportSession<'a, S> {
    /// Opens a session with no modules bound.
    #[must_use]
    pub fn open(options: ExportOptions, sink: S) -> Self {
        Self {
            ctx: ExportContext::new(options, sink),
            modules: Cow::Borrowed(&[]),
        }
    }

    /// Seeds the running section index, as when continuing numbering from a
    /// previous session. The index wraps to zero past `usize::MAX`.
    #[must_use]
    pub fn with_section_index(mut self, start: usize) -> Self {
        self.ctx.set_section_index(start);
        self
    }

    /// Binds private copies of the global filter's module parsers.
    pub fn dup_module_parsers(&mut self, parsed: &ParsedConfig) {
        self.modules = Cow::Owned(parsed.global_filter().module_parsers().to_vec());
    }

    /// Binds module parsers owned by the caller.
    pub fn set_module_parsers(&mut self, modules: &'a [ModuleParser]) {
        self.modules = Cow::Borrowed(modules);
    }

    /// Number of bound modules.
    #[must_use]
    pub fn parser_count(&self) -> usize {
        self.modules.len()
    }

    /// Root schema of module `idx`.
    #[must_use]
    pub fn parser_schema(&self, idx: usize) -> Option<&'static Schema> {
        self.modules.get(idx).map(ModuleParser::root)
    }

    /// Next ordinal an anonymous section would receive.
    #[must_use]
    pub const fn section_index(&self) -> usize {
        self.ctx.section_index()
    }

    /// Exports module `idx` into the sink.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Delayed`] carrying the module's recorded
    /// message when the module failed to build. Nothing is emitted for it.
    ///
    /// # Panics
    ///
    /// Panics when `idx` is not below [`ExportSession::parser_count`], or
    /// when the module's settings do not match its schema.
    pub fn export_module(&mut self, idx: usize) -> ExportResult<()> {
        let count = self.modules.len();
        let module = self.modules.get(idx).unwrap_or_else(|| {
            panic!("module index {idx} out of range for {count} bound modules")
        });
        let root = module.root();
        if let Some(message) = module.delayed_error() {
            return Err(ExportError::delayed(root.name(), message));
        }

        let span = tracing::debug_span!("export_module", module = root.name());
        let _entered = span.enter();
        let before = self.ctx.emitted();
        let parser = module.parser();
        self.ctx
            .export_settings(root, false, parser.settings(), parser.changes());
        tracing::debug!(
            entries = self.ctx.emitted() - before,
            registered_keys = self.ctx.registered_keys(),
            "exported module"
        );
        Ok(())
    }

    /// Exports every bound module in order and closes the session.
    ///
    /// Returns the section index reached, for seeding a later session.
    ///
    /// # Errors
    ///
    /// Stops at the first module carrying a delayed error and returns it.
    /// Modules before it have already been emitted.
    pub fn export_all(mut self) -> ExportResult<usize> {
        for idx in 0..self.modules.len() {
            if let Err(err) = self.export_module(idx) {
                tracing::error!(module = idx, error = %err, "export aborted");
                return Err(err);
            }
        }
        Ok(self.ctx.section_index())
    }

    /// Closes the session and hands back its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.ctx.into_sink()
    }
}

impl<S> ExportSession<'_, S> {
    /// Space separated environment variables the master process passes on.
    ///
    /// # Panics
    ///
    /// Panics when no master-service module is bound.
    #[must_use]
    pub fn import_environment(&self) -> &str {
        self.master_string("import_environment")
    }

    /// Base directory of the master process.
    ///
    /// # Panics
    ///
    /// Panics when no master-service module is bound.
    #[must_use]
    pub fn base_dir(&self) -> &str {
        self.master_string("base_dir")
    }

    fn master_string(&self, key: &str) -> &str {
        let master = master_service_schema();
        let Some(module) = self
            .modules
            .iter()
            .find(|module| std::ptr::eq(module.root(), master))
        else {
            panic!("no '{}' module is bound to the export session", master.name());
        };
        match module.parser().get(key) {
            Some(SettingValue::Scalar(ScalarValue::String(value))) => {
                value.as_deref().unwrap_or_default()
            }
            other => panic!("'{key}' of '{}' is not a string: {other:?}", master.name()),
        }
    }
}
