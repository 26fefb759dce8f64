//! Settings export engine for the mail server configuration subsystem.
//!
//! The crate flattens a schema-described settings tree, together with its
//! "explicitly set" shadow, into an ordered stream of `(key, value, kind)`
//! triples. The stream feeds configuration dumps, serialised configuration
//! handed to dependent processes, and incremental diffs.
//!
//! Parsing configuration text, expanding `%variables`, and deciding which
//! schemas exist are the responsibility of other components; this crate only
//! walks the schemas it is handed.
//!
//! ```rust
//! use config_export::{
//!     EntryCollector, ExportOptions, ExportScope, ExportSession, FieldSpec, ModuleParser,
//!     Schema, SettingsParser,
//! };
//! use std::sync::LazyLock;
//!
//! static LIMITS: LazyLock<Schema> = LazyLock::new(|| {
//!     Schema::builder("limits")
//!         .field(FieldSpec::size("vsz_limit", 256 * 1024 * 1024))
//!         .field(FieldSpec::duration("idle_kill", 60))
//!         .build()
//!         .unwrap_or_else(|err| panic!("{err}"))
//! });
//!
//! let modules = [ModuleParser::new(SettingsParser::new(&LIMITS))];
//! let mut collector = EntryCollector::new();
//! let mut session = ExportSession::open(
//!     ExportOptions::new(ExportScope::AllWithHidden, Default::default()),
//!     collector.sink(),
//! );
//! session.set_module_parsers(&modules);
//! session.export_all()?;
//! assert_eq!(collector.render(), "vsz_limit = 256 M\nidle_kill = 1 mins\n");
//! # Ok::<_, config_export::ExportError>(())
//! ```

mod dedup;
mod error;
mod export;
pub mod format;
pub mod master;
pub mod options;
pub mod schema;
pub mod section;
pub mod session;
pub mod sink;
pub mod value;

/// Separator joining the segments of a flattened key path.
pub const SETTINGS_SEPARATOR: char = '/';

/// Separator joining a string map's key to the key of one of its entries.
pub const MAP_SEPARATOR: char = ':';

/// Leading byte of an expandable string whose `%variables` are still pending.
pub const UNEXPANDED_SENTINEL: char = '0';

/// Separator between the options of an enumeration default.
pub const ENUM_SEPARATOR: char = ':';

pub use error::{ExportError, ExportResult, SchemaError};
pub use options::{ExportFlags, ExportOptions, ExportScope};
pub use schema::{Accessor, FieldDef, FieldSpec, Schema, SchemaBuilder, ValueKind};
pub use session::{ExportSession, FilterParser, ModuleParser, ParsedConfig, SettingsParser};
pub use sink::{EntryCollector, ExportEntry, ExportSink, KeyKind};
pub use value::{Change, Changes, ScalarValue, SettingValue, Settings};
