//! Primary error enums for schema construction and export sessions.

use figment::Error as FigmentError;
use thiserror::Error;

use crate::schema::ValueKind;

/// Errors surfaced by an export session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// A bound module failed to materialise its settings before the export.
    ///
    /// The message is reported verbatim; nothing is exported for the module.
    #[error("{message}")]
    Delayed {
        /// Name of the schema whose module carried the error.
        module: String,
        /// Message stored by the component that built the module.
        message: String,
    },

    /// Export options could not be gathered from their providers.
    #[error("Failed to load export options: {0}")]
    Options(#[from] Box<FigmentError>),
}

/// Errors raised while building a schema or populating a settings parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// Two fields of one schema share a key.
    #[error("schema '{schema}' defines '{key}' more than once")]
    DuplicateKey {
        /// Schema being built.
        schema: String,
        /// Repeated key.
        key: String,
    },

    /// An alias refers to a field that is not defined before it.
    #[error("alias '{alias}' in schema '{schema}' refers to unknown field '{target}'")]
    UnknownAliasTarget {
        /// Schema being built.
        schema: String,
        /// Key of the alias.
        alias: String,
        /// Key the alias points at.
        target: String,
    },

    /// An alias points at another alias.
    #[error("alias '{alias}' in schema '{schema}' points at alias '{target}'")]
    NestedAlias {
        /// Schema being built.
        schema: String,
        /// Key of the alias.
        alias: String,
        /// Key of the aliased alias.
        target: String,
    },

    /// The designated name field is not part of the schema.
    #[error("schema '{schema}' names its sections by unknown field '{key}'")]
    NameFieldMissing {
        /// Schema being built.
        schema: String,
        /// Key given as the name field.
        key: String,
    },

    /// The designated name field does not hold a plain string.
    #[error("name field '{key}' of schema '{schema}' must be a string, found {kind}")]
    NameFieldNotString {
        /// Schema being built.
        schema: String,
        /// Key given as the name field.
        key: String,
        /// Kind of the field.
        kind: ValueKind,
    },

    /// A uniquely named section list points at a schema without a name field.
    #[error("unique list '{key}' in schema '{schema}' uses schema '{child}' which has no name field")]
    ChildWithoutName {
        /// Schema being built.
        schema: String,
        /// Key of the list field.
        key: String,
        /// Name of the child schema.
        child: String,
    },

    /// A field's value does not match its declared kind.
    #[error("field '{key}' of schema '{schema}' is {expected}, got a {found} value")]
    KindMismatch {
        /// Schema owning the field.
        schema: String,
        /// Field key.
        key: String,
        /// Kind declared by the schema.
        expected: ValueKind,
        /// Kind of the supplied value.
        found: ValueKind,
    },

    /// A key lookup found no such field.
    #[error("schema '{schema}' has no field '{key}'")]
    UnknownKey {
        /// Schema searched.
        schema: String,
        /// Missing key.
        key: String,
    },

    /// A section was added to a list declared with a different child schema.
    #[error("section list '{key}' in schema '{schema}' expects '{expected}' sections, got '{found}'")]
    SectionSchemaMismatch {
        /// Schema owning the list.
        schema: String,
        /// Key of the list field.
        key: String,
        /// Child schema declared by the list.
        expected: String,
        /// Schema of the supplied section.
        found: String,
    },
}
