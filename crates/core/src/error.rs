//! Error taxonomy for a generation run.
//!
//! Every variant is fatal: generation is a batch, all-or-nothing operation and
//! nothing is handed to a sink once one of these has been raised.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while discovering, rendering or writing TypeScript artifacts.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced type has no metadata (typically a missing input catalog).
    #[error(
        "cannot resolve metadata for `{missing}` referenced by `{declaring_type}` ({member}); \
         check that every catalog it depends on is part of the inputs"
    )]
    MetadataResolution {
        declaring_type: String,
        member: String,
        missing: String,
    },

    /// A discovered shape contains something with no TypeScript representation.
    #[error("cannot map `{declaring_type}.{member}` to TypeScript: {reason}")]
    TypeMapping {
        declaring_type: String,
        member: String,
        reason: String,
    },

    /// Two identities would be written to the same file.
    #[error("`{first}` and `{second}` would both be written to `{filename}`")]
    NamingCollision {
        filename: String,
        first: String,
        second: String,
    },

    /// No build rule matched a type. The catch-all rule makes this unreachable.
    #[error("no build rule matched `{0}`")]
    Classification(String),

    /// A textual type reference could not be parsed.
    #[error("invalid type reference `{text}`: {reason}")]
    TypeRefSyntax { text: String, reason: String },

    /// A metadata catalog could not be read, parsed or merged.
    #[error("invalid metadata catalog {}: {reason}", path.display())]
    Catalog { path: PathBuf, reason: String },

    /// The run configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem failure while staging or committing artifacts.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
