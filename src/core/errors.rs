//! TDC-prefixed error types with structured error codes.
//!
//! Classification itself has no failure modes; every error here belongs to
//! the interface boundary (answer parsing, profile construction, serialized
//! profile input, reference lookups by name).

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, TdcError>;

/// Top-level error type for the test-double classifier.
#[derive(Debug, Error)]
pub enum TdcError {
    #[error("[TDC-1001] incomplete usage profile: unanswered observations: {missing}")]
    IncompleteProfile { missing: String },

    #[error("[TDC-1002] unrecognized yes/no answer: {raw:?}")]
    InvalidAnswer { raw: String },

    #[error("[TDC-1003] profile parse failure in {context}: {details}")]
    ProfileParse {
        context: &'static str,
        details: String,
    },

    #[error(
        "[TDC-2001] unknown test-double category: {name:?} (expected dummy, stub, fake, spy, or mock)"
    )]
    UnknownCategory { name: String },

    #[error("[TDC-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[TDC-3002] answer stream closed after {answered} of 5 answers")]
    AnswerStreamClosed { answered: usize },
}

impl TdcError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IncompleteProfile { .. } => "TDC-1001",
            Self::InvalidAnswer { .. } => "TDC-1002",
            Self::ProfileParse { .. } => "TDC-1003",
            Self::UnknownCategory { .. } => "TDC-2001",
            Self::Io { .. } => "TDC-3001",
            Self::AnswerStreamClosed { .. } => "TDC-3002",
        }
    }

    /// Whether this error rejects caller-supplied input (as opposed to a
    /// runtime failure such as an unreadable file).
    #[must_use]
    pub const fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Self::IncompleteProfile { .. }
                | Self::InvalidAnswer { .. }
                | Self::ProfileParse { .. }
                | Self::UnknownCategory { .. }
                | Self::AnswerStreamClosed { .. }
        )
    }

    /// Process exit code for the CLI: 2 for input rejections, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.is_input_rejection() { 2 } else { 1 }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for TdcError {
    fn from(value: serde_json::Error) -> Self {
        Self::ProfileParse {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}
