//! Flat error taxonomy shared by every component of the crate.
//!
//! Every fallible operation in `rdflex` returns a [`Status`] (or a full [`RdfError`]
//! when a source location is available). There is no panicking path through parsing,
//! serialization, interning or model mutation outside of programmer error
//! (`debug_assert!` only).

use std::fmt;

/// The flat status taxonomy named by the design: every call that can fail returns
/// one of these, and where a resource is produced the status is the sole indicator
/// of validity.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Status {
    Success,
    NonFatalFailure,
    Unknown,
    BadSyntax,
    BadArgument,
    BadIterator,
    NotFound,
    IdClash,
    BadCurie,
    Internal,
    Overflow,
    Invalid,
    NoData,
    BadWrite,
}

impl Status {
    /// Whether this status represents successful completion.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NonFatalFailure => "non-fatal failure",
            Self::Unknown => "unknown error",
            Self::BadSyntax => "bad syntax",
            Self::BadArgument => "bad argument",
            Self::BadIterator => "bad iterator",
            Self::NotFound => "not found",
            Self::IdClash => "id clash",
            Self::BadCurie => "bad curie",
            Self::Internal => "internal error",
            Self::Overflow => "overflow",
            Self::Invalid => "invalid",
            Self::NoData => "no data",
            Self::BadWrite => "bad write",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a diagnostic report, independent of the [`Status`] that produced it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Level {
    Error,
    Warning,
    Note,
}

/// A document-origin record used only for diagnostics.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Cursor {
    pub document: Option<String>,
    pub line: u64,
    pub column: u64,
}

impl Cursor {
    #[must_use]
    pub fn new(document: Option<String>, line: u64, column: u64) -> Self {
        Self {
            document,
            line,
            column,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(document) = &self.document {
            write!(f, "{document}:{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// The domain a report originates from, matching the design's "parser"/"writer"/…
/// classification.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Domain {
    Parser,
    Writer,
    Model,
    Environment,
    Interner,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parser => "parser",
            Self::Writer => "writer",
            Self::Model => "model",
            Self::Environment => "environment",
            Self::Interner => "interner",
        })
    }
}

/// A status paired with an optional source cursor and a human-readable message.
///
/// This is the concrete `Error` type returned from fallible `rdflex` operations.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{status}: {message}{}", .cursor.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct RdfError {
    pub status: Status,
    pub domain: Domain,
    pub cursor: Option<Cursor>,
    pub message: String,
}

impl RdfError {
    #[must_use]
    pub fn new(status: Status, domain: Domain, message: impl Into<String>) -> Self {
        Self {
            status,
            domain,
            cursor: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }
}

impl From<std::io::Error> for RdfError {
    fn from(e: std::io::Error) -> Self {
        Self::new(Status::BadSyntax, Domain::Parser, e.to_string())
    }
}

/// A report sink: by default writes formatted diagnostics to standard error, as the
/// design specifies for the case where no global callback has been installed.
/// Implementations may collect reports instead (useful for testing lax-mode
/// recovery).
pub trait Reporter {
    fn report(&mut self, level: Level, error: &RdfError);
}

/// The default reporter: writes to standard error via the `log` crate facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&mut self, level: Level, error: &RdfError) {
        match level {
            Level::Error => log::error!("{error}"),
            Level::Warning => log::warn!("{error}"),
            Level::Note => log::info!("{error}"),
        }
    }
}

/// A reporter that only collects reports, used by tests exercising lax-mode
/// recovery.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub reports: Vec<(Level, RdfError)>,
}

impl Reporter for CollectingReporter {
    fn report(&mut self, level: Level, error: &RdfError) {
        self.reports.push((level, error.clone()));
    }
}

pub type Result<T> = std::result::Result<T, RdfError>;
