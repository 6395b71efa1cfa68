//! Module: error
//! Responsibility: the core's fatal-error taxonomy.
//! Does not own: recoverable error handling — per spec.md §7 there isn't any;
//! every failure mode here is an invariant violation that aborts the call.

use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured, non-recoverable invariant-violation error. Not returned to
/// callers as a `Result` — see `fatal`/`fatal_after_warning` below — but
/// kept as a real type so its `Display` impl gives a single, consistent
/// message shape for the panic payload and the log line that precedes it.
///

#[derive(Debug, ThisError)]
#[error("{origin}:{class}: {message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvariantViolation,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvariantViolation => "invariant_violation",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Tagger,
    Oracle,
    TextValidator,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Tagger => "tagger",
            Self::Oracle => "oracle",
            Self::TextValidator => "text_validator",
        };
        write!(f, "{label}")
    }
}

/// Raise an invariant violation and abort. No partial results are returned;
/// either tagging completes fully or the call aborts (spec.md §7).
pub fn fatal(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> ! {
    let err = InternalError::new(class, origin, message);
    tracing::error!(class = %err.class, origin = %err.origin, "{}", err.message);
    panic!("{err}");
}

/// Same as `fatal`, but logs a warning first. Used for the §4.4.7
/// unknown-effective-indexed-field-type path, which spec.md §7 calls out
/// as "log a warning identifying the offending node and index element,
/// then fatal-assert" — two distinct log lines, not one.
pub fn fatal_after_warning(
    class: ErrorClass,
    origin: ErrorOrigin,
    warning: impl Into<String>,
    message: impl Into<String>,
) -> ! {
    tracing::warn!(origin = %origin, "{}", warning.into());
    fatal(class, origin, message)
}
