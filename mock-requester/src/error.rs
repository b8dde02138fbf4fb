//! Error types for request building, dispatch, and result extraction.
//!
//! Assertion mismatches (`expect_status`, `expect_header`) are deliberately
//! *not* represented here: they panic so the test harness reports them as
//! test failures rather than infrastructure errors.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;

/// Boxed error crossing the dispatch-engine boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for URI template resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UriError {
    /// A `{name}` placeholder had no matching positional argument.
    MissingArgument {
        /// The placeholder name as written in the pattern.
        placeholder: String,
    },
    /// A `{` was opened but never closed.
    UnterminatedPlaceholder {
        /// Byte offset of the opening brace in the trimmed pattern.
        position: usize,
    },
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { placeholder } => {
                write!(f, "no argument supplied for placeholder {{{placeholder}}}")
            }
            Self::UnterminatedPlaceholder { position } => {
                write!(f, "unterminated placeholder at offset {position}")
            }
        }
    }
}

impl std::error::Error for UriError {}

/// Error type for primitive conversion of a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertError {
    /// The text is not a valid integer of the requested width.
    Int {
        /// The offending response text.
        text: String,
        /// The underlying parse failure.
        source: ParseIntError,
    },
    /// The text is not a valid floating-point number.
    Float {
        /// The offending response text.
        text: String,
        /// The underlying parse failure.
        source: ParseFloatError,
    },
    /// The text is neither `true` nor `false`.
    Bool {
        /// The offending response text.
        text: String,
        /// The underlying parse failure.
        source: ParseBoolError,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { text, .. } => write!(f, "cannot parse `{text}` as an integer"),
            Self::Float { text, .. } => write!(f, "cannot parse `{text}` as a float"),
            Self::Bool { text, .. } => write!(f, "cannot parse `{text}` as a boolean"),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Int { source, .. } => Some(source),
            Self::Float { source, .. } => Some(source),
            Self::Bool { source, .. } => Some(source),
        }
    }
}

/// Error type for request dispatch and JSON (de)serialization.
///
/// Every failure raised by the engine or the JSON mappers is converted into
/// this single type at the dispatch boundary, always carrying the original
/// cause, so fluent call chains stay linear.
#[derive(Debug)]
#[non_exhaustive]
pub enum RequestError {
    /// The dispatch engine failed to execute the request.
    Dispatch(BoxError),
    /// JSON serialization of the outgoing body failed.
    Serialize(serde_json::Error),
    /// JSON deserialization of the response body failed.
    Deserialize(serde_json::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch(source) => write!(f, "request dispatch failed: {source}"),
            Self::Serialize(source) => write!(f, "request body serialization failed: {source}"),
            Self::Deserialize(source) => {
                write!(f, "response body deserialization failed: {source}")
            }
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dispatch(source) => Some(source.as_ref()),
            Self::Serialize(source) | Self::Deserialize(source) => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_error_display() {
        let err = UriError::MissingArgument {
            placeholder: "id".to_string(),
        };
        assert_eq!(err.to_string(), "no argument supplied for placeholder {id}");
    }

    #[test]
    fn convert_error_keeps_cause() {
        let source = "abc".parse::<i32>().unwrap_err();
        let err = ConvertError::Int {
            text: "abc".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "cannot parse `abc` as an integer");
    }

    #[test]
    fn request_error_keeps_cause() {
        let cause: BoxError = "engine exploded".into();
        let err = RequestError::Dispatch(cause);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("engine exploded"));
    }
}
