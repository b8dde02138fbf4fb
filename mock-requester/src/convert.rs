//! Primitive conversion of response text.
//!
//! [`Primitive`] covers the scalar targets a response body can be read into:
//! booleans, signed integers, floats, and `String` (returned unchanged).

use crate::error::ConvertError;

/// A scalar type a response body can be parsed into.
pub trait Primitive: Sized {
    /// Parse the response text into this type.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] carrying the underlying parse failure when the
    /// text is not a valid value of this type.
    fn from_text(text: &str) -> Result<Self, ConvertError>;
}

macro_rules! integer_primitive {
    ($($int:ty),*) => {$(
        impl Primitive for $int {
            fn from_text(text: &str) -> Result<Self, ConvertError> {
                text.parse().map_err(|source| ConvertError::Int {
                    text: text.to_string(),
                    source,
                })
            }
        }
    )*};
}

integer_primitive!(i8, i16, i32, i64);

macro_rules! float_primitive {
    ($($float:ty),*) => {$(
        impl Primitive for $float {
            fn from_text(text: &str) -> Result<Self, ConvertError> {
                text.parse().map_err(|source| ConvertError::Float {
                    text: text.to_string(),
                    source,
                })
            }
        }
    )*};
}

float_primitive!(f32, f64);

impl Primitive for bool {
    fn from_text(text: &str) -> Result<Self, ConvertError> {
        text.parse().map_err(|source| ConvertError::Bool {
            text: text.to_string(),
            source,
        })
    }
}

impl Primitive for String {
    /// Passthrough: the text is returned unchanged.
    fn from_text(text: &str) -> Result<Self, ConvertError> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_integers() {
        assert_eq!(i32::from_text("1987").unwrap(), 1987);
        assert_eq!(i64::from_text("1987").unwrap(), 1987);
        assert_eq!(i8::from_text("87").unwrap(), 87);
        assert_eq!(i16::from_text("1987").unwrap(), 1987);
    }

    #[test]
    fn converts_floats() {
        assert!((f32::from_text("1987.0").unwrap() - 1987.0).abs() < f32::EPSILON);
        assert!((f64::from_text("1987.0").unwrap() - 1987.0).abs() < f64::EPSILON);
    }

    #[test]
    fn converts_booleans() {
        assert!(bool::from_text("true").unwrap());
        assert!(!bool::from_text("false").unwrap());
    }

    #[test]
    fn string_is_passthrough() {
        assert_eq!(String::from_text("unknown").unwrap(), "unknown");
    }

    #[test]
    fn invalid_integer_propagates_the_parse_failure() {
        let err = i32::from_text("not a number").unwrap_err();
        assert!(matches!(err, ConvertError::Int { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_boolean_is_an_error() {
        assert!(matches!(
            bool::from_text("yes").unwrap_err(),
            ConvertError::Bool { .. }
        ));
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(matches!(
            i8::from_text("1987").unwrap_err(),
            ConvertError::Int { .. }
        ));
    }
}
