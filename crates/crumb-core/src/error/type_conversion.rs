use crate::schema::Kind;

use super::Error;

/// Error when a value cannot be coerced to or from an attribute kind.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    value: Box<str>,
    kind: Kind,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.value, self.kind)
    }
}

impl Error {
    /// Creates a type conversion error naming the target kind and the
    /// offending value.
    pub fn type_conversion(kind: Kind, value: impl core::fmt::Display) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            value: value.to_string().into(),
            kind,
        }))
    }

    pub fn is_type_conversion(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::TypeConversion(_))
    }
}
