use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - More than one attribute is marked as the primary key
/// - The declared primary key names an attribute that does not exist
/// - An attribute clashes with the synthesized `id` key
/// - A validator is attached to an attribute kind it cannot check
/// - A name is registered twice
///
/// Also raised at runtime when a caller assigns an attribute the schema does
/// not declare.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidSchema(_))
    }
}
