use super::Error;

/// Error when an operation cannot be issued in the entity's current state.
///
/// This occurs when:
/// - An update or delete is attempted without a primary key value
/// - An already persisted entity is inserted again
/// - A connection rejects an operation descriptor it does not understand
#[derive(Debug)]
pub(super) struct InvalidStatement {
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidStatement {}

impl core::fmt::Display for InvalidStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid statement: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid statement error.
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatement {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid statement error.
    pub fn is_invalid_statement(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidStatement(_))
    }
}
