use super::Error;

/// Error when no connection is registered under the requested name.
#[derive(Debug)]
pub(super) struct ConnectionNotFound {
    name: Box<str>,
}

impl std::error::Error for ConnectionNotFound {}

impl core::fmt::Display for ConnectionNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "connection not found: {}", self.name)
    }
}

impl Error {
    pub fn connection_not_found(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ConnectionNotFound(ConnectionNotFound {
            name: name.into().into(),
        }))
    }

    pub fn is_connection_not_found(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::ConnectionNotFound(_))
    }
}
