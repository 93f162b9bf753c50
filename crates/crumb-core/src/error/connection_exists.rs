use super::Error;

/// Error when establishing a connection under a name that is already taken.
#[derive(Debug)]
pub(super) struct ConnectionExists {
    name: Box<str>,
}

impl std::error::Error for ConnectionExists {}

impl core::fmt::Display for ConnectionExists {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "connection `{}` already established", self.name)
    }
}

impl Error {
    pub fn connection_exists(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ConnectionExists(ConnectionExists {
            name: name.into().into(),
        }))
    }

    pub fn is_connection_exists(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::ConnectionExists(_))
    }
}
