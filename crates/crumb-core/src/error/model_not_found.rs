use super::Error;

/// Error when the reflection registry has no schema under the requested name.
#[derive(Debug)]
pub(super) struct ModelNotFound {
    name: Box<str>,
}

impl std::error::Error for ModelNotFound {}

impl core::fmt::Display for ModelNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model not found: {}", self.name)
    }
}

impl Error {
    pub fn model_not_found(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ModelNotFound(ModelNotFound {
            name: name.into().into(),
        }))
    }

    pub fn is_model_not_found(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::ModelNotFound(_))
    }
}
