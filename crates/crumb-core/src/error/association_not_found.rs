use super::Error;

/// Error when an entity has no association declared under the requested name.
#[derive(Debug)]
pub(super) struct AssociationNotFound {
    model: Box<str>,
    name: Box<str>,
}

impl std::error::Error for AssociationNotFound {}

impl core::fmt::Display for AssociationNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "association not found: {}::{}", self.model, self.name)
    }
}

impl Error {
    pub fn association_not_found(model: impl Into<String>, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::AssociationNotFound(AssociationNotFound {
            model: model.into().into(),
            name: name.into().into(),
        }))
    }

    pub fn is_association_not_found(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::AssociationNotFound(_))
    }
}
