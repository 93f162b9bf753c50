use super::Entity;

use std::slice;

/// Records bound to an entity under an association name.
#[derive(Debug, Clone)]
pub enum Associated {
    /// Belongs-to and has-one associations
    One(Box<Entity>),

    /// Has-many associations
    Many(Vec<Entity>),
}

impl Associated {
    pub fn as_one(&self) -> Option<&Entity> {
        match self {
            Associated::One(entity) => Some(&**entity),
            Associated::Many(_) => None,
        }
    }

    /// All bound records; a single record reads as a slice of one.
    pub fn as_many(&self) -> &[Entity] {
        match self {
            Associated::One(entity) => slice::from_ref(&**entity),
            Associated::Many(entities) => entities,
        }
    }

    pub fn len(&self) -> usize {
        self.as_many().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_many().is_empty()
    }
}
