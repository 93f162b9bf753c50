use super::*;

/// Delete the record identified by `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub key: Key,
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
