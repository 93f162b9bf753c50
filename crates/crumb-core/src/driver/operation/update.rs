use super::*;

/// Overwrite the listed columns of the record identified by `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub key: Key,
    pub values: Vec<(String, Stored)>,
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
