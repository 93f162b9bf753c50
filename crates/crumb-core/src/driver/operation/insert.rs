use super::*;

/// Create a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    /// Primary key column; absent from `values` when the database is
    /// expected to generate it
    pub primary_key: String,

    pub values: Vec<(String, Stored)>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
