use crate::stmt::Stored;

use indexmap::IndexMap;

/// Column name to stored value for one table.
pub type Record = IndexMap<String, Stored>;

/// One result row: the queried table's columns, followed by one record per
/// join in the order the joins were requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub values: Record,
    pub joins: Vec<Record>,
}

impl Row {
    pub fn new(values: Record) -> Row {
        Row {
            values,
            joins: vec![],
        }
    }
}
