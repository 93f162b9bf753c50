mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod query;
pub use query::{Direction, Filter, Join, OrderBy, Query};

mod update;
pub use update::Update;

use crate::stmt::Stored;

/// Any of the descriptors a connection executes.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Query(Query),
}

/// Identifies a single record by its primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub column: String,
    pub value: Stored,
}
