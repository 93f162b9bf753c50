use super::*;

/// Read rows from one table, optionally inner-joined with others.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub table: String,

    /// Columns to return for the queried table
    pub columns: Vec<String>,

    /// All filters must hold for a row to match
    pub filters: Vec<Filter>,

    pub group_by: Vec<String>,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<usize>,

    pub joins: Vec<Join>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: Stored },

    /// Free-form condition text with positional arguments, passed through
    /// to the connection untouched
    Predicate { text: String, args: Vec<Stored> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Inner join of the queried table (the source) with `table` (the target),
/// matching `source_column` against `target_column`.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Association the join was requested through
    pub association: String,

    pub table: String,

    /// Columns to return for the joined table
    pub columns: Vec<String>,

    pub source_column: String,

    pub target_column: String,
}

impl From<Query> for Operation {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
