use super::State;

use crumb_core::{
    driver::operation::{Filter, Join, OrderBy, Query},
    schema::Kind,
    stmt::Stored,
    Error, Result,
};

impl State {
    /// The query operation equivalent to this relation.
    pub(super) fn lower(&self) -> Result<Query> {
        let schema = &self.schema;

        let mut filters = vec![];

        for (name, value) in &self.scope {
            let attribute = schema
                .attribute(name)
                .ok_or_else(|| Error::invalid_schema(format!("unknown attribute `{name}`")))?;

            filters.push(Filter::Eq {
                column: name.clone(),
                value: attribute.serialize(value)?,
            });
        }

        for predicate in &self.predicates {
            let arg = match Kind::infer(&predicate.arg) {
                Some(kind) => kind.serialize(&predicate.arg)?,
                None => Stored::Null,
            };

            filters.push(Filter::Predicate {
                text: predicate.text.clone(),
                args: vec![arg],
            });
        }

        Ok(Query {
            table: schema.table_name().to_string(),
            columns: self.columns.clone(),
            filters,
            group_by: self.group_by.clone(),
            order_by: self
                .order_by
                .iter()
                .map(|(column, direction)| OrderBy {
                    column: column.clone(),
                    direction: *direction,
                })
                .collect(),
            limit: self.limit,
            joins: self
                .joins
                .iter()
                .map(|join| Join {
                    association: join.association.name.clone(),
                    table: join.target.table_name().to_string(),
                    columns: vec![],
                    source_column: join.source_column.clone(),
                    target_column: join.target_column.clone(),
                })
                .collect(),
        })
    }
}
