use crate::{filter::Compiled, Table, Tables};

use crumb_core::{
    driver::{operation, Record, Row},
    stmt::Stored,
    Result,
};

use std::{cmp::Ordering, collections::HashMap};

/// Evaluates `op` against a snapshot of the store.
pub(crate) fn run(tables: &HashMap<String, Table>, op: &operation::Query) -> Result<Vec<Row>> {
    let filters = op
        .filters
        .iter()
        .map(Compiled::new)
        .collect::<Result<Vec<_>>>()?;

    let mut matched: Vec<(&Record, Vec<&Record>)> = tables
        .rows(&op.table)
        .iter()
        .filter(|record| filters.iter().all(|filter| filter.matches(record)))
        .map(|record| (record, vec![]))
        .collect();

    for join in &op.joins {
        matched = inner_join(tables, matched, join);
    }

    if !op.group_by.is_empty() {
        matched = first_per_group(matched, &op.group_by);
    }

    for order_by in op.order_by.iter().rev() {
        matched.sort_by(|(a, _), (b, _)| {
            let ordering = compare_column(a, b, &order_by.column);
            match order_by.direction {
                operation::Direction::Asc => ordering,
                operation::Direction::Desc => ordering.reverse(),
            }
        });
    }

    if let Some(limit) = op.limit {
        matched.truncate(limit);
    }

    Ok(matched
        .into_iter()
        .map(|(record, joined)| Row {
            values: project(record, &op.columns),
            joins: joined
                .into_iter()
                .zip(&op.joins)
                .map(|(record, join)| project(record, &join.columns))
                .collect(),
        })
        .collect())
}

/// Pairs every matched row with each target row whose join column equals
/// the source column. Rows without a partner are dropped.
fn inner_join<'a>(
    tables: &'a HashMap<String, Table>,
    matched: Vec<(&'a Record, Vec<&'a Record>)>,
    join: &operation::Join,
) -> Vec<(&'a Record, Vec<&'a Record>)> {
    let targets = tables.rows(&join.table);
    let mut joined = vec![];

    for (record, partners) in matched {
        let Some(source) = record.get(&join.source_column) else {
            continue;
        };

        for target in targets {
            let is_match = target
                .get(&join.target_column)
                .and_then(|value| value.compare(source))
                .is_some_and(Ordering::is_eq);

            if is_match {
                let mut partners = partners.clone();
                partners.push(target);
                joined.push((record, partners));
            }
        }
    }

    joined
}

fn first_per_group<'a>(
    matched: Vec<(&'a Record, Vec<&'a Record>)>,
    group_by: &[String],
) -> Vec<(&'a Record, Vec<&'a Record>)> {
    let mut seen: Vec<Vec<Option<&Stored>>> = vec![];
    let mut grouped = vec![];

    for (record, joined) in matched {
        let key: Vec<_> = group_by.iter().map(|column| record.get(column)).collect();
        if !seen.contains(&key) {
            seen.push(key);
            grouped.push((record, joined));
        }
    }

    grouped
}

/// Nulls and missing values sort first.
fn compare_column(a: &Record, b: &Record, column: &str) -> Ordering {
    match (a.get(column), b.get(column)) {
        (Some(a), Some(b)) => a.compare(b).unwrap_or_else(|| {
            a.is_null().cmp(&b.is_null()).reverse()
        }),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn project(record: &Record, columns: &[String]) -> Record {
    if columns.is_empty() {
        return record.clone();
    }

    columns
        .iter()
        .filter_map(|column| Some((column.clone(), record.get(column)?.clone())))
        .collect()
}
