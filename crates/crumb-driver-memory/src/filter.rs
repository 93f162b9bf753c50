use crumb_core::{
    driver::{operation::Filter, Record},
    stmt::Stored,
    Error, Result,
};

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A filter ready to be evaluated against records.
#[derive(Debug)]
pub(crate) struct Compiled<'a> {
    column: &'a str,
    op: BinaryOp,
    value: &'a Stored,
}

impl<'a> Compiled<'a> {
    /// Equality filters compile directly. Predicates must have the shape
    /// `<column> <op> ?` with a single argument.
    pub(crate) fn new(filter: &'a Filter) -> Result<Compiled<'a>> {
        match filter {
            Filter::Eq { column, value } => Ok(Compiled {
                column,
                op: BinaryOp::Eq,
                value,
            }),
            Filter::Predicate { text, args } => {
                let unsupported = || {
                    Error::invalid_statement(format!(
                        "memory driver cannot evaluate predicate `{text}`"
                    ))
                };

                let tokens: Vec<_> = text.split_whitespace().collect();
                let [column, op, "?"] = tokens[..] else {
                    return Err(unsupported());
                };
                let [value] = &args[..] else {
                    return Err(unsupported());
                };

                let op = match op {
                    "=" | "==" => BinaryOp::Eq,
                    "!=" | "<>" => BinaryOp::Ne,
                    "<" => BinaryOp::Lt,
                    "<=" => BinaryOp::Le,
                    ">" => BinaryOp::Gt,
                    ">=" => BinaryOp::Ge,
                    _ => return Err(unsupported()),
                };

                Ok(Compiled { column, op, value })
            }
        }
    }

    /// Missing columns read as null, and null never satisfies a comparison.
    pub(crate) fn matches(&self, record: &Record) -> bool {
        let Some(ordering) = record
            .get(self.column)
            .and_then(|stored| stored.compare(self.value))
        else {
            return false;
        };

        match self.op {
            BinaryOp::Eq => ordering == Ordering::Equal,
            BinaryOp::Ne => ordering != Ordering::Equal,
            BinaryOp::Lt => ordering == Ordering::Less,
            BinaryOp::Le => ordering != Ordering::Greater,
            BinaryOp::Gt => ordering == Ordering::Greater,
            BinaryOp::Ge => ordering != Ordering::Less,
        }
    }
}
