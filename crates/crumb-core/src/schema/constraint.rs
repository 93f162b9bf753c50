mod length;
pub use length::ConstraintLength;

mod pattern;
pub use pattern::ConstraintPattern;

mod range;
pub use range::ConstraintRange;

use super::Kind;
use crate::{stmt::Value, Result};

/// A validator attached to an attribute.
///
/// Each variant only applies to some kinds; the schema builder rejects
/// mismatches so `check` can hand every validator its narrowly typed value.
#[derive(Debug, Clone)]
pub enum Constraint {
    Length(ConstraintLength),
    Pattern(ConstraintPattern),
    Range(ConstraintRange),
}

impl Constraint {
    pub fn applies_to(&self, kind: Kind) -> bool {
        match self {
            Constraint::Length(_) | Constraint::Pattern(_) => kind == Kind::String,
            Constraint::Range(_) => kind.is_numeric(),
        }
    }

    pub fn check(&self, attribute: &str, value: &Value) -> Result<()> {
        match (self, value) {
            (Constraint::Length(length), Value::String(value)) => length.check(attribute, value),
            (Constraint::Pattern(pattern), Value::String(value)) => {
                pattern.check(attribute, value)
            }
            (Constraint::Range(range), value) => match value.as_f64() {
                Some(value) => range.check(attribute, value),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Length(_) => f.write_str("length"),
            Constraint::Pattern(_) => f.write_str("pattern"),
            Constraint::Range(_) => f.write_str("range"),
        }
    }
}
