use std::{cmp::Ordering, fmt};

/// A value in the form a connection stores and returns it.
///
/// Connections only ever see this representation; the mapping to and from
/// [`Value`](super::Value) is owned by the attribute's [`Kind`](crate::schema::Kind).
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Stored {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Stored {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null or empty text. Nullable attributes read either as absent.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Compares two stored values the way a database would for filtering
    /// and sorting. Integers and reals compare numerically; values of
    /// unrelated shapes, and nulls, are incomparable.
    pub fn compare(&self, other: &Stored) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Real(b)) => (*a as f64).partial_cmp(b),
            (Self::Real(a), Self::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Real(a), Self::Real(b)) => a.partial_cmp(b),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Stored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(v) => write!(f, "Integer({v})"),
            Self::Real(v) => write!(f, "Real({v})"),
            Self::Text(v) => write!(f, "Text({v:?})"),
        }
    }
}

impl From<i64> for Stored {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Stored {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for Stored {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Stored {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
