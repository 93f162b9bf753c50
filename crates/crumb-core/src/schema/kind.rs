use crate::{
    stmt::{Stored, Value},
    Error, Result,
};

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// The cast kind of an attribute.
///
/// The set is closed: every kind knows how to check a typed value and how
/// to map it to and from its [`Stored`] form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    String,
    Float,
    Boolean,
    DateTime,
    Date,
    Time,
}

impl Kind {
    /// The kind a typed value naturally carries. `Null` has none.
    pub fn infer(value: &Value) -> Option<Kind> {
        Some(match value {
            Value::Null => return None,
            Value::Bool(_) => Kind::Boolean,
            Value::I64(_) => Kind::Integer,
            Value::F64(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::DateTime(_) => Kind::DateTime,
            Value::Date(_) => Kind::Date,
            Value::Time(_) => Kind::Time,
        })
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Integer | Kind::Float)
    }

    /// Returns an error unless `value` is `Null` or a value of this kind.
    ///
    /// Integers are accepted where floats are expected.
    pub fn check(self, value: &Value) -> Result<()> {
        let ok = match (self, value) {
            (_, Value::Null) => true,
            (Kind::Float, Value::I64(_)) => true,
            (kind, value) => Kind::infer(value) == Some(kind),
        };

        if ok {
            Ok(())
        } else {
            Err(Error::type_conversion(self, value))
        }
    }

    pub fn serialize(self, value: &Value) -> Result<Stored> {
        Ok(match (self, value) {
            (_, Value::Null) => Stored::Null,
            (Kind::Integer, Value::I64(v)) => Stored::Integer(*v),
            (Kind::Float, Value::F64(v)) => Stored::Real(*v),
            (Kind::Float, Value::I64(v)) => Stored::Real(*v as f64),
            (Kind::Boolean, Value::Bool(v)) => Stored::Integer(i64::from(*v)),
            (Kind::String, Value::String(v)) => Stored::Text(v.clone()),
            (Kind::DateTime, Value::DateTime(v)) => {
                Stored::Text(v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            (Kind::Date, Value::Date(v)) => Stored::Text(v.format(DATE_FORMAT).to_string()),
            (Kind::Time, Value::Time(v)) => Stored::Text(v.format(TIME_FORMAT).to_string()),
            (kind, value) => return Err(Error::type_conversion(kind, value)),
        })
    }

    pub fn deserialize(self, stored: &Stored) -> Result<Value> {
        let value = match (self, stored) {
            (Kind::Integer, Stored::Integer(v)) => Some(Value::I64(*v)),
            (Kind::Integer, Stored::Text(v)) => v.trim().parse().ok().map(Value::I64),
            (Kind::Float, Stored::Real(v)) => Some(Value::F64(*v)),
            (Kind::Float, Stored::Integer(v)) => Some(Value::F64(*v as f64)),
            (Kind::Float, Stored::Text(v)) => v.trim().parse().ok().map(Value::F64),
            (Kind::Boolean, Stored::Integer(0)) => Some(Value::Bool(false)),
            (Kind::Boolean, Stored::Integer(1)) => Some(Value::Bool(true)),
            (Kind::Boolean, Stored::Text(v)) => parse_bool(v).map(Value::Bool),
            (Kind::String, Stored::Text(v)) => Some(Value::String(v.clone())),
            (Kind::DateTime, Stored::Text(v)) => DateTime::parse_from_rfc3339(v)
                .ok()
                .map(|v| Value::DateTime(v.with_timezone(&Utc))),
            (Kind::Date, Stored::Text(v)) => NaiveDate::parse_from_str(v, DATE_FORMAT)
                .ok()
                .map(Value::Date),
            (Kind::Time, Stored::Text(v)) => NaiveTime::parse_from_str(v, TIME_FORMAT)
                .ok()
                .map(Value::Time),
            _ => None,
        };

        value.ok_or_else(|| Error::type_conversion(self, stored))
    }
}

fn parse_bool(src: &str) -> Option<bool> {
    match src.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Integer => "Integer",
            Kind::String => "String",
            Kind::Float => "Float",
            Kind::Boolean => "Boolean",
            Kind::DateTime => "DateTime",
            Kind::Date => "Date",
            Kind::Time => "Time",
        };
        f.write_str(name)
    }
}
