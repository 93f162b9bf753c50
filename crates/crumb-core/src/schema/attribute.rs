use super::{Constraint, Kind};
use crate::{
    stmt::{Stored, Value},
    Error, Result,
};

/// A typed column definition. Immutable once its schema is built.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    kind: Kind,
    primary_key: bool,
    nullable: bool,
    constraints: Vec<Constraint>,
}

impl Attribute {
    /// Defines an attribute, rejecting validators that cannot check `kind`.
    pub fn define(
        name: impl Into<String>,
        kind: Kind,
        constraints: Vec<Constraint>,
    ) -> Result<Attribute> {
        let name = name.into();

        if let Some(constraint) = constraints.iter().find(|c| !c.applies_to(kind)) {
            return Err(Error::invalid_schema(format!(
                "{constraint} validator cannot be applied to {kind} attribute `{name}`"
            )));
        }

        Ok(Attribute {
            name,
            kind,
            primary_key: false,
            nullable: false,
            constraints,
        })
    }

    /// The integer `id` key synthesized for schemas that declare none.
    pub(crate) fn implicit_primary_key() -> Attribute {
        Attribute {
            name: "id".to_string(),
            kind: Kind::Integer,
            primary_key: true,
            nullable: false,
            constraints: vec![],
        }
    }

    pub(crate) fn set_primary_key(&mut self, primary_key: bool) {
        self.primary_key = primary_key;
    }

    pub(crate) fn set_nullable(&mut self, nullable: bool) {
        self.nullable = nullable;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Runs the validator chain, stopping at the first violation.
    pub fn validate(&self, value: &Value) -> Result<()> {
        if value.is_null() {
            return if self.nullable {
                Ok(())
            } else {
                Err(Error::validation_null(&self.name))
            };
        }

        self.kind.check(value)?;

        for constraint in &self.constraints {
            constraint.check(&self.name, value)?;
        }

        Ok(())
    }

    pub fn serialize(&self, value: &Value) -> Result<Stored> {
        self.kind.serialize(value)
    }

    /// Nullable attributes read an empty stored form as `Null`; everything
    /// else is delegated to the kind.
    pub fn deserialize(&self, stored: &Stored) -> Result<Value> {
        if self.nullable && stored.is_empty() {
            return Ok(Value::Null);
        }

        self.kind.deserialize(stored)
    }
}
