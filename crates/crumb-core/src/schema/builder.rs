use super::{
    Association, AssociationKind, Attribute, Constraint, ConstraintLength, ConstraintPattern,
    ConstraintRange, Kind, Name, Schema,
};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Collects attribute and association declarations for one entity.
///
/// Nothing is checked until [`build`](SchemaBuilder::build), which compiles
/// the declarations into a frozen [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    table_name: Option<String>,
    primary_key: Option<String>,
    attributes: Vec<AttributeBuilder>,
    associations: Vec<AssociationBuilder>,
}

#[derive(Debug)]
pub struct AttributeBuilder {
    name: String,
    kind: Kind,
    primary_key: bool,
    nullable: bool,
    constraints: Vec<ConstraintDef>,
}

/// Validators are compiled at build time so an invalid pattern surfaces as a
/// schema error rather than a panic at declaration.
#[derive(Debug)]
enum ConstraintDef {
    Length { min: Option<u64>, max: Option<u64> },
    Range { min: Option<f64>, max: Option<f64> },
    Pattern(String),
}

#[derive(Debug)]
pub struct AssociationBuilder {
    kind: AssociationKind,
    target: String,
    name: Option<String>,
    foreign_key: Option<String>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        SchemaBuilder {
            name: name.into(),
            table_name: None,
            primary_key: None,
            attributes: vec![],
            associations: vec![],
        }
    }

    /// Overrides the default pluralized table name.
    pub fn table(&mut self, table_name: impl Into<String>) -> &mut Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Names the attribute acting as primary key.
    pub fn primary_key(&mut self, name: impl Into<String>) -> &mut Self {
        self.primary_key = Some(name.into());
        self
    }

    pub fn attribute(&mut self, name: impl Into<String>, kind: Kind) -> &mut AttributeBuilder {
        self.attributes.push(AttributeBuilder {
            name: name.into(),
            kind,
            primary_key: false,
            nullable: false,
            constraints: vec![],
        });
        let index = self.attributes.len() - 1;
        &mut self.attributes[index]
    }

    /// Declares that this entity holds a foreign key to `target`. Adds an
    /// integer attribute named `singular(target) + "_id"` unless overridden.
    pub fn belongs_to(&mut self, target: impl Into<String>) -> &mut AssociationBuilder {
        self.association(AssociationKind::BelongsTo, target.into())
    }

    pub fn has_many(&mut self, target: impl Into<String>) -> &mut AssociationBuilder {
        self.association(AssociationKind::HasMany, target.into())
    }

    pub fn has_one(&mut self, target: impl Into<String>) -> &mut AssociationBuilder {
        self.association(AssociationKind::HasOne, target.into())
    }

    fn association(&mut self, kind: AssociationKind, target: String) -> &mut AssociationBuilder {
        self.associations.push(AssociationBuilder {
            kind,
            target,
            name: None,
            foreign_key: None,
        });
        let index = self.associations.len() - 1;
        &mut self.associations[index]
    }

    pub fn build(self) -> Result<Schema> {
        let context = |err: Error| err.context(crate::err!("schema `{}`", self.name));

        let mut attributes = IndexMap::with_capacity(self.attributes.len() + 1);

        for def in &self.attributes {
            let attribute = def.build().map_err(context)?;
            if attributes.insert(def.name.clone(), attribute).is_some() {
                return Err(context(Error::invalid_schema(format!(
                    "attribute `{}` declared more than once",
                    def.name
                ))));
            }
        }

        let primary_key = resolve_primary_key(&mut attributes, self.primary_key.as_deref())
            .map_err(context)?;

        let mut associations = IndexMap::with_capacity(self.associations.len());

        for def in &self.associations {
            let association = def.build();

            if association.is_belongs_to() {
                add_foreign_key(&mut attributes, &association, &primary_key).map_err(context)?;
            }

            if associations
                .insert(association.name.clone(), association)
                .is_some()
            {
                return Err(context(Error::invalid_schema(format!(
                    "association `{}` declared more than once",
                    def.name.as_deref().unwrap_or(&def.target)
                ))));
            }
        }

        let table_name = self
            .table_name
            .clone()
            .unwrap_or_else(|| Name::new(&self.name).table_name());

        Ok(Schema {
            name: self.name,
            table_name,
            attributes,
            primary_key,
            associations,
        })
    }
}

fn resolve_primary_key(
    attributes: &mut IndexMap<String, Attribute>,
    declared: Option<&str>,
) -> Result<String> {
    let marked: Vec<String> = attributes
        .values()
        .filter(|attr| attr.is_primary_key())
        .map(|attr| attr.name().to_string())
        .collect();

    let name = match (declared, &marked[..]) {
        (Some(declared), marked) => {
            if !attributes.contains_key(declared) {
                return Err(Error::invalid_schema(format!(
                    "primary key `{declared}` is not a declared attribute"
                )));
            }
            if let Some(other) = marked.iter().find(|name| *name != declared) {
                return Err(Error::invalid_schema(format!(
                    "duplicate primary key: `{declared}` and `{other}`"
                )));
            }
            declared.to_string()
        }
        (None, [name]) => name.clone(),
        (None, [first, second, ..]) => {
            return Err(Error::invalid_schema(format!(
                "duplicate primary key: `{first}` and `{second}`"
            )));
        }
        (None, []) => {
            if attributes.contains_key("id") {
                return Err(Error::invalid_schema(
                    "attribute `id` collides with the implicit primary key",
                ));
            }

            let mut with_id = IndexMap::with_capacity(attributes.len() + 1);
            with_id.insert("id".to_string(), Attribute::implicit_primary_key());
            with_id.extend(attributes.drain(..));
            *attributes = with_id;

            return Ok("id".to_string());
        }
    };

    if let Some(attribute) = attributes.get_mut(&name) {
        if attribute.is_nullable() {
            return Err(Error::invalid_schema(format!(
                "primary key `{name}` cannot be nullable"
            )));
        }
        attribute.set_primary_key(true);
    }

    Ok(name)
}

fn add_foreign_key(
    attributes: &mut IndexMap<String, Attribute>,
    association: &Association,
    primary_key: &str,
) -> Result<()> {
    let Some(foreign_key) = association.foreign_key.as_deref() else {
        return Ok(());
    };

    match attributes.get(foreign_key) {
        Some(_) if foreign_key == primary_key => Err(Error::invalid_schema(format!(
            "foreign key `{foreign_key}` collides with the primary key"
        ))),
        Some(existing) if existing.kind() != Kind::Integer => Err(Error::invalid_schema(format!(
            "foreign key `{foreign_key}` must be an Integer attribute"
        ))),
        Some(_) => Ok(()),
        None => {
            let mut attribute = Attribute::define(foreign_key, Kind::Integer, vec![])?;
            attribute.set_nullable(true);
            attributes.insert(foreign_key.to_string(), attribute);
            Ok(())
        }
    }
}

impl AttributeBuilder {
    pub fn primary_key(&mut self) -> &mut Self {
        self.primary_key = true;
        self
    }

    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    pub fn length(&mut self, min: u64, max: u64) -> &mut Self {
        self.constraints.push(ConstraintDef::Length {
            min: Some(min),
            max: Some(max),
        });
        self
    }

    pub fn min_length(&mut self, min: u64) -> &mut Self {
        self.constraints.push(ConstraintDef::Length {
            min: Some(min),
            max: None,
        });
        self
    }

    pub fn max_length(&mut self, max: u64) -> &mut Self {
        self.constraints.push(ConstraintDef::Length {
            min: None,
            max: Some(max),
        });
        self
    }

    pub fn range(&mut self, min: impl Into<Option<f64>>, max: impl Into<Option<f64>>) -> &mut Self {
        self.constraints.push(ConstraintDef::Range {
            min: min.into(),
            max: max.into(),
        });
        self
    }

    pub fn pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.constraints.push(ConstraintDef::Pattern(pattern.into()));
        self
    }

    fn build(&self) -> Result<Attribute> {
        let constraints = self
            .constraints
            .iter()
            .map(|def| {
                Ok(match def {
                    ConstraintDef::Length { min, max } => Constraint::from(ConstraintLength {
                        min: *min,
                        max: *max,
                    }),
                    ConstraintDef::Range { min, max } => Constraint::from(ConstraintRange {
                        min: *min,
                        max: *max,
                    }),
                    ConstraintDef::Pattern(pattern) => ConstraintPattern::new(pattern)?.into(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut attribute = Attribute::define(&self.name, self.kind, constraints)?;
        attribute.set_primary_key(self.primary_key);
        attribute.set_nullable(self.nullable);
        Ok(attribute)
    }
}

impl AssociationBuilder {
    /// Accesses the association under `name` instead of the target name.
    pub fn named(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn foreign_key(&mut self, foreign_key: impl Into<String>) -> &mut Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    fn build(&self) -> Association {
        let foreign_key = match self.kind {
            AssociationKind::BelongsTo => Some(
                self.foreign_key
                    .clone()
                    .unwrap_or_else(|| Name::new(&self.target).foreign_key()),
            ),
            AssociationKind::HasMany | AssociationKind::HasOne => self.foreign_key.clone(),
        };

        Association {
            name: self.name.clone().unwrap_or_else(|| self.target.clone()),
            kind: self.kind,
            target: self.target.clone(),
            foreign_key,
        }
    }
}
