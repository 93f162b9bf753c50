mod associated;
pub use associated::Associated;

use crate::{Db, Relation};

use crumb_core::{
    driver::{operation, Record},
    schema::Schema,
    stmt::{Stored, Value},
    Context, Error, Result,
};

use indexmap::IndexMap;
use std::{collections::HashMap, fmt, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    New,
    Persisted,
    Deleted,
}

/// One record of an entity.
///
/// Starts out unpersisted when built from a [`Relation`], or persisted when
/// hydrated from a query. After `delete` the entity is deleted and rejects
/// further persistence calls.
#[derive(Clone)]
pub struct Entity {
    db: Db,
    schema: Arc<Schema>,
    values: IndexMap<String, Value>,
    state: State,
    associations: HashMap<String, Associated>,
}

impl Entity {
    pub(crate) fn new(db: Db, schema: Arc<Schema>) -> Entity {
        Entity {
            db,
            schema,
            values: IndexMap::new(),
            state: State::New,
            associations: HashMap::new(),
        }
    }

    /// Reads the schema's attributes out of `record`. Attributes the record
    /// does not carry are left unset.
    pub(crate) fn hydrate(db: Db, schema: Arc<Schema>, record: &Record) -> Result<Entity> {
        let mut values = IndexMap::new();

        for attribute in schema.attributes() {
            if let Some(stored) = record.get(attribute.name()) {
                let value = attribute.deserialize(stored).map_err(|err| {
                    err.context(crumb_core::err!(
                        "reading `{}.{}`",
                        schema.name(),
                        attribute.name()
                    ))
                })?;
                values.insert(attribute.name().to_string(), value);
            }
        }

        Ok(Entity {
            db,
            schema,
            values,
            state: State::Persisted,
            associations: HashMap::new(),
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn table_name(&self) -> &str {
        self.schema.table_name()
    }

    /// The attribute's current value; `None` when it was never set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Validates `value` against the attribute and assigns it.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let attribute = self.schema.attribute(name).ok_or_else(|| self.unknown(name))?;
        attribute.validate(&value)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub(crate) fn assign(&mut self, name: String, value: Value) -> Result<()> {
        if self.schema.attribute(&name).is_none() {
            return Err(self.unknown(&name));
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// The primary key value, if one is set.
    pub fn id(&self) -> Option<&Value> {
        self.values
            .get(self.schema.primary_key_name())
            .filter(|value| !value.is_null())
    }

    pub fn is_persisted(&self) -> bool {
        self.state == State::Persisted
    }

    pub fn is_deleted(&self) -> bool {
        self.state == State::Deleted
    }

    /// Checks every attribute, returning the first violation.
    ///
    /// An unset primary key is accepted, since the connection may generate
    /// it on insert.
    pub fn validate(&self) -> Result<()> {
        for attribute in self.schema.attributes() {
            let value = self.values.get(attribute.name()).unwrap_or(&Value::Null);

            if attribute.is_primary_key() && value.is_null() {
                continue;
            }

            attribute.validate(value)?;
        }

        Ok(())
    }

    /// Persists a new entity, writing unset attributes as null. A primary key
    /// generated by the connection is stored back on the entity.
    pub async fn insert(&mut self, cx: &Context) -> Result<()> {
        match self.state {
            State::New => {}
            State::Persisted => {
                return Err(Error::invalid_statement(format!(
                    "`{}` is already persisted; use update",
                    self.schema.name()
                )))
            }
            State::Deleted => return Err(self.deleted("insert")),
        }

        self.validate()?;

        let mut values = vec![];
        for attribute in self.schema.attributes() {
            let value = self.values.get(attribute.name()).unwrap_or(&Value::Null);
            if value.is_null() && attribute.is_primary_key() {
                continue;
            }
            values.push((attribute.name().to_string(), attribute.serialize(value)?));
        }

        let op = operation::Insert {
            table: self.schema.table_name().to_string(),
            primary_key: self.schema.primary_key_name().to_string(),
            values,
        };

        tracing::debug!(table = %op.table, columns = op.values.len(), "insert");

        let generated = cx.run(self.db.connection().exec_insert(cx, op)).await?;

        if let Some(stored) = generated {
            let value = self.schema.primary_key().deserialize(&stored)?;
            self.values
                .insert(self.schema.primary_key_name().to_string(), value);
        }

        self.state = State::Persisted;
        Ok(())
    }

    /// Writes every non-key attribute to the record identified by the
    /// primary key.
    pub async fn update(&mut self, cx: &Context) -> Result<()> {
        if self.state == State::Deleted {
            return Err(self.deleted("update"));
        }

        self.validate()?;

        let key = self.key("update")?;
        let mut values = vec![];
        for (name, value) in &self.values {
            if name != self.schema.primary_key_name() {
                values.push((name.clone(), self.serialize(name, value)?));
            }
        }

        let op = operation::Update {
            table: self.schema.table_name().to_string(),
            key,
            values,
        };

        tracing::debug!(table = %op.table, columns = op.values.len(), "update");

        cx.run(self.db.connection().exec_update(cx, op)).await?;

        self.state = State::Persisted;
        Ok(())
    }

    /// Deletes the record identified by the primary key. Whether deleting a
    /// missing record fails depends on the connection.
    pub async fn delete(&mut self, cx: &Context) -> Result<()> {
        if self.state == State::Deleted {
            return Err(self.deleted("delete"));
        }

        let op = operation::Delete {
            table: self.schema.table_name().to_string(),
            key: self.key("delete")?,
        };

        tracing::debug!(table = %op.table, "delete");

        cx.run(self.db.connection().exec_delete(cx, op)).await?;

        self.state = State::Deleted;
        Ok(())
    }

    /// Binds `entity` under the association `name` without persisting
    /// anything. Setting the foreign key is left to the caller.
    ///
    /// For a has-many association the entity is appended to those already
    /// bound.
    pub fn assign_association(&mut self, name: &str, entity: Entity) -> Result<()> {
        let association = self
            .schema
            .association(name)
            .ok_or_else(|| Error::association_not_found(self.schema.name(), name))?;

        if association.target != entity.schema.name() {
            return Err(Error::invalid_schema(format!(
                "association `{}.{name}` holds `{}`, not `{}`",
                self.schema.name(),
                association.target,
                entity.schema.name()
            )));
        }

        if association.is_has_many() {
            match self
                .associations
                .entry(name.to_string())
                .or_insert_with(|| Associated::Many(vec![]))
            {
                Associated::Many(entities) => entities.push(entity),
                one => *one = Associated::Many(vec![entity]),
            }
        } else {
            self.associations
                .insert(name.to_string(), Associated::One(Box::new(entity)));
        }

        Ok(())
    }

    /// The records bound under `name`, resolving them through the
    /// connection on first access.
    ///
    /// Returns `None` when there is nothing to resolve: a belongs-to whose
    /// foreign key is unset, a has-one with no match, or an owner without a
    /// primary key.
    pub async fn association(&mut self, cx: &Context, name: &str) -> Result<Option<&Associated>> {
        if !self.associations.contains_key(name) {
            if let Some(associated) = self.resolve(cx, name).await? {
                self.associations.insert(name.to_string(), associated);
            }
        }

        Ok(self.associations.get(name))
    }

    /// The records already bound under `name`, without any I/O.
    pub fn associated(&self, name: &str) -> Option<&Associated> {
        self.associations.get(name)
    }

    async fn resolve(&self, cx: &Context, name: &str) -> Result<Option<Associated>> {
        let association = self
            .schema
            .association(name)
            .ok_or_else(|| Error::association_not_found(self.schema.name(), name))?;

        let target = self.db.reflection().lookup(&association.target)?;
        let foreign_key = association.foreign_key(&self.schema, &target)?;
        let relation = Relation::new(self.db.clone(), target.clone());

        if association.is_belongs_to() {
            let Some(key) = self.values.get(&foreign_key).filter(|value| !value.is_null()) else {
                return Ok(None);
            };

            let entity = relation.find(cx, key.clone()).await?;
            return Ok(Some(Associated::One(Box::new(entity))));
        }

        let Some(id) = self.id() else {
            return Ok(None);
        };
        let relation = relation.where_(&foreign_key, id.clone());

        Ok(if association.is_has_many() {
            Some(Associated::Many(relation.to_a(cx).await?))
        } else {
            relation
                .first(cx)
                .await?
                .map(|entity| Associated::One(Box::new(entity)))
        })
    }

    fn serialize(&self, name: &str, value: &Value) -> Result<Stored> {
        self.schema
            .attribute(name)
            .ok_or_else(|| self.unknown(name))?
            .serialize(value)
    }

    fn key(&self, action: &str) -> Result<operation::Key> {
        let id = self.id().ok_or_else(|| {
            Error::invalid_statement(format!(
                "cannot {action} `{}` without a primary key",
                self.schema.name()
            ))
        })?;

        Ok(operation::Key {
            column: self.schema.primary_key_name().to_string(),
            value: self.schema.primary_key().serialize(id)?,
        })
    }

    fn unknown(&self, name: &str) -> Error {
        Error::invalid_schema(format!(
            "unknown attribute `{name}` for `{}`",
            self.schema.name()
        ))
    }

    fn deleted(&self, action: &str) -> Error {
        Error::invalid_statement(format!(
            "cannot {action} `{}`; it was deleted",
            self.schema.name()
        ))
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.schema.name())
            .field("state", &self.state)
            .field("values", &self.values)
            .field("associations", &self.associations)
            .finish()
    }
}
