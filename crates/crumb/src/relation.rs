mod lower;

mod hydrate;

use crate::{Db, Entity};

use crumb_core::{
    driver::{operation::Direction, Row},
    schema::{Association, Schema},
    stmt::Value,
    Context, Error, Result,
};

use indexmap::IndexMap;
use std::sync::Arc;

/// An immutable, chainable query over one entity.
///
/// Every chained call returns a new relation and leaves the receiver as it
/// was. Nothing touches the connection until a terminal operation (`find`,
/// `each`, `to_a`, `first`, `insert_all`) runs.
///
/// Naming an attribute or association the relation cannot resolve does not
/// fail; the relation degrades to the empty relation, which yields no rows.
#[derive(Debug, Clone)]
pub struct Relation {
    db: Db,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
struct State {
    schema: Arc<Schema>,

    /// Equality filters, also used as default values by `build`
    scope: IndexMap<String, Value>,

    predicates: Vec<Predicate>,

    /// Visible attributes; empty means all
    columns: Vec<String>,

    group_by: Vec<String>,

    order_by: Vec<(String, Direction)>,

    limit: Option<usize>,

    joins: Vec<Join>,

    empty: bool,
}

#[derive(Debug, Clone)]
struct Predicate {
    text: String,
    arg: Value,
}

#[derive(Debug, Clone)]
struct Join {
    association: Association,
    target: Arc<Schema>,
    source_column: String,
    target_column: String,
}

impl Relation {
    pub(crate) fn new(db: Db, schema: Arc<Schema>) -> Relation {
        Relation {
            db,
            state: Arc::new(State {
                schema,
                scope: IndexMap::new(),
                predicates: vec![],
                columns: vec![],
                group_by: vec![],
                order_by: vec![],
                limit: None,
                joins: vec![],
                empty: false,
            }),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.state.schema
    }

    /// Returns `true` for the empty relation, which never yields rows.
    pub fn is_empty(&self) -> bool {
        self.state.empty
    }

    /// Current equality scope
    pub fn scope(&self) -> &IndexMap<String, Value> {
        &self.state.scope
    }

    /// Narrows the relation.
    ///
    /// When `token` names an attribute, the relation is scoped to records
    /// whose attribute equals `value`, and `value` becomes the default for
    /// records built from the relation. Any other token is kept as predicate
    /// text with `value` as its argument and passed to the connection as is.
    pub fn where_(&self, token: &str, value: impl Into<Value>) -> Relation {
        let value = value.into();

        self.chain(|state| {
            if state.schema.attribute(token).is_some() {
                state.scope.insert(token.to_string(), value);
            } else {
                state.predicates.push(Predicate {
                    text: token.to_string(),
                    arg: value,
                });
            }
        })
    }

    /// Restricts the attributes read by terminal operations.
    pub fn select<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Relation {
        self.chain(|state| {
            let mut columns: Vec<String> = vec![];

            for name in names {
                if !state.is_visible(name) {
                    state.empty = true;
                    return;
                }
                if !columns.iter().any(|column| column == name) {
                    columns.push(name.to_string());
                }
            }

            state.columns = columns;
        })
    }

    /// Groups rows by the named attributes, keeping one row per group.
    pub fn group<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Relation {
        self.chain(|state| {
            for name in names {
                if !state.is_visible(name) {
                    state.empty = true;
                    return;
                }
                state.group_by.push(name.to_string());
            }
        })
    }

    /// Inner-joins the targets of the named associations. Each hydrated
    /// entity carries its joined records as resolved associations.
    pub fn joins<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Relation {
        let reflection = self.db.reflection().clone();

        self.chain(|state| {
            for name in names {
                match state.resolve_join(&reflection, name) {
                    Ok(join) => state.joins.push(join),
                    Err(err) => {
                        tracing::debug!(association = name, %err, "join unresolved; relation is empty");
                        state.empty = true;
                        return;
                    }
                }
            }
        })
    }

    pub fn order_by(&self, name: &str, direction: Direction) -> Relation {
        self.chain(|state| {
            if state.is_visible(name) {
                state.order_by.push((name.to_string(), direction));
            } else {
                state.empty = true;
            }
        })
    }

    pub fn limit(&self, limit: usize) -> Relation {
        self.chain(|state| state.limit = Some(limit))
    }

    /// Loads the one record of this relation whose primary key is `key`.
    pub async fn find(&self, cx: &Context, key: impl Into<Value>) -> Result<Entity> {
        let key = key.into();
        let pk = self.state.schema.primary_key_name();

        // A primary key already in scope must also hold, so the lookup is
        // added as a predicate rather than replacing it.
        let relation = if self.state.scope.contains_key(pk) {
            self.where_(&format!("{pk} = ?"), key.clone())
        } else {
            self.where_(pk, key.clone())
        };

        let mut found = vec![];
        relation
            .each(cx, |entity| {
                found.push(entity);
                Ok(found.len() < 2)
            })
            .await?;

        let mut found = found.into_iter();
        match (found.next(), found.next()) {
            (Some(entity), None) => Ok(entity),
            (None, _) => Err(Error::record_not_found(format!(
                "{} with {}={key}",
                self.state.schema.name(),
                self.state.schema.primary_key_name(),
            ))),
            _ => Err(Error::invalid_record_count(format!(
                "expected 1 `{}` with {}={key}, found multiple",
                self.state.schema.name(),
                self.state.schema.primary_key_name(),
            ))),
        }
    }

    /// Streams matching entities into `visit` until it returns `Ok(false)`
    /// or an error. Hydration errors abort the stream.
    pub async fn each<F>(&self, cx: &Context, mut visit: F) -> Result<()>
    where
        F: FnMut(Entity) -> Result<bool> + Send,
    {
        cx.check()?;

        if self.state.empty {
            tracing::debug!(
                entity = self.state.schema.name(),
                "empty relation; skipping query"
            );
            return Ok(());
        }

        let op = self.state.lower()?;

        tracing::debug!(
            table = %op.table,
            filters = op.filters.len(),
            joins = op.joins.len(),
            "query"
        );

        let state = &self.state;
        let db = &self.db;
        let mut on_row = |row: Row| -> Result<bool> {
            cx.check()?;
            visit(state.hydrate(db, row)?)
        };

        cx.run(self.db.connection().exec_query(cx, op, &mut on_row))
            .await
    }

    /// Collects every matching entity.
    pub async fn to_a(&self, cx: &Context) -> Result<Vec<Entity>> {
        let mut entities = vec![];
        self.each(cx, |entity| {
            entities.push(entity);
            Ok(true)
        })
        .await?;
        Ok(entities)
    }

    pub async fn first(&self, cx: &Context) -> Result<Option<Entity>> {
        let mut first = None;
        self.limit(1)
            .each(cx, |entity| {
                first = Some(entity);
                Ok(false)
            })
            .await?;
        Ok(first)
    }

    /// An unpersisted entity carrying the relation's scope overlaid with
    /// `params`. Values are not validated.
    pub fn build<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Result<Entity>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut entity = Entity::new(self.db.clone(), self.state.schema.clone());

        for (name, value) in &self.state.scope {
            entity.assign(name.clone(), value.clone())?;
        }

        for (name, value) in params {
            entity.assign(name.into(), value.into())?;
        }

        Ok(entity)
    }

    /// Like [`Relation::build`], then validates the entity, failing on the
    /// first violation. The entity is not persisted.
    pub fn create<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Result<Entity>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let entity = self.build(params)?;
        entity.validate()?;
        Ok(entity)
    }

    /// Creates and inserts one entity per parameter set, in order.
    ///
    /// Inserts are not wrapped in a transaction: when one fails, the
    /// entities inserted before it stay persisted.
    pub async fn insert_all<I, P, K, V>(&self, cx: &Context, param_sets: I) -> Result<Vec<Entity>>
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut entities = vec![];

        for (index, params) in param_sets.into_iter().enumerate() {
            let mut entity = self.create(params)?;
            entity.insert(cx).await.map_err(|err| {
                err.context(crumb_core::err!(
                    "insert_all stopped at record {index} after {} inserts",
                    entities.len()
                ))
            })?;
            entities.push(entity);
        }

        Ok(entities)
    }

    fn chain(&self, f: impl FnOnce(&mut State)) -> Relation {
        let mut state = self.state.clone();
        let inner = Arc::make_mut(&mut state);
        if !inner.empty {
            f(inner);
        }

        Relation {
            db: self.db.clone(),
            state,
        }
    }
}

impl State {
    fn is_visible(&self, name: &str) -> bool {
        self.schema.attribute(name).is_some()
            && (self.columns.is_empty() || self.columns.iter().any(|column| column == name))
    }

    fn resolve_join(&self, reflection: &crumb_core::Reflection, name: &str) -> Result<Join> {
        let association = self
            .schema
            .association(name)
            .ok_or_else(|| Error::association_not_found(self.schema.name(), name))?;

        let target = reflection.lookup(&association.target)?;
        let foreign_key = association.foreign_key(&self.schema, &target)?;

        let (source_column, target_column) = if association.is_belongs_to() {
            (foreign_key, target.primary_key_name().to_string())
        } else {
            (self.schema.primary_key_name().to_string(), foreign_key)
        };

        Ok(Join {
            association: association.clone(),
            target,
            source_column,
            target_column,
        })
    }
}
