use super::{Schema, SchemaBuilder};
use crate::{Error, Result};

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

type Snapshot = Arc<HashMap<String, Arc<Schema>>>;

/// Entity name to [`Schema`] lookup.
///
/// A cheap, cloneable handle to one registry; create one per process (or per
/// test) and hand it to whatever defines or resolves schemas. Readers clone
/// the current snapshot and release the lock before searching it, so
/// lookups never wait on each other and only briefly on a writer publishing
/// a new snapshot.
#[derive(Debug, Clone, Default)]
pub struct Reflection {
    snapshot: Arc<RwLock<Snapshot>>,
}

impl Reflection {
    pub fn new() -> Reflection {
        Reflection::default()
    }

    /// Declares a schema through `configure`, compiles it and registers it
    /// under `name`.
    pub fn define(
        &self,
        name: impl Into<String>,
        configure: impl FnOnce(&mut SchemaBuilder),
    ) -> Result<Arc<Schema>> {
        let mut builder = SchemaBuilder::new(name);
        configure(&mut builder);
        self.register(builder.build()?)
    }

    /// Publishes a compiled schema. Registering a name twice is an error.
    pub fn register(&self, schema: Schema) -> Result<Arc<Schema>> {
        let schema = Arc::new(schema);
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| crate::err!("reflection registry lock poisoned"))?;

        if snapshot.contains_key(schema.name()) {
            return Err(Error::invalid_schema(format!(
                "schema `{}` is already registered",
                schema.name()
            )));
        }

        let mut next = HashMap::clone(&snapshot);
        next.insert(schema.name().to_string(), schema.clone());
        *snapshot = Arc::new(next);

        tracing::debug!(
            model = schema.name(),
            table = schema.table_name(),
            "registered schema"
        );

        Ok(schema)
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<Schema>> {
        self.snapshot()?
            .get(name)
            .cloned()
            .ok_or_else(|| Error::model_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snapshot()
            .map(|snapshot| snapshot.contains_key(name))
            .unwrap_or(false)
    }

    /// Registered entity names, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<_> = self.snapshot()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Drops every registered schema. Intended for test isolation.
    pub fn reset(&self) -> Result<()> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| crate::err!("reflection registry lock poisoned"))?;
        *snapshot = Snapshot::default();
        Ok(())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        self.snapshot
            .read()
            .map(|snapshot| snapshot.clone())
            .map_err(|_| crate::err!("reflection registry lock poisoned"))
    }
}
