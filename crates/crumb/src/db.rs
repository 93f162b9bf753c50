use crate::Relation;

use crumb_core::{driver::Connections, Connection, Reflection, Result};

use std::sync::Arc;

/// A schema registry paired with the connection its relations execute on.
///
/// Cloning is cheap; every clone shares the same registry and connection.
#[derive(Debug, Clone)]
pub struct Db {
    reflection: Reflection,
    connection: Arc<dyn Connection>,
}

impl Db {
    pub fn new(reflection: Reflection, connection: Arc<dyn Connection>) -> Db {
        Db {
            reflection,
            connection,
        }
    }

    /// Binds `reflection` to the connection established under `name`.
    pub fn from_registry(
        reflection: &Reflection,
        connections: &Connections,
        name: &str,
    ) -> Result<Db> {
        Ok(Db::new(reflection.clone(), connections.retrieve(name)?))
    }

    pub fn reflection(&self) -> &Reflection {
        &self.reflection
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// An unfiltered relation over the entity registered as `name`.
    pub fn relation(&self, name: &str) -> Result<Relation> {
        let schema = self.reflection.lookup(name)?;
        Ok(Relation::new(self.clone(), schema))
    }
}
