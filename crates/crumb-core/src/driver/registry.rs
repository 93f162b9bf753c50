use super::{Adapter, Connection, ConnectionConfig};
use crate::{Error, Result};

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// Named connections and the adapters that open them.
///
/// A cloneable handle to one registry. Establishing and removing take the
/// write lock only to publish the change; the adapter's connect call runs
/// outside any lock, so slow connects never hold up readers.
#[derive(Debug, Clone, Default)]
pub struct Connections {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    adapters: RwLock<HashMap<String, Arc<dyn Adapter>>>,
    connections: RwLock<HashMap<String, Arc<dyn Connection>>>,
}

impl Connections {
    pub fn new() -> Connections {
        Connections::default()
    }

    /// Makes `adapter` available for configs using its URL scheme.
    pub fn register_adapter(&self, adapter: impl Adapter) -> Result<()> {
        let adapter = Arc::new(adapter);
        self.inner
            .adapters
            .write()
            .map_err(poisoned)?
            .insert(adapter.scheme().to_string(), adapter);
        Ok(())
    }

    /// Opens a connection through the adapter for the config's URL scheme and
    /// registers it under the config's name.
    pub async fn establish(&self, config: &ConnectionConfig) -> Result<Arc<dyn Connection>> {
        if self.contains(&config.name)? {
            return Err(Error::connection_exists(&config.name));
        }

        let scheme = config.url.scheme();
        let adapter = self
            .inner
            .adapters
            .read()
            .map_err(poisoned)?
            .get(scheme)
            .cloned()
            .ok_or_else(|| {
                Error::invalid_statement(format!(
                    "unsupported database; scheme={scheme}; url={}",
                    config.url
                ))
            })?;

        let connection = adapter.connect(&config.url).await?;

        let mut connections = self.inner.connections.write().map_err(poisoned)?;
        // Another caller may have won the race while we were connecting.
        if connections.contains_key(&config.name) {
            return Err(Error::connection_exists(&config.name));
        }
        connections.insert(config.name.clone(), connection.clone());

        tracing::debug!(name = %config.name, %scheme, "established connection");

        Ok(connection)
    }

    pub fn retrieve(&self, name: &str) -> Result<Arc<dyn Connection>> {
        self.inner
            .connections
            .read()
            .map_err(poisoned)?
            .get(name)
            .cloned()
            .ok_or_else(|| Error::connection_not_found(name))
    }

    /// The connection registered as `"primary"`.
    pub fn primary(&self) -> Result<Arc<dyn Connection>> {
        self.retrieve(ConnectionConfig::DEFAULT_NAME)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        self.inner
            .connections
            .write()
            .map_err(poisoned)?
            .remove(name)
            .map(|_| tracing::debug!(%name, "removed connection"))
            .ok_or_else(|| Error::connection_not_found(name))
    }

    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<_> = self
            .inner
            .connections
            .read()
            .map_err(poisoned)?
            .keys()
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    /// Forgets every connection, keeping registered adapters. Intended for
    /// test isolation.
    pub fn reset(&self) -> Result<()> {
        self.inner.connections.write().map_err(poisoned)?.clear();
        Ok(())
    }

    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self
            .inner
            .connections
            .read()
            .map_err(poisoned)?
            .contains_key(name))
    }
}

fn poisoned<T>(_: T) -> Error {
    crate::err!("connection registry lock poisoned")
}
