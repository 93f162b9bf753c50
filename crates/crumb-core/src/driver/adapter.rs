use super::Connection;
use crate::{async_trait, Result};

use std::{fmt::Debug, sync::Arc};
use url::Url;

/// Opens connections for one URL scheme.
///
/// Adapters are registered on [`Connections`](super::Connections), which
/// dispatches each [`ConnectionConfig`](super::ConnectionConfig) to the
/// adapter matching its URL scheme.
#[async_trait]
pub trait Adapter: Debug + Send + Sync + 'static {
    /// URL scheme handled by this adapter, e.g. `"sqlite"`
    fn scheme(&self) -> &str;

    async fn connect(&self, url: &Url) -> Result<Arc<dyn Connection>>;
}
