//! The boundary to external database drivers.
//!
//! Crumb never produces dialect text. Every read or write is lowered into one
//! of the structured [`operation`] descriptors and handed to a
//! [`Connection`], which owns statement generation and the network round
//! trip.

mod adapter;
pub use adapter::Adapter;

mod config;
pub use config::ConnectionConfig;

pub mod operation;
pub use operation::Operation;

mod registry;
pub use registry::Connections;

mod row;
pub use row::{Record, Row};

use crate::{async_trait, stmt::Stored, Context, Result};

use std::fmt::Debug;

/// Called once per streamed row. Returning `Ok(false)` stops the stream;
/// returning an error aborts it and the error is returned by the query.
pub type RowVisitor<'a> = dyn FnMut(Row) -> Result<bool> + Send + 'a;

#[async_trait]
pub trait Connection: Debug + Send + Sync + 'static {
    /// Inserts one record, returning the primary key value the database
    /// generated for it, if any.
    async fn exec_insert(&self, cx: &Context, op: operation::Insert) -> Result<Option<Stored>>;

    /// Updates the record identified by the operation's key. Matching no
    /// record is a record-not-found error.
    async fn exec_update(&self, cx: &Context, op: operation::Update) -> Result<()>;

    async fn exec_delete(&self, cx: &Context, op: operation::Delete) -> Result<()>;

    /// Streams the rows matching `op` into `visit`.
    async fn exec_query(
        &self,
        cx: &Context,
        op: operation::Query,
        visit: &mut RowVisitor<'_>,
    ) -> Result<()>;
}
