mod context;
pub use context::Context;

pub mod driver;
pub use driver::Connection;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{Reflection, Schema};

pub mod stmt;

/// A Result type alias that uses Crumb's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
