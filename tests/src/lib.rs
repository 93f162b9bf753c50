#[macro_use]
mod macros;


pub use db_test::DbTest;

mod exec_log;
pub use exec_log::ExecLog;

pub use logging_connection::LoggingConnection;

pub use std_util::*;

use crumb_core::Connection;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait Setup: Send + Sync + 'static {
    /// Opens a connection to a fresh, empty database.
    async fn connect(&self) -> crumb::Result<Arc<dyn Connection>>;
}

/// Runs a test body on a current-thread runtime, with log output routed to
/// the test harness.
pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime")
        .block_on(f)
}
