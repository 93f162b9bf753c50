use crate::Setup;

use crumb_core::{
    driver::{ConnectionConfig, Connections},
    Connection,
};
use crumb_driver_memory::Memory;
use std::sync::Arc;

pub struct SetupMemory;

#[async_trait::async_trait]
impl Setup for SetupMemory {
    async fn connect(&self) -> crumb::Result<Arc<dyn Connection>> {
        let connections = Connections::new();
        connections.register_adapter(Memory)?;
        connections
            .establish(&ConnectionConfig::from_url("memory://")?)
            .await
    }
}
