//! Practice information

use crate::adapters::athena::Connection;
use crate::domain::Result;
use crate::models::response::PracticeResponse;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PracticeClient {
    connection: Arc<Connection>,
}

impl PracticeClient {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// Details of the connection's current practice
    pub async fn info(&self) -> Result<PracticeResponse> {
        self.connection.fetch("practiceinfo").send().await
    }
}
