//! Clinical encounters and their diagnoses

use super::first_or_not_found;
use crate::adapters::athena::Connection;
use crate::domain::Result;
use crate::models::response::{Diagnosis, Encounter};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EncounterClient {
    connection: Arc<Connection>,
}

impl EncounterClient {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// # Errors
    ///
    /// `NotFound` when no encounter has this id.
    pub async fn encounter(&self, encounter_id: u32) -> Result<Encounter> {
        let encounters: Vec<Encounter> = self
            .connection
            .fetch(format!("chart/encounter/{encounter_id}"))
            .send()
            .await?;
        first_or_not_found(encounters, &format!("Encounter {encounter_id}"))
    }

    pub async fn diagnoses(&self, encounter_id: u32) -> Result<Vec<Diagnosis>> {
        self.connection
            .fetch(format!("chart/encounter/{encounter_id}/diagnoses"))
            .send()
            .await
    }
}
