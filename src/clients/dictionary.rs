//! Reference data shared across the practice

use crate::adapters::athena::Connection;
use crate::domain::Result;
use crate::models::request::GetProviderTypesFilter;
use crate::models::response::{
    Allergy, Ethnicity, Language, PatientLocation, ProviderTypeResponse, Race, State,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DictionaryClient {
    connection: Arc<Connection>,
}

impl DictionaryClient {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    pub async fn states(&self) -> Result<Vec<State>> {
        self.connection.fetch("states").send().await
    }

    pub async fn languages(&self) -> Result<Vec<Language>> {
        self.connection.fetch("languages").send().await
    }

    pub async fn ethnicities(&self) -> Result<Vec<Ethnicity>> {
        self.connection.fetch("ethnicities").send().await
    }

    pub async fn races(&self) -> Result<Vec<Race>> {
        self.connection.fetch("races").send().await
    }

    /// Where a checked-in patient can be (waiting room, exam room, ...)
    pub async fn patient_locations(&self) -> Result<Vec<PatientLocation>> {
        self.connection.fetch("misc/patientlocations").send().await
    }

    pub async fn provider_types(
        &self,
        filter: Option<&GetProviderTypesFilter>,
    ) -> Result<ProviderTypeResponse> {
        self.connection
            .fetch("reference/providertypes")
            .query_opt(filter)
            .send()
            .await
    }

    /// Allergens whose name contains `search_value`
    pub async fn allergies(&self, search_value: &str) -> Result<Vec<Allergy>> {
        self.connection
            .fetch("reference/allergies")
            .param("searchvalue", search_value)
            .send()
            .await
    }
}
