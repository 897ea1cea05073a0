//! Providers

use super::first_or_not_found;
use crate::adapters::athena::Connection;
use crate::domain::Result;
use crate::models::request::{GetProviderByIdFilter, GetProvidersFilter};
use crate::models::response::{Provider, ProviderResponse};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ProviderClient {
    connection: Arc<Connection>,
}

impl ProviderClient {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    pub async fn providers(&self, filter: Option<&GetProvidersFilter>) -> Result<ProviderResponse> {
        self.connection
            .fetch("providers")
            .query_opt(filter)
            .send()
            .await
    }

    /// # Errors
    ///
    /// `NotFound` when no provider has this id.
    pub async fn provider(
        &self,
        provider_id: u32,
        filter: Option<&GetProviderByIdFilter>,
    ) -> Result<Provider> {
        let providers: Vec<Provider> = self
            .connection
            .fetch(format!("providers/{provider_id}"))
            .query_opt(filter)
            .send()
            .await?;
        first_or_not_found(providers, &format!("Provider {provider_id}"))
    }
}
