//! Per-resource facades
//!
//! Each facade holds an `Arc<Connection>` and maps one athenaNet resource
//! onto typed methods. [`AthenaClient`] owns the connection and exposes every
//! facade.
//!
//! ```no_run
//! use athena_sdk::clients::AthenaClient;
//! use athena_sdk::config::load_config;
//!
//! # async fn example() -> athena_sdk::domain::Result<()> {
//! let config = load_config("athena.toml")?;
//! let client = AthenaClient::from_config(&config.api)?;
//! let states = client.dictionaries().states().await?;
//! println!("{} states", states.len());
//! # Ok(())
//! # }
//! ```

pub mod appointment;
pub mod department;
pub mod dictionary;
pub mod encounter;
pub mod insurance_package;
pub mod patient;
pub mod practice;
pub mod provider;

pub use appointment::AppointmentClient;
pub use department::DepartmentClient;
pub use dictionary::DictionaryClient;
pub use encounter::EncounterClient;
pub use insurance_package::InsurancePackageClient;
pub use patient::PatientClient;
pub use practice::PracticeClient;
pub use provider::ProviderClient;

use crate::adapters::athena::Connection;
use crate::adapters::http::HttpExecutor;
use crate::config::ApiConfig;
use crate::domain::{AthenaError, PracticeId, Result};
use std::sync::Arc;

/// Unwraps the one-element array that get-by-id endpoints return
///
/// # Errors
///
/// Returns [`AthenaError::NotFound`] naming `what` when the array is empty.
pub fn first_or_not_found<T>(items: Vec<T>, what: &str) -> Result<T> {
    items
        .into_iter()
        .next()
        .ok_or_else(|| AthenaError::not_found(format!("{what} not found")))
}

/// All facades over one shared [`Connection`]
#[derive(Debug, Clone)]
pub struct AthenaClient {
    connection: Arc<Connection>,
    appointments: AppointmentClient,
    departments: DepartmentClient,
    dictionaries: DictionaryClient,
    encounters: EncounterClient,
    insurance_packages: InsurancePackageClient,
    patients: PatientClient,
    practices: PracticeClient,
    providers: ProviderClient,
}

impl AthenaClient {
    pub fn new(connection: Connection) -> Self {
        let connection = Arc::new(connection);
        Self {
            appointments: AppointmentClient::new(connection.clone()),
            departments: DepartmentClient::new(connection.clone()),
            dictionaries: DictionaryClient::new(connection.clone()),
            encounters: EncounterClient::new(connection.clone()),
            insurance_packages: InsurancePackageClient::new(connection.clone()),
            patients: PatientClient::new(connection.clone()),
            practices: PracticeClient::new(connection.clone()),
            providers: ProviderClient::new(connection.clone()),
            connection,
        }
    }

    /// # Errors
    ///
    /// Returns a configuration error when the HTTP client or the
    /// credentials cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(Connection::from_config(config)?))
    }

    /// # Errors
    ///
    /// Returns a configuration error for invalid credentials.
    pub fn with_executor(config: &ApiConfig, executor: Arc<dyn HttpExecutor>) -> Result<Self> {
        Ok(Self::new(Connection::with_executor(config, executor)?))
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    pub fn practice_id(&self) -> PracticeId {
        self.connection.practice_id()
    }

    /// Switches every facade to another practice
    pub fn set_practice_id(&self, practice_id: PracticeId) {
        tracing::info!(practice_id = %practice_id, "Switching practice");
        self.connection.set_practice_id(practice_id);
    }

    pub fn appointments(&self) -> &AppointmentClient {
        &self.appointments
    }

    pub fn departments(&self) -> &DepartmentClient {
        &self.departments
    }

    pub fn dictionaries(&self) -> &DictionaryClient {
        &self.dictionaries
    }

    pub fn encounters(&self) -> &EncounterClient {
        &self.encounters
    }

    pub fn insurance_packages(&self) -> &InsurancePackageClient {
        &self.insurance_packages
    }

    pub fn patients(&self) -> &PatientClient {
        &self.patients
    }

    pub fn practices(&self) -> &PracticeClient {
        &self.practices
    }

    pub fn providers(&self) -> &ProviderClient {
        &self.providers
    }
}
