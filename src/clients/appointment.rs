//! Appointment types and booked appointments

use super::first_or_not_found;
use crate::adapters::athena::Connection;
use crate::domain::Result;
use crate::models::request::{GetAppointmentTypesFilter, GetBookedAppointmentsFilter};
use crate::models::response::{AppointmentResponse, AppointmentType, AppointmentTypeResponse};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppointmentClient {
    connection: Arc<Connection>,
}

impl AppointmentClient {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    pub async fn appointment_types(
        &self,
        filter: Option<&GetAppointmentTypesFilter>,
    ) -> Result<AppointmentTypeResponse> {
        self.connection
            .fetch("appointmenttypes")
            .query_opt(filter)
            .send()
            .await
    }

    /// # Errors
    ///
    /// `NotFound` when the practice has no such appointment type.
    pub async fn appointment_type(&self, appointment_type_id: u32) -> Result<AppointmentType> {
        let types: Vec<AppointmentType> = self
            .connection
            .fetch(format!("appointmenttypes/{appointment_type_id}"))
            .send()
            .await?;
        first_or_not_found(types, &format!("Appointment type {appointment_type_id}"))
    }

    /// Booked appointments in a date range
    ///
    /// More than one department goes through `appointments/booked/multipledepartment`.
    pub async fn booked_appointments(
        &self,
        filter: &GetBookedAppointmentsFilter,
    ) -> Result<AppointmentResponse> {
        let path = if filter.department_ids.len() > 1 {
            "appointments/booked/multipledepartment"
        } else {
            "appointments/booked"
        };
        self.connection.fetch(path).query(filter).send().await
    }
}
