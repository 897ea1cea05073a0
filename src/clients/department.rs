//! Departments

use super::first_or_not_found;
use crate::adapters::athena::Connection;
use crate::domain::Result;
use crate::models::request::GetDepartmentsFilter;
use crate::models::response::{Department, DepartmentResponse};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DepartmentClient {
    connection: Arc<Connection>,
}

impl DepartmentClient {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    pub async fn departments(
        &self,
        filter: Option<&GetDepartmentsFilter>,
    ) -> Result<DepartmentResponse> {
        self.connection
            .fetch("departments")
            .query_opt(filter)
            .send()
            .await
    }

    /// # Errors
    ///
    /// `NotFound` when no department has this id.
    pub async fn department(&self, department_id: u32) -> Result<Department> {
        let departments: Vec<Department> = self
            .connection
            .fetch(format!("departments/{department_id}"))
            .send()
            .await?;
        first_or_not_found(departments, &format!("Department {department_id}"))
    }
}
