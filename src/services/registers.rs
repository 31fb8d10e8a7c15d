//! Register (equipment loan) service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::register::{CreateRegister, RegisterDetails, UpdateRegister},
    repository::{CatalogStore, RegisterStore},
};

#[derive(Clone)]
pub struct RegistersService {
    registers: Arc<dyn RegisterStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl RegistersService {
    pub fn new(registers: Arc<dyn RegisterStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { registers, catalog }
    }

    /// Record a new loan and return its id.
    ///
    /// The request must already have passed schema validation.
    pub async fn create(&self, data: CreateRegister) -> AppResult<i32> {
        data.check_time_window()?;

        let student = self
            .catalog
            .find_student(data.student_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(
                    "\"student_id\" does not reference an existing student".to_string(),
                )
            })?;

        let equipment = self
            .catalog
            .find_equipment(data.equipment_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(
                    "\"equipment_id\" does not reference an existing equipment".to_string(),
                )
            })?;

        // Availability is informational only, loans do not change it
        if !equipment.is_available() {
            tracing::warn!(
                equipment_id = equipment.id,
                state = %equipment.state,
                "Lending equipment that is not marked available"
            );
        }

        let register = self.registers.insert(&data).await?;
        tracing::info!(
            register_id = register.id,
            student_id = register.student_id,
            id_number = %student.id_number,
            equipment_id = register.equipment_id,
            status = %register.status(),
            "Register created"
        );
        Ok(register.id)
    }

    /// Every register with its student and equipment
    pub async fn list(&self) -> AppResult<Vec<RegisterDetails>> {
        self.registers.list_enriched().await
    }

    /// One register of a student
    pub async fn get(&self, student_id: i32, register_id: i32) -> AppResult<RegisterDetails> {
        self.registers
            .get_enriched(student_id, register_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// Replace a register wholesale. The new equipment id is not re-checked
    /// against the catalog.
    pub async fn update(
        &self,
        student_id: i32,
        register_id: i32,
        data: UpdateRegister,
    ) -> AppResult<()> {
        data.check_time_window()?;

        let affected = self.registers.update(student_id, register_id, &data).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Register not found".to_string()));
        }

        tracing::info!(student_id, register_id, status = %data.status(), "Register updated");
        Ok(())
    }

    pub async fn delete(&self, student_id: i32, register_id: i32) -> AppResult<()> {
        let affected = self.registers.delete(student_id, register_id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Register not found".to_string()));
        }

        tracing::info!(student_id, register_id, "Register deleted");
        Ok(())
    }

    pub async fn delete_all(&self) -> AppResult<()> {
        let deleted = self.registers.delete_all().await?;
        tracing::info!(deleted, "All registers deleted");
        Ok(())
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.registers.ping().await
    }
}
