//! Read-only access to the student and equipment catalogs

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Equipment, Student},
};

/// Lookups the register subsystem needs from the catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Student by id, if any
    async fn find_student(&self, id: i32) -> AppResult<Option<Student>>;

    /// Equipment by id, if any
    async fn find_equipment(&self, id: i32) -> AppResult<Option<Equipment>>;
}

#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Postgres>,
}

impl CatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn find_student(&self, id: i32) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, id_number, email FROM student WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    async fn find_equipment(&self, id: i32) -> AppResult<Option<Equipment>> {
        let equipment = sqlx::query_as::<_, Equipment>(
            "SELECT id, equipment_name, state FROM equipment WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(equipment)
    }
}
