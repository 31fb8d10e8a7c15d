//! Registers repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::register::{CreateRegister, Register, RegisterDetails, UpdateRegister},
};

/// Enriched projection shared by the list and single-row reads
const DETAILS_SELECT: &str = r#"
    SELECT
        r.id AS register_id,
        s.id AS student_id,
        s.name,
        s.id_number,
        s.email,
        e.id AS equipment_id,
        e.equipment_name,
        e.state,
        r.date,
        r.entry_time::text AS entry_time,
        r.departure_time::text AS departure_time,
        r.comment
    FROM register r
    JOIN student s ON r.student_id = s.id
    JOIN equipment e ON r.equipment_id = e.id
"#;

/// Persistence operations on loan registers. Every method is a single statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegisterStore: Send + Sync {
    /// Insert a new register and return the stored row
    async fn insert(&self, data: &CreateRegister) -> AppResult<Register>;

    /// Every register joined with its student and equipment, in store order
    async fn list_enriched(&self) -> AppResult<Vec<RegisterDetails>>;

    /// Joined rows matching both the student and the register id
    async fn get_enriched(&self, student_id: i32, register_id: i32)
        -> AppResult<Vec<RegisterDetails>>;

    /// Replace the mutable fields of a register, returning the affected row count
    async fn update(&self, student_id: i32, register_id: i32, data: &UpdateRegister)
        -> AppResult<u64>;

    /// Delete one register, returning the affected row count
    async fn delete(&self, student_id: i32, register_id: i32) -> AppResult<u64>;

    /// Delete every register, returning the affected row count
    async fn delete_all(&self) -> AppResult<u64>;

    /// Round-trip to the store
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct RegistersRepository {
    pool: Pool<Postgres>,
}

impl RegistersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegisterStore for RegistersRepository {
    async fn insert(&self, data: &CreateRegister) -> AppResult<Register> {
        let row = sqlx::query_as::<_, Register>(
            r#"
            INSERT INTO register (student_id, equipment_id, date, entry_time, departure_time, comment)
            VALUES ($1, $2, $3, $4::time, $5::time, $6)
            RETURNING id, student_id, equipment_id, date,
                      entry_time::text AS entry_time,
                      departure_time::text AS departure_time,
                      comment
            "#,
        )
        .bind(data.student_id)
        .bind(data.equipment_id)
        .bind(data.date)
        .bind(&data.entry_time)
        .bind(&data.departure_time)
        .bind(&data.comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_enriched(&self) -> AppResult<Vec<RegisterDetails>> {
        let rows = sqlx::query_as::<_, RegisterDetails>(DETAILS_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_enriched(
        &self,
        student_id: i32,
        register_id: i32,
    ) -> AppResult<Vec<RegisterDetails>> {
        let query = format!("{} WHERE s.id = $1 AND r.id = $2", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, RegisterDetails>(&query)
            .bind(student_id)
            .bind(register_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(
        &self,
        student_id: i32,
        register_id: i32,
        data: &UpdateRegister,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE register
            SET equipment_id = $1, date = $2, entry_time = $3::time,
                departure_time = $4::time, comment = $5
            WHERE student_id = $6 AND id = $7
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.date)
        .bind(&data.entry_time)
        .bind(&data.departure_time)
        .bind(&data.comment)
        .bind(student_id)
        .bind(register_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, student_id: i32, register_id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM register WHERE student_id = $1 AND id = $2")
            .bind(student_id)
            .bind(register_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM register")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
