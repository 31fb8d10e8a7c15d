//! Repository layer for database operations

pub mod catalog;
pub mod registers;

use sqlx::{Pool, Postgres};

pub use catalog::{CatalogRepository, CatalogStore};
pub use registers::{RegisterStore, RegistersRepository};

/// Store implementations sharing one database connection pool
#[derive(Clone)]
pub struct Repository {
    pub registers: RegistersRepository,
    pub catalog: CatalogRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            registers: RegistersRepository::new(pool.clone()),
            catalog: CatalogRepository::new(pool),
        }
    }
}
