//! Business logic services

pub mod registers;

use std::sync::Arc;

use crate::repository::{CatalogStore, RegisterStore, Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub registers: registers::RegistersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self::with_stores(Arc::new(repository.registers), Arc::new(repository.catalog))
    }

    /// Create all services over explicit store implementations
    pub fn with_stores(registers: Arc<dyn RegisterStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            registers: registers::RegistersService::new(registers, catalog),
        }
    }
}
