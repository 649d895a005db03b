//! Record storage for the registry.
//!
//! The store is the last line of defence for RUT uniqueness: the registry
//! checks for an existing RUT before writing, but two concurrent writers can
//! both pass that check. Implementations must therefore reject an insert or
//! update that would duplicate a normalized RUT atomically with the write,
//! the way a unique index would.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use async_trait::async_trait;
use padron_id::{CompanyKey, WorkerId};
use padron_rut::Rut;

use crate::model::{Company, NewWorker, Worker};

/// Registry storage interface.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Look up a company by key.
    async fn company(&self, id: &CompanyKey) -> Result<Option<Company>, StoreError>;

    /// Look up a company by normalized RUT.
    async fn company_by_rut(&self, rut: &Rut) -> Result<Option<Company>, StoreError>;

    /// Insert a new company. Fails on a duplicate key or RUT.
    async fn insert_company(&self, company: Company) -> Result<Company, StoreError>;

    /// Replace an existing company. Fails if the new RUT belongs to another company.
    async fn update_company(&self, company: Company) -> Result<Company, StoreError>;

    /// Delete a company and every worker it owns.
    async fn delete_company(&self, id: &CompanyKey) -> Result<Company, StoreError>;

    /// Look up a worker by ID.
    async fn worker(&self, id: WorkerId) -> Result<Option<Worker>, StoreError>;

    /// Look up a worker by normalized RUT.
    async fn worker_by_rut(&self, rut: &Rut) -> Result<Option<Worker>, StoreError>;

    /// Insert a worker, assigning its ID. Fails on a duplicate RUT or a
    /// missing company.
    async fn insert_worker(&self, worker: NewWorker) -> Result<Worker, StoreError>;

    /// Replace an existing worker.
    async fn update_worker(&self, worker: Worker) -> Result<Worker, StoreError>;

    /// Delete a worker.
    async fn delete_worker(&self, id: WorkerId) -> Result<Worker, StoreError>;

    /// All workers of a company, ordered by ID.
    async fn workers_of(&self, company_id: &CompanyKey) -> Result<Vec<Worker>, StoreError>;
}
