//! In-process store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use padron_id::{CompanyKey, WorkerId};
use padron_rut::Rut;
use tokio::sync::RwLock;
use tracing::debug;

use super::{RegistryStore, StoreError};
use crate::model::{Company, Entity, NewWorker, Worker};

#[derive(Debug, Default)]
struct Tables {
    companies: HashMap<CompanyKey, Company>,
    company_ruts: HashMap<Rut, CompanyKey>,
    workers: BTreeMap<WorkerId, Worker>,
    worker_ruts: HashMap<Rut, WorkerId>,
    next_worker_id: WorkerId,
}

/// Store backed by in-memory maps behind a single lock.
///
/// Every write holds the lock across its constraint checks and mutation, so
/// the RUT indexes cannot be raced.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of companies currently stored.
    pub async fn company_count(&self) -> usize {
        self.tables.read().await.companies.len()
    }

    /// Number of workers currently stored.
    pub async fn worker_count(&self) -> usize {
        self.tables.read().await.workers.len()
    }
}

fn company_not_found(id: &CompanyKey) -> StoreError {
    StoreError::NotFound {
        entity: Entity::Company,
        id: id.to_string(),
    }
}

fn worker_not_found(id: WorkerId) -> StoreError {
    StoreError::NotFound {
        entity: Entity::Worker,
        id: id.to_string(),
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn company(&self, id: &CompanyKey) -> Result<Option<Company>, StoreError> {
        Ok(self.tables.read().await.companies.get(id).cloned())
    }

    async fn company_by_rut(&self, rut: &Rut) -> Result<Option<Company>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .company_ruts
            .get(rut)
            .and_then(|id| tables.companies.get(id))
            .cloned())
    }

    async fn insert_company(&self, company: Company) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;

        // RUT first: a resubmitted create within the same millisecond is a
        // duplicate, not a key collision.
        if tables.company_ruts.contains_key(&company.rut) {
            return Err(StoreError::DuplicateRut {
                entity: Entity::Company,
                rut: company.rut,
            });
        }
        if tables.companies.contains_key(&company.id) {
            return Err(StoreError::DuplicateKey(company.id));
        }

        tables
            .company_ruts
            .insert(company.rut.clone(), company.id.clone());
        tables.companies.insert(company.id.clone(), company.clone());
        debug!(company_id = %company.id, "Inserted company");
        Ok(company)
    }

    async fn update_company(&self, company: Company) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(previous_rut) = tables.companies.get(&company.id).map(|c| c.rut.clone()) else {
            return Err(company_not_found(&company.id));
        };

        if let Some(owner) = tables.company_ruts.get(&company.rut) {
            if *owner != company.id {
                return Err(StoreError::DuplicateRut {
                    entity: Entity::Company,
                    rut: company.rut,
                });
            }
        }

        tables.company_ruts.remove(&previous_rut);
        tables
            .company_ruts
            .insert(company.rut.clone(), company.id.clone());
        tables.companies.insert(company.id.clone(), company.clone());
        Ok(company)
    }

    async fn delete_company(&self, id: &CompanyKey) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;

        let company = tables
            .companies
            .remove(id)
            .ok_or_else(|| company_not_found(id))?;
        tables.company_ruts.remove(&company.rut);

        let owned: Vec<WorkerId> = tables
            .workers
            .values()
            .filter(|w| w.company_id == *id)
            .map(|w| w.id)
            .collect();
        for worker_id in &owned {
            if let Some(worker) = tables.workers.remove(worker_id) {
                tables.worker_ruts.remove(&worker.rut);
            }
        }

        debug!(company_id = %id, workers_removed = owned.len(), "Deleted company");
        Ok(company)
    }

    async fn worker(&self, id: WorkerId) -> Result<Option<Worker>, StoreError> {
        Ok(self.tables.read().await.workers.get(&id).cloned())
    }

    async fn worker_by_rut(&self, rut: &Rut) -> Result<Option<Worker>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .worker_ruts
            .get(rut)
            .and_then(|id| tables.workers.get(id))
            .cloned())
    }

    async fn insert_worker(&self, worker: NewWorker) -> Result<Worker, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.companies.contains_key(&worker.company_id) {
            return Err(StoreError::MissingCompany(worker.company_id));
        }
        if tables.worker_ruts.contains_key(&worker.rut) {
            return Err(StoreError::DuplicateRut {
                entity: Entity::Worker,
                rut: worker.rut,
            });
        }

        let id = tables.next_worker_id;
        tables.next_worker_id = id.next();

        let worker = worker.with_id(id);
        tables.worker_ruts.insert(worker.rut.clone(), id);
        tables.workers.insert(id, worker.clone());
        debug!(worker_id = %id, company_id = %worker.company_id, "Inserted worker");
        Ok(worker)
    }

    async fn update_worker(&self, worker: Worker) -> Result<Worker, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(previous_rut) = tables.workers.get(&worker.id).map(|w| w.rut.clone()) else {
            return Err(worker_not_found(worker.id));
        };

        if !tables.companies.contains_key(&worker.company_id) {
            return Err(StoreError::MissingCompany(worker.company_id));
        }
        if let Some(owner) = tables.worker_ruts.get(&worker.rut) {
            if *owner != worker.id {
                return Err(StoreError::DuplicateRut {
                    entity: Entity::Worker,
                    rut: worker.rut,
                });
            }
        }

        tables.worker_ruts.remove(&previous_rut);
        tables.worker_ruts.insert(worker.rut.clone(), worker.id);
        tables.workers.insert(worker.id, worker.clone());
        Ok(worker)
    }

    async fn delete_worker(&self, id: WorkerId) -> Result<Worker, StoreError> {
        let mut tables = self.tables.write().await;

        let worker = tables
            .workers
            .remove(&id)
            .ok_or_else(|| worker_not_found(id))?;
        tables.worker_ruts.remove(&worker.rut);
        Ok(worker)
    }

    async fn workers_of(&self, company_id: &CompanyKey) -> Result<Vec<Worker>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.companies.contains_key(company_id) {
            return Err(company_not_found(company_id));
        }
        Ok(tables
            .workers
            .values()
            .filter(|w| w.company_id == *company_id)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Tests
// =============================================================================
