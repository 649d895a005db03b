//! Registry operations.

use padron_id::{Clock, CompanyKey, KeyGenerator, SystemClock, WorkerId};
use padron_rut::Rut;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::error::RegistryError;
use crate::model::{Company, Entity, NewWorker, Worker};
use crate::request::{CompanyRequest, WorkerRequest};
use crate::store::RegistryStore;

/// Company and worker registry over a store.
///
/// The store and key generator are supplied by the caller; the registry
/// holds no global state.
pub struct Registry<S, C = SystemClock> {
    store: S,
    keys: KeyGenerator<C>,
}

impl<S: RegistryStore, C: Clock> Registry<S, C> {
    pub fn new(store: S, keys: KeyGenerator<C>) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Companies
    // =========================================================================

    /// Registers a new company.
    ///
    /// Rejects a RUT that is already registered, then keys the company by
    /// its name and the current instant.
    #[instrument(skip(self, request), fields(rut = %request.rut))]
    pub async fn create_company(&self, request: CompanyRequest) -> Result<Company, RegistryError> {
        request.validate()?;
        let rut = normalize(&request.rut)?;

        if self.store.company_by_rut(&rut).await?.is_some() {
            warn!(rut = %rut, "Company RUT already registered");
            return Err(RegistryError::DuplicateIdentifier {
                entity: Entity::Company,
                rut,
            });
        }

        let company = Company {
            id: self.keys.generate(&request.company_name),
            rut,
            company_name: request.company_name,
        };

        let company = self.store.insert_company(company).await.map_err(|e| {
            let err = RegistryError::from(e);
            warn!(error = %err, "Company insert rejected by store");
            err
        })?;

        info!(company_id = %company.id, rut = %company.rut, "Company created");
        Ok(company)
    }

    /// Replaces a company's name and RUT. The key never changes.
    #[instrument(skip(self, request), fields(company_id = %id))]
    pub async fn update_company(
        &self,
        id: &CompanyKey,
        request: CompanyRequest,
    ) -> Result<Company, RegistryError> {
        request.validate()?;
        let rut = normalize(&request.rut)?;

        let mut company = self.get_company(id).await?;

        if let Some(holder) = self.store.company_by_rut(&rut).await? {
            if holder.id != company.id {
                warn!(rut = %rut, holder = %holder.id, "Company RUT already registered");
                return Err(RegistryError::DuplicateIdentifier {
                    entity: Entity::Company,
                    rut,
                });
            }
        }

        company.rut = rut;
        company.company_name = request.company_name;
        let company = self.store.update_company(company).await?;

        info!(company_id = %company.id, "Company updated");
        Ok(company)
    }

    pub async fn get_company(&self, id: &CompanyKey) -> Result<Company, RegistryError> {
        self.store
            .company(id)
            .await?
            .ok_or_else(|| RegistryError::not_found(Entity::Company, id))
    }

    /// Deletes a company together with its workers.
    pub async fn delete_company(&self, id: &CompanyKey) -> Result<(), RegistryError> {
        let company = self.store.delete_company(id).await?;
        info!(company_id = %company.id, "Company deleted");
        Ok(())
    }

    // =========================================================================
    // Workers
    // =========================================================================

    /// Registers a new worker under an existing company.
    #[instrument(skip(self, request), fields(rut = %request.rut, company_id = %request.company_id))]
    pub async fn create_worker(&self, request: WorkerRequest) -> Result<Worker, RegistryError> {
        request.validate()?;
        let rut = normalize(&request.rut)?;

        if self.store.worker_by_rut(&rut).await?.is_some() {
            warn!(rut = %rut, "Worker RUT already registered");
            return Err(RegistryError::DuplicateIdentifier {
                entity: Entity::Worker,
                rut,
            });
        }

        let company_id = self.existing_company(&request.company_id).await?;

        let worker = self
            .store
            .insert_worker(NewWorker {
                rut,
                names: request.names,
                first_surname: request.first_surname,
                second_surname: request.second_surname,
                company_id,
            })
            .await?;

        info!(worker_id = %worker.id, company_id = %worker.company_id, "Worker created");
        Ok(worker)
    }

    /// Replaces a worker's fields, including its company.
    #[instrument(skip(self, request), fields(worker_id = %id))]
    pub async fn update_worker(
        &self,
        id: WorkerId,
        request: WorkerRequest,
    ) -> Result<Worker, RegistryError> {
        request.validate()?;
        let rut = normalize(&request.rut)?;

        let mut worker = self.get_worker(id).await?;

        if let Some(holder) = self.store.worker_by_rut(&rut).await? {
            if holder.id != worker.id {
                warn!(rut = %rut, holder = %holder.id, "Worker RUT already registered");
                return Err(RegistryError::DuplicateIdentifier {
                    entity: Entity::Worker,
                    rut,
                });
            }
        }

        worker.company_id = self.existing_company(&request.company_id).await?;
        worker.rut = rut;
        worker.names = request.names;
        worker.first_surname = request.first_surname;
        worker.second_surname = request.second_surname;
        let worker = self.store.update_worker(worker).await?;

        info!(worker_id = %worker.id, "Worker updated");
        Ok(worker)
    }

    pub async fn get_worker(&self, id: WorkerId) -> Result<Worker, RegistryError> {
        self.store
            .worker(id)
            .await?
            .ok_or_else(|| RegistryError::not_found(Entity::Worker, id))
    }

    pub async fn delete_worker(&self, id: WorkerId) -> Result<(), RegistryError> {
        let worker = self.store.delete_worker(id).await?;
        info!(worker_id = %worker.id, "Worker deleted");
        Ok(())
    }

    /// Lists the workers of a company.
    pub async fn workers_of(&self, company_id: &CompanyKey) -> Result<Vec<Worker>, RegistryError> {
        Ok(self.store.workers_of(company_id).await?)
    }

    /// Resolves a company reference from a request, failing with `NotFound`
    /// when it is malformed or unknown.
    async fn existing_company(&self, raw: &str) -> Result<CompanyKey, RegistryError> {
        let key = CompanyKey::parse(raw)
            .map_err(|_| RegistryError::not_found(Entity::Company, raw))?;
        Ok(self.get_company(&key).await?.id)
    }
}

fn normalize(raw: &str) -> Result<Rut, RegistryError> {
    Rut::parse(raw).map_err(|err| {
        debug!(reason = %err.reason(), "Rejected RUT");
        RegistryError::from(err)
    })
}
