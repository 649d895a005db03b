//! Registry records.

use padron_id::{CompanyKey, WorkerId};
use padron_rut::Rut;
use serde::{Deserialize, Serialize};

/// Record kinds, used in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Company,
    Worker,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Company => f.write_str("Company"),
            Entity::Worker => f.write_str("Worker"),
        }
    }
}

/// A registered company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Synthesized key, immutable after creation.
    pub id: CompanyKey,

    /// Normalized RUT, unique across companies.
    pub rut: Rut,

    pub company_name: String,
}

/// A registered worker, owned by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Store-assigned ID.
    pub id: WorkerId,

    /// Normalized RUT, unique across workers.
    pub rut: Rut,

    pub names: String,
    pub first_surname: String,
    pub second_surname: String,

    /// Owning company.
    pub company_id: CompanyKey,
}

/// A worker that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    pub rut: Rut,
    pub names: String,
    pub first_surname: String,
    pub second_surname: String,
    pub company_id: CompanyKey,
}

impl NewWorker {
    pub(crate) fn with_id(self, id: WorkerId) -> Worker {
        Worker {
            id,
            rut: self.rut,
            names: self.names,
            first_surname: self.first_surname,
            second_surname: self.second_surname,
            company_id: self.company_id,
        }
    }
}
