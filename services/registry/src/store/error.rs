//! Store error types.

use padron_id::CompanyKey;
use padron_rut::Rut;
use thiserror::Error;

use crate::model::Entity;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness constraint on the normalized RUT.
    #[error("{entity} rut '{rut}' violates uniqueness")]
    DuplicateRut { entity: Entity, rut: Rut },

    /// Primary key constraint on the company key.
    #[error("company key '{0}' already exists")]
    DuplicateKey(CompanyKey),

    /// The record to update or delete does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    /// A worker references a company that does not exist.
    #[error("referenced company not found: {0}")]
    MissingCompany(CompanyKey),

    /// The backing store failed.
    #[error("backend failure: {0}")]
    Backend(String),
}
