//! Registry error types.

use padron_id::CompanyKey;
use padron_rut::{InvalidFormat, Rut};
use thiserror::Error;

use crate::model::Entity;
use crate::store::StoreError;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Registry operation errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// One or more request fields failed validation.
    #[error("Validation of request failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// The RUT is not valid.
    #[error("Invalid Rut")]
    InvalidRut(#[from] InvalidFormat),

    /// A record with the same normalized RUT already exists.
    #[error("{entity} with the rut '{rut}' already exists.")]
    DuplicateIdentifier { entity: Entity, rut: Rut },

    /// The referenced record does not exist.
    #[error("{entity} does not exist, id: {id}")]
    NotFound { entity: Entity, id: String },

    /// Two companies with the same prefix were created in the same millisecond.
    #[error("company key '{0}' is already taken")]
    KeyCollision(CompanyKey),

    /// The store failed for a reason not covered above.
    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

impl RegistryError {
    pub fn not_found(entity: Entity, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns a stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::Validation(_) => "validation_failed",
            RegistryError::InvalidRut(_) => "invalid_rut",
            RegistryError::DuplicateIdentifier { .. } => "duplicate_identifier",
            RegistryError::NotFound { .. } => "not_found",
            RegistryError::KeyCollision(_) => "key_collision",
            RegistryError::Store(_) => "store_error",
        }
    }

    /// Returns the message safe to show to end users.
    pub fn public_message(&self) -> String {
        match self {
            RegistryError::Validation(_) => self.to_string(),
            RegistryError::InvalidRut(err) => {
                format!("Validation of request failed: rut: {err}")
            }
            RegistryError::DuplicateIdentifier { .. } => "Duplicated Element".to_string(),
            RegistryError::NotFound { .. } => "Not found".to_string(),
            RegistryError::KeyCollision(_) | RegistryError::Store(_) => {
                "Internal Server Error".to_string()
            }
        }
    }

    /// Returns true if the caller can fix the error by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            RegistryError::KeyCollision(_) | RegistryError::Store(_)
        )
    }

    /// Returns the per-field failures, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            RegistryError::Validation(fields) => fields,
            _ => &[],
        }
    }
}

impl From<validator::ValidationErrors> for RegistryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| FieldError {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        // stable: keeps per-field declaration order
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        RegistryError::Validation(fields)
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateRut { entity, rut } => {
                RegistryError::DuplicateIdentifier { entity, rut }
            }
            StoreError::DuplicateKey(key) => RegistryError::KeyCollision(key),
            StoreError::NotFound { entity, id } => RegistryError::NotFound { entity, id },
            StoreError::MissingCompany(key) => RegistryError::not_found(Entity::Company, key),
            other => RegistryError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_joins_fields() {
        let err = RegistryError::Validation(vec![
            FieldError {
                field: "rut".to_string(),
                message: "Rut cannot be blank".to_string(),
            },
            FieldError {
                field: "rut".to_string(),
                message: "Invalid Rut".to_string(),
            },
        ]);
        assert_eq!(
            err.public_message(),
            "Validation of request failed: rut: Rut cannot be blank, rut: Invalid Rut"
        );
        assert_eq!(err.code(), "validation_failed");
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_invalid_rut_message() {
        let err: RegistryError = Rut::parse("19").unwrap_err().into();
        assert_eq!(err.to_string(), "Invalid Rut");
        assert_eq!(
            err.public_message(),
            "Validation of request failed: rut: Invalid Rut"
        );
    }

    #[test]
    fn test_duplicate_maps_to_fixed_message() {
        let err: RegistryError = StoreError::DuplicateRut {
            entity: Entity::Company,
            rut: Rut::parse("1-9").unwrap(),
        }
        .into();
        assert!(matches!(err, RegistryError::DuplicateIdentifier { .. }));
        assert_eq!(err.to_string(), "Company with the rut '19' already exists.");
        assert_eq!(err.public_message(), "Duplicated Element");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let key = CompanyKey::parse("pre20240110223344422").unwrap();
        let err: RegistryError = StoreError::DuplicateKey(key).into();
        assert_eq!(err.code(), "key_collision");
        assert_eq!(err.public_message(), "Internal Server Error");
        assert!(!err.is_client_error());
    }
}
