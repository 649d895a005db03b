//! Write requests and their field validation.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Request to create or update a company.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Rut cannot be blank"),
        custom(function = "rut_field")
    )]
    pub rut: String,

    #[serde(default)]
    #[validate(
        length(
            min = 6,
            max = 50,
            message = "Company name must be between 6 and 50 characters"
        ),
        custom(function = "not_blank", message = "Company name cannot be blank")
    )]
    pub company_name: String,
}

impl CompanyRequest {
    pub fn new(rut: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            rut: rut.into(),
            company_name: company_name.into(),
        }
    }
}

/// Request to create or update a worker.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Rut cannot be blank"),
        custom(function = "rut_field")
    )]
    pub rut: String,

    #[serde(default)]
    #[validate(
        length(
            min = 6,
            max = 200,
            message = "Names must be between 6 and 200 characters"
        ),
        custom(function = "not_blank", message = "Names cannot be blank")
    )]
    pub names: String,

    #[serde(default)]
    #[validate(
        length(
            min = 6,
            max = 100,
            message = "First surname must be between 6 and 100 characters"
        ),
        custom(function = "not_blank", message = "First surname cannot be blank")
    )]
    pub first_surname: String,

    #[serde(default)]
    #[validate(
        length(
            min = 6,
            max = 100,
            message = "Second surname must be between 6 and 100 characters"
        ),
        custom(function = "not_blank", message = "Second surname cannot be blank")
    )]
    pub second_surname: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Company id cannot be blank"))]
    pub company_id: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

fn rut_field(value: &str) -> Result<(), ValidationError> {
    if padron_rut::is_valid(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_rut").with_message("Invalid Rut".into()))
    }
}
