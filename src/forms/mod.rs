//! Payload definitions backing the create endpoints.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod customers;
pub mod defects;

#[derive(Debug, Error)]
/// Errors that can occur when processing submitted payloads.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
}
