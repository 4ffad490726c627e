//! Request bodies accepted by the catalog routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod product;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("All fields are required")]
    MissingFields,

    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid price")]
    InvalidPrice,

    #[error("invalid image url")]
    InvalidImage,
}
