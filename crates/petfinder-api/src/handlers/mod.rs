//! HTTP handlers

pub mod health;
pub mod landing;
pub mod pets;
pub mod qr;
pub mod scan;

use petfinder_shared::PetId;
use uuid::Uuid;

use crate::error::ApiError;

/// Path ids arrive as raw strings so malformed ones get the standard error envelope.
pub(crate) fn parse_pet_id(raw: &str) -> Result<PetId, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid pet id: {}", raw)))
}
