//! Pet repository trait (port)

use async_trait::async_trait;
use petfinder_shared::{OwnerId, PetId};

use crate::domain::{NewPet, Pet, PetChanges};
use crate::error::DomainError;

/// CRUD over pet records. Identifiers and timestamps are assigned by the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn create(&self, owner_id: &OwnerId, input: &NewPet) -> Result<Pet, DomainError>;

    /// Newest first; an owner without pets yields an empty list.
    async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Pet>, DomainError>;

    async fn get_by_id(&self, pet_id: &PetId) -> Result<Pet, DomainError>;

    async fn update(&self, pet_id: &PetId, changes: &PetChanges) -> Result<Pet, DomainError>;

    async fn delete(&self, pet_id: &PetId) -> Result<(), DomainError>;

    async fn attach_qr_url(&self, pet_id: &PetId, url: &str) -> Result<Pet, DomainError>;
}
