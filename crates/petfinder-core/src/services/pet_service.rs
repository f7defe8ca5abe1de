// ============================================================================
// PetFinder Core - Pet Service
// File: crates/petfinder-core/src/services/pet_service.rs
// ============================================================================
//! Owner-scoped pet operations on top of the repository port

use std::sync::Arc;

use petfinder_shared::PetId;
use tracing::{info, warn};

use crate::domain::{NewPet, Pet, PetChanges, ScanProfile};
use crate::error::DomainError;
use crate::repositories::PetRepository;
use crate::services::qr_publisher::QrPublisher;
use crate::session::Session;
use crate::storage::ObjectStore;

/// Fetches a pet and hides it when it belongs to someone else.
pub(crate) async fn load_owned<R: PetRepository + ?Sized>(
    repo: &R,
    session: &Session,
    pet_id: &PetId,
) -> Result<Pet, DomainError> {
    let pet = repo.get_by_id(pet_id).await?;
    if !pet.is_owned_by(&session.owner_id) {
        warn!("Owner {} requested pet {} owned by someone else", session.owner_id, pet_id);
        return Err(DomainError::NotFound(*pet_id));
    }
    Ok(pet)
}

pub struct PetService<R: PetRepository + ?Sized, S: ObjectStore + ?Sized> {
    repo: Arc<R>,
    publisher: QrPublisher<S>,
}

impl<R: PetRepository + ?Sized, S: ObjectStore + ?Sized> PetService<R, S> {
    pub fn new(repo: Arc<R>, publisher: QrPublisher<S>) -> Self {
        Self { repo, publisher }
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<Pet>, DomainError> {
        self.repo.list_by_owner(&session.owner_id).await
    }

    pub async fn register(&self, session: &Session, input: NewPet) -> Result<Pet, DomainError> {
        let input = input.validated()?;
        let pet = self.repo.create(&session.owner_id, &input).await?;
        info!("Pet {} registered for owner {}", pet.id, session.owner_id);
        Ok(pet)
    }

    pub async fn get(&self, session: &Session, pet_id: &PetId) -> Result<Pet, DomainError> {
        load_owned(self.repo.as_ref(), session, pet_id).await
    }

    pub async fn update(
        &self,
        session: &Session,
        pet_id: &PetId,
        changes: PetChanges,
    ) -> Result<Pet, DomainError> {
        let changes = changes.validated()?;
        let current = load_owned(self.repo.as_ref(), session, pet_id).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        self.repo.update(pet_id, &changes).await
    }

    /// Deletes the record, then its published QR image. A failure on the
    /// storage side is logged and does not undo the delete.
    pub async fn remove(&self, session: &Session, pet_id: &PetId) -> Result<(), DomainError> {
        let pet = load_owned(self.repo.as_ref(), session, pet_id).await?;
        self.repo.delete(pet_id).await?;
        info!("Pet {} deleted by owner {}", pet_id, session.owner_id);

        if pet.has_qr_code() {
            if let Err(e) = self.publisher.unpublish(&pet.id, &pet.owner_id).await {
                warn!("Pet {} deleted but its QR object was not removed: {}", pet_id, e);
            }
        }
        Ok(())
    }

    /// Public lookup behind the scan route.
    pub async fn scan_profile(&self, pet_id: &PetId) -> Result<ScanProfile, DomainError> {
        let pet = self.repo.get_by_id(pet_id).await?;
        Ok(ScanProfile::from(&pet))
    }
}
