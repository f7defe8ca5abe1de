//! Generate → publish → attach chain for a pet's QR code

use std::sync::Arc;

use petfinder_shared::PetId;
use tracing::{error, info, warn};

use crate::domain::Pet;
use crate::error::DomainError;
use crate::repositories::PetRepository;
use crate::services::pet_service::load_owned;
use crate::services::qr_generator::{QrGenerator, QrImage};
use crate::services::qr_publisher::QrPublisher;
use crate::session::Session;
use crate::storage::ObjectStore;

pub struct QrService<R: PetRepository + ?Sized, S: ObjectStore + ?Sized> {
    repo: Arc<R>,
    generator: QrGenerator,
    publisher: QrPublisher<S>,
}

impl<R: PetRepository + ?Sized, S: ObjectStore + ?Sized> QrService<R, S> {
    pub fn new(repo: Arc<R>, generator: QrGenerator, publisher: QrPublisher<S>) -> Self {
        Self { repo, generator, publisher }
    }

    /// Generates, uploads and records the QR code of a session-owned pet.
    ///
    /// Re-running overwrites the same object, so the record only ever holds
    /// one QR URL. When the upload succeeds but the record cannot be updated,
    /// a freshly created object is removed again so nothing is orphaned.
    pub async fn generate(&self, session: &Session, pet_id: &PetId) -> Result<Pet, DomainError> {
        let pet = load_owned(self.repo.as_ref(), session, pet_id).await?;
        let image = self.generator.generate(&pet.id)?;
        let url = self.publisher.publish(&image, &pet.id, &pet.owner_id).await?;

        match self.repo.attach_qr_url(&pet.id, &url).await {
            Ok(updated) => {
                info!("QR code attached to pet {}", pet.id);
                Ok(updated)
            }
            Err(e) => {
                error!("QR code uploaded but not attached to pet {}: {}", pet.id, e);
                // An earlier URL points at the same object, so only a first
                // publication is rolled back.
                if !pet.has_qr_code() {
                    if let Err(cleanup) = self.publisher.unpublish(&pet.id, &pet.owner_id).await {
                        warn!("Orphaned QR object for pet {}: {}", pet.id, cleanup);
                    }
                }
                Err(e)
            }
        }
    }

    /// Renders the QR image of a session-owned pet without publishing it.
    pub async fn render(&self, session: &Session, pet_id: &PetId) -> Result<(Pet, QrImage), DomainError> {
        let pet = load_owned(self.repo.as_ref(), session, pet_id).await?;
        let image = self.generator.generate(&pet.id)?;
        Ok((pet, image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPet;
    use crate::repositories::MockPetRepository;
    use crate::storage::MockObjectStore;
    use chrono::Utc;
    use uuid::Uuid;

    fn pet_for(owner_id: Uuid) -> Pet {
        Pet::from_new(Uuid::new_v4(), owner_id, &NewPet::new("Max", "Dog", "Lab"), Utc::now())
    }

    fn service(repo: MockPetRepository, store: MockObjectStore) -> QrService<MockPetRepository, MockObjectStore> {
        QrService::new(
            Arc::new(repo),
            QrGenerator::new("http://localhost:8080"),
            QrPublisher::new(Arc::new(store)),
        )
    }

    #[tokio::test]
    async fn test_generate_attaches_public_url() {
        let owner_id = Uuid::new_v4();
        let pet = pet_for(owner_id);
        let pet_id = pet.id;
        let lookup = pet.clone();

        let mut repo = MockPetRepository::new();
        repo.expect_get_by_id().returning(move |_| Ok(lookup.clone()));
        repo.expect_attach_qr_url().times(1).returning(move |_, url| {
            let mut updated = pet.clone();
            updated.qr_code_url = Some(url.to_string());
            Ok(updated)
        });

        let mut store = MockObjectStore::new();
        store.expect_upload().times(1).returning(|_, _, _| Ok(()));
        store
            .expect_public_url()
            .returning(|path| format!("https://cdn.example/{}", path));

        let updated = service(repo, store)
            .generate(&Session::new(owner_id), &pet_id)
            .await
            .unwrap();

        assert_eq!(
            updated.qr_code_url,
            Some(format!("https://cdn.example/qr-codes/{}/{}.png", owner_id, pet_id))
        );
    }

    #[tokio::test]
    async fn test_failed_attach_removes_fresh_object() {
        let owner_id = Uuid::new_v4();
        let pet = pet_for(owner_id);
        let pet_id = pet.id;

        let mut repo = MockPetRepository::new();
        repo.expect_get_by_id().returning(move |_| Ok(pet.clone()));
        repo.expect_attach_qr_url()
            .returning(|_, _| Err(DomainError::Persistence("connection reset".into())));

        let mut store = MockObjectStore::new();
        store.expect_upload().returning(|_, _, _| Ok(()));
        store.expect_public_url().returning(|path| path.to_string());
        store.expect_remove().times(1).returning(|_| Ok(()));

        let err = service(repo, store)
            .generate(&Session::new(owner_id), &pet_id)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_failed_attach_keeps_previously_published_object() {
        let owner_id = Uuid::new_v4();
        let mut pet = pet_for(owner_id);
        pet.qr_code_url = Some("https://cdn.example/old.png".into());
        let pet_id = pet.id;

        let mut repo = MockPetRepository::new();
        repo.expect_get_by_id().returning(move |_| Ok(pet.clone()));
        repo.expect_attach_qr_url()
            .returning(|_, _| Err(DomainError::Persistence("timeout".into())));

        let mut store = MockObjectStore::new();
        store.expect_upload().returning(|_, _, _| Ok(()));
        store.expect_public_url().returning(|path| path.to_string());
        store.expect_remove().never();

        assert!(service(repo, store)
            .generate(&Session::new(owner_id), &pet_id)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_upload_failure_skips_attach() {
        let owner_id = Uuid::new_v4();
        let pet = pet_for(owner_id);
        let pet_id = pet.id;

        let mut repo = MockPetRepository::new();
        repo.expect_get_by_id().returning(move |_| Ok(pet.clone()));
        repo.expect_attach_qr_url().never();

        let mut store = MockObjectStore::new();
        store
            .expect_upload()
            .returning(|_, _, _| Err(DomainError::Storage("network unreachable".into())));

        let err = service(repo, store)
            .generate(&Session::new(owner_id), &pet_id)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
    }
}
