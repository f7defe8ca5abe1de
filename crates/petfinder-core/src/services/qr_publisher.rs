//! Publishes QR images to object storage at deterministic paths

use std::sync::Arc;

use petfinder_shared::constants::QR_OBJECT_PREFIX;
use petfinder_shared::{OwnerId, PetId};
use tracing::{error, info};

use crate::error::DomainError;
use crate::services::qr_generator::QrImage;
use crate::storage::ObjectStore;

pub struct QrPublisher<S: ObjectStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ObjectStore + ?Sized> Clone for QrPublisher<S> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone() }
    }
}

impl<S: ObjectStore + ?Sized> QrPublisher<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// `qr-codes/<ownerId>/<petId>.png`
    pub fn object_path(owner_id: &OwnerId, pet_id: &PetId) -> String {
        format!("{}/{}/{}.png", QR_OBJECT_PREFIX, owner_id, pet_id)
    }

    /// Uploads (overwriting) and returns the public URL of the object.
    pub async fn publish(
        &self,
        image: &QrImage,
        pet_id: &PetId,
        owner_id: &OwnerId,
    ) -> Result<String, DomainError> {
        let path = Self::object_path(owner_id, pet_id);

        self.store
            .upload(&path, image.png.clone(), image.content_type())
            .await
            .map_err(|e| {
                error!("Error uploading QR code to {}: {}", path, e);
                e
            })?;

        let url = self.store.public_url(&path);
        info!("QR code published for pet {}: {}", pet_id, url);
        Ok(url)
    }

    pub async fn unpublish(&self, pet_id: &PetId, owner_id: &OwnerId) -> Result<(), DomainError> {
        let path = Self::object_path(owner_id, pet_id);
        self.store.remove(&path).await
    }
}
