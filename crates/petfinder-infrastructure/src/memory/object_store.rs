use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use petfinder_core::error::DomainError;
use petfinder_core::storage::ObjectStore;
use petfinder_shared::utils::join_url;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
    public_base_url: String,
}

impl InMemoryObjectStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.read().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), DomainError> {
        self.objects.write().insert(
            path.to_string(),
            StoredObject { bytes, content_type: content_type.to_string() },
        );
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), DomainError> {
        self.objects.write().remove(path);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }
}
