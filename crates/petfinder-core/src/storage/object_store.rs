use async_trait::async_trait;

use crate::error::DomainError;

/// Path-addressed blob storage with public URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `bytes` at `path`, replacing whatever is there.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), DomainError>;

    /// Removing a missing object succeeds.
    async fn remove(&self, path: &str) -> Result<(), DomainError>;

    fn public_url(&self, path: &str) -> String;
}
