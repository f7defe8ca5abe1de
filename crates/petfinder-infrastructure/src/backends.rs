//! Wires configured backends into services

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use petfinder_core::repositories::PetRepository;
use petfinder_core::services::{PetService, QrGenerator, QrPublisher, QrService};
use petfinder_core::storage::ObjectStore;
use petfinder_shared::config::AppConfig;
use petfinder_shared::BackendKind;

use crate::database::{create_pool, run_migrations, PgPetRepository};
use crate::memory::{InMemoryObjectStore, InMemoryPetRepository};
use crate::storage::{LocalObjectStore, SupabaseStorage};

pub type DynPetService = PetService<dyn PetRepository, dyn ObjectStore>;
pub type DynQrService = QrService<dyn PetRepository, dyn ObjectStore>;

#[derive(Clone)]
pub struct Backends {
    pub repo: Arc<dyn PetRepository>,
    pub store: Arc<dyn ObjectStore>,
    /// Directory to expose over HTTP when objects are kept on local disk.
    pub local_root: Option<PathBuf>,
}

impl Backends {
    pub fn new(repo: Arc<dyn PetRepository>, store: Arc<dyn ObjectStore>) -> Self {
        Self { repo, store, local_root: None }
    }

    /// Memory repository and store, serving objects under `public_base_url`.
    pub fn in_memory(public_base_url: &str) -> Self {
        Self::new(
            Arc::new(InMemoryPetRepository::new()),
            Arc::new(InMemoryObjectStore::new(public_base_url)),
        )
    }

    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let repo: Arc<dyn PetRepository> = match config.database.backend {
            BackendKind::Postgres => {
                let url = config
                    .database
                    .url
                    .as_deref()
                    .context("database.url is not set")?;
                let pool = create_pool(
                    url,
                    config.database.max_connections,
                    config.database.min_connections,
                )
                .await
                .context("Failed to connect to database")?;
                run_migrations(&pool).await.context("Failed to run migrations")?;
                Arc::new(PgPetRepository::new(pool))
            }
            BackendKind::Memory => Arc::new(InMemoryPetRepository::new()),
            other => anyhow::bail!("{} is not a database backend", other.as_str()),
        };

        let storage = &config.storage;
        let mut local_root = None;
        let store: Arc<dyn ObjectStore> = match storage.backend {
            BackendKind::Supabase => {
                let url = storage.url.as_deref().context("storage.url is not set")?;
                let key = storage
                    .service_key
                    .as_deref()
                    .context("storage.service_key is not set")?;
                Arc::new(SupabaseStorage::new(url, key, &storage.bucket)?)
            }
            BackendKind::Local => {
                let root = PathBuf::from(&storage.local_root);
                tokio::fs::create_dir_all(&root)
                    .await
                    .with_context(|| format!("Failed to create {}", root.display()))?;
                local_root = Some(root.clone());
                Arc::new(LocalObjectStore::new(root, storage.public_base_url.clone()))
            }
            BackendKind::Memory => Arc::new(InMemoryObjectStore::new(storage.public_base_url.clone())),
            BackendKind::Postgres => anyhow::bail!("postgres is not a storage backend"),
        };

        info!(
            "Backends ready: database={}, storage={}",
            config.database.backend.as_str(),
            storage.backend.as_str()
        );

        Ok(Self { repo, store, local_root })
    }

    pub fn services(&self, scan_base_url: &str) -> (Arc<DynPetService>, Arc<DynQrService>) {
        let publisher = QrPublisher::new(self.store.clone());
        let pets = Arc::new(PetService::new(self.repo.clone(), publisher.clone()));
        let qr = Arc::new(QrService::new(
            self.repo.clone(),
            QrGenerator::new(scan_base_url),
            publisher,
        ));
        (pets, qr)
    }
}
