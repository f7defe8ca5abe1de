//! # PetFinder Infrastructure
//! 
//! Database and object storage implementations (adapters) of the core ports.

pub mod database;
pub mod storage;
pub mod memory;
pub mod backends;

pub use backends::{Backends, DynPetService, DynQrService};
pub use database::{create_pool, run_migrations, PgPetRepository};
pub use memory::{InMemoryObjectStore, InMemoryPetRepository};
pub use storage::{LocalObjectStore, SupabaseStorage};
