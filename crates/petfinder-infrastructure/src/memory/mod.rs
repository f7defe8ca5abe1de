//! Process-local backends for development, the CLI demo and tests

mod object_store;
mod pet_repo;

pub use object_store::{InMemoryObjectStore, StoredObject};
pub use pet_repo::InMemoryPetRepository;
