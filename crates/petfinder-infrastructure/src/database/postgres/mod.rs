//! PostgreSQL repository implementations

pub mod pet_repo_impl;

pub use pet_repo_impl::PgPetRepository;
