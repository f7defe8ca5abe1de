//! # PetFinder Core
//! 
//! Domain entities, ports, services, and the dashboard controller for PetFinder.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod storage;
pub mod dashboard;
pub mod session;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use session::Session;
