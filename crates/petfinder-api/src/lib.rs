//! # PetFinder API
//! 
//! HTTP handlers, authentication, and the router for the PetFinder dashboard.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
