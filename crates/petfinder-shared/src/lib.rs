//! # PetFinder Shared
//! 
//! Shared configuration, telemetry, id types, and constants for the PetFinder workspace.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
