//! # PetFinder Core - Domain Module
//! 
//! Domain entities for the PetFinder application.

pub mod pet;

pub use pet::{NewPet, Pet, PetChanges, ScanProfile};
