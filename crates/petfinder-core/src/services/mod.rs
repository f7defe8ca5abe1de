//! Domain services (business logic)

pub mod qr_generator;
pub mod qr_publisher;
pub mod pet_service;
pub mod qr_service;

pub use qr_generator::{QrGenerator, QrImage};
pub use qr_publisher::QrPublisher;
pub use pet_service::PetService;
pub use qr_service::QrService;
