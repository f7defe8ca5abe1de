//! Dashboard controller and its cached pet list

pub mod controller;
pub mod state;

pub use controller::{ActionOutcome, DashboardController, Notification, NotificationLevel, Phase};
pub use state::{PetList, PetListEvent};
