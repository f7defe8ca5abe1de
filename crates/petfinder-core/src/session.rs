//! Authenticated request context

use petfinder_shared::OwnerId;

/// The signed-in owner on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub owner_id: OwnerId,
    pub email: Option<String>,
}

impl Session {
    pub fn new(owner_id: OwnerId) -> Self {
        Self { owner_id, email: None }
    }

    pub fn with_email(owner_id: OwnerId, email: impl Into<String>) -> Self {
        Self { owner_id, email: Some(email.into()) }
    }
}
