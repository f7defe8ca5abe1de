//! Common types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PetId = Uuid;
pub type OwnerId = Uuid;

pub fn new_id() -> PetId {
    Uuid::new_v4()
}

/// Which adapter backs a port at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Postgres,
    Supabase,
    Local,
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Postgres => "postgres",
            BackendKind::Supabase => "supabase",
            BackendKind::Local => "local",
            BackendKind::Memory => "memory",
        }
    }
}
