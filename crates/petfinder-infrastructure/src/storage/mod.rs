//! Object storage adapters

pub mod supabase;
pub mod local;

pub use supabase::SupabaseStorage;
pub use local::LocalObjectStore;
