//! Object storage trait (port)

pub mod object_store;

pub use object_store::ObjectStore;

#[cfg(test)]
pub use object_store::MockObjectStore;
