//! TuneSwipe data store
//!
//! Typed access to the TuneSwipe PostgreSQL schema: entity models,
//! per-entity repositories, and the [`Store`] handle that owns the
//! connection pool and runs migrations.

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use store::Store;
