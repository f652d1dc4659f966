//! Local SQLite storage for the progress blob.

pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::SqliteBlobStore;
