//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, the listing query
//! contract and the [`JobPostingStore`] seam the HTTP layer reads through.
//! No request handling lives here.

pub mod error;
pub mod mock;
pub mod models;
pub mod pool;
pub mod query;
pub mod repository;

pub use error::DbError;
pub use pool::DbPool;
pub use repository::{JobPostingStore, PgJobPostingStore};
