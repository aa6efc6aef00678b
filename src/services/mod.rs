// Service exports
pub mod catalog;
pub mod postgres;

pub use catalog::{BoxFuture, CatalogResult, CatalogStore};
pub use postgres::{PostgresClient, PostgresError};
