use std::future::Future;
use std::pin::Pin;
use crate::models::CatalogItem;
use super::postgres::{PostgresClient, PostgresError};

/// Boxed future for async trait methods
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type CatalogResult<T> = Result<T, PostgresError>;

/// Persistent catalog of listings behind the feed and listing endpoints
pub trait CatalogStore: Send + Sync {
    /// Every listing in the catalog, unpaged
    fn all_items(&self) -> BoxFuture<'_, CatalogResult<Vec<CatalogItem>>>;

    /// Store new listings, returning how many rows were written
    fn add_items<'a>(&'a self, items: &'a [CatalogItem]) -> BoxFuture<'a, CatalogResult<u64>>;

    fn is_healthy(&self) -> BoxFuture<'_, CatalogResult<bool>>;
}

impl CatalogStore for PostgresClient {
    fn all_items(&self) -> BoxFuture<'_, CatalogResult<Vec<CatalogItem>>> {
        Box::pin(self.fetch_all_items())
    }

    fn add_items<'a>(&'a self, items: &'a [CatalogItem]) -> BoxFuture<'a, CatalogResult<u64>> {
        Box::pin(self.insert_items(items))
    }

    fn is_healthy(&self) -> BoxFuture<'_, CatalogResult<bool>> {
        Box::pin(self.health_check())
    }
}
