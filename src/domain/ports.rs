use crate::domain::model::{Document, QueryFilter, QueryOptions};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A remote collection store. Implementations do no caching: every call
/// goes to the backing store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Records of `collection` matching every field in `filter`, in store order.
    async fn query(
        &self,
        collection: &str,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Result<Vec<Document>>;

    /// `Ok(None)` when the store answers but has no record with that id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;
}

#[async_trait]
impl<T: ContentStore + ?Sized> ContentStore for Arc<T> {
    async fn query(
        &self,
        collection: &str,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Result<Vec<Document>> {
        (**self).query(collection, filter, options).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        (**self).get(collection, id).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn store_endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn request_timeout(&self) -> Option<Duration>;
}
