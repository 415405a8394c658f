use crate::core::{ContentRecord, ContentStore, Document, QueryFilter, QueryOptions};
use crate::utils::error::{ContentError, Result};

/// Typed read access to the content store. Every call goes to the store;
/// nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ContentRepository<S: ContentStore> {
    store: S,
}

impl<S: ContentStore> ContentRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Raw documents of `collection`, in store order, at most `options.limit`.
    pub async fn fetch_documents(
        &self,
        collection: &str,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Result<Vec<Document>> {
        let mut documents = self.store.query(collection, filter, options).await?;
        if let Some(limit) = options.limit {
            documents.truncate(limit);
        }
        Ok(documents)
    }

    /// All records of `T`'s collection matching `filter`.
    ///
    /// Documents that do not decode as `T` are skipped with a warning so one
    /// malformed entry does not empty the whole listing.
    pub async fn fetch_all<T: ContentRecord>(
        &self,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Result<Vec<T>> {
        let documents = self.fetch_documents(T::COLLECTION, filter, options).await?;
        let total = documents.len();

        let records: Vec<T> = documents
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id().map(str::to_string);
                match doc.decode::<T>() {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(
                            collection = T::COLLECTION,
                            id = ?id,
                            "Skipping undecodable record: {}",
                            e
                        );
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(
            collection = T::COLLECTION,
            fetched = total,
            decoded = records.len(),
            "Fetched collection"
        );
        Ok(records)
    }

    /// Shorthand for an unfiltered, unlimited `fetch_all`.
    pub async fn list<T: ContentRecord>(&self) -> Result<Vec<T>> {
        self.fetch_all(&QueryFilter::default(), &QueryOptions::default())
            .await
    }

    pub async fn fetch_document(&self, collection: &str, id: &str) -> Result<Document> {
        self.store
            .get(collection, id)
            .await?
            .ok_or_else(|| ContentError::not_found(collection, id))
    }

    /// Exactly one record, or `NotFoundError` when the store has none with `id`.
    pub async fn fetch_by_id<T: ContentRecord>(&self, id: &str) -> Result<T> {
        let document = self.fetch_document(T::COLLECTION, id).await?;
        document.decode::<T>().map_err(|e| {
            ContentError::retrieval(T::COLLECTION, format!("record '{}' is malformed: {}", id, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentStore;
    use crate::domain::model::{BlogPost, Faq};
    use crate::utils::error::ErrorCategory;
    use serde_json::json;

    fn store() -> InMemoryContentStore {
        InMemoryContentStore::from_json(json!({
            "blogposts": [
                {"_id": "1", "title": "Latch basics", "category": "Breastfeeding"},
                {"title": "No identifier"},
                {"_id": "2", "title": "Iron-rich foods", "category": "Nutrition"},
                {"_id": "3", "title": "Sleep and feeding", "category": "Postpartum"}
            ],
            "faq": [
                {"_id": "f1", "question": "Pumping at work?", "category": "Breastfeeding"}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_order_and_skips_malformed() {
        let repository = ContentRepository::new(store());
        let posts: Vec<BlogPost> = repository.list().await.unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_fetch_all_with_filter_and_limit() {
        let repository = ContentRepository::new(store());

        let nutrition: Vec<BlogPost> = repository
            .fetch_all(
                &QueryFilter::new().eq("category", "Nutrition"),
                &QueryOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(nutrition.len(), 1);
        assert_eq!(nutrition[0].id, "2");

        let limited = repository
            .fetch_documents("blogposts", &QueryFilter::new(), &QueryOptions::limit(2))
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let repository = ContentRepository::new(store());

        let faq: Faq = repository.fetch_by_id("f1").await.unwrap();
        assert_eq!(faq.question.as_deref(), Some("Pumping at work?"));

        let err = repository
            .fetch_by_id::<BlogPost>("missing-id")
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[tokio::test]
    async fn test_retrieval_failure_propagates() {
        let store = store();
        store.set_unavailable("blogposts", true);
        let repository = ContentRepository::new(store);

        let err = repository.list::<BlogPost>().await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Retrieval);

        let err = repository.fetch_by_id::<BlogPost>("1").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Retrieval);
    }

    #[tokio::test]
    async fn test_every_call_reaches_the_store() {
        let store = store();
        let repository = ContentRepository::new(store.clone());
        repository.list::<BlogPost>().await.unwrap();
        repository.list::<BlogPost>().await.unwrap();
        assert_eq!(store.request_count(), 2);
    }
}
