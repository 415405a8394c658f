use crate::domain::model::{Document, QueryFilter, QueryOptions};
use crate::domain::ports::ContentStore;
use crate::utils::error::{ContentError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Content store held in memory, seeded from JSON of the form
/// `{"blogposts": [{...}, ...], "faq": [...]}`.
///
/// Collections can be marked unavailable to exercise the degraded paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    unavailable: Arc<RwLock<HashSet<String>>>,
    requests: Arc<AtomicUsize>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(self, collection: &str, documents: Vec<Document>) -> Self {
        self.insert_collection(collection, documents);
        self
    }

    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(collections) = value else {
            return Err(ContentError::ConfigError {
                message: "fixture must be a JSON object keyed by collection name".to_string(),
            });
        };

        let store = Self::new();
        for (name, items) in collections {
            let documents: Vec<Document> = serde_json::from_value(items)?;
            store.insert_collection(&name, documents);
        }
        Ok(store)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&content)?;
        tracing::debug!("Loaded fixture from {}", path.as_ref().display());
        Self::from_json(value)
    }

    pub fn insert_collection(&self, collection: &str, documents: Vec<Document>) {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        collections.insert(collection.to_string(), documents);
    }

    pub fn set_unavailable(&self, collection: &str, unavailable: bool) {
        let mut set = self
            .unavailable
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if unavailable {
            set.insert(collection.to_string());
        } else {
            set.remove(collection);
        }
    }

    /// Number of query and get calls served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn check_available(&self, collection: &str) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let set = self
            .unavailable
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if set.contains(collection) {
            return Err(ContentError::retrieval(collection, "collection unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn query(
        &self,
        collection: &str,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Result<Vec<Document>> {
        self.check_available(collection)?;

        let collections = self
            .collections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let documents = collections
            .get(collection)
            .map(|docs| docs.as_slice())
            .unwrap_or_default();

        Ok(documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .take(options.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.check_available(collection)?;

        let collections = self
            .collections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id() == Some(id)))
            .cloned())
    }
}
