use crate::core::repository::ContentRepository;
use crate::core::{ContentRecord, ContentStore, QueryFilter, QueryOptions};
use crate::utils::error::Result;

pub const DEFAULT_RELATED_FETCH_LIMIT: usize = 4;
pub const DEFAULT_RELATED_MAX: usize = 3;

/// Result of resolving one record for a detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome<T> {
    Found { record: T, related: Vec<T> },
    NotFound,
}

impl<T> DetailOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }

    pub fn related(&self) -> &[T] {
        match self {
            Self::Found { related, .. } => related,
            Self::NotFound => &[],
        }
    }
}

/// Loads a record and a few others from the same category.
///
/// Related records come from an unfiltered page of the collection
/// (`related_fetch_limit` long) narrowed in memory, so a category that is
/// rare in that page yields fewer related items.
#[derive(Debug, Clone)]
pub struct DetailResolver<S: ContentStore> {
    repository: ContentRepository<S>,
    related_fetch_limit: usize,
    related_max: usize,
}

impl<S: ContentStore> DetailResolver<S> {
    pub fn new(repository: ContentRepository<S>) -> Self {
        Self {
            repository,
            related_fetch_limit: DEFAULT_RELATED_FETCH_LIMIT,
            related_max: DEFAULT_RELATED_MAX,
        }
    }

    pub fn with_limits(mut self, related_fetch_limit: usize, related_max: usize) -> Self {
        self.related_fetch_limit = related_fetch_limit;
        self.related_max = related_max;
        self
    }

    /// Never fails: a missing record and a failed primary fetch both come
    /// back as `NotFound`; a failed related fetch leaves `related` empty.
    pub async fn resolve<T: ContentRecord>(&self, id: &str) -> DetailOutcome<T> {
        match self.try_resolve::<T>(id).await {
            Ok((record, related)) => DetailOutcome::Found { record, related },
            Err(e) if e.is_not_found() => {
                tracing::info!(collection = T::COLLECTION, id, "Record not found");
                DetailOutcome::NotFound
            }
            Err(e) => {
                tracing::error!(collection = T::COLLECTION, id, "Error loading record: {}", e);
                DetailOutcome::NotFound
            }
        }
    }

    /// Like [`DetailResolver::resolve`] but keeps the primary fetch error,
    /// so callers can tell a missing record from an unreachable store.
    pub async fn try_resolve<T: ContentRecord>(&self, id: &str) -> Result<(T, Vec<T>)> {
        let record: T = self.repository.fetch_by_id(id).await?;

        let related = match record.category() {
            Some(category) if !category.is_empty() => {
                match self
                    .repository
                    .fetch_all::<T>(
                        &QueryFilter::default(),
                        &QueryOptions::limit(self.related_fetch_limit),
                    )
                    .await
                {
                    Ok(candidates) => related_among(&record, candidates, self.related_max),
                    Err(e) => {
                        tracing::warn!(
                            collection = T::COLLECTION,
                            id,
                            "Could not load related records: {}",
                            e
                        );
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        };

        Ok((record, related))
    }
}

/// Candidates sharing `primary`'s category, minus `primary` itself, in the
/// given order and at most `max` long. Empty when `primary` has no category.
pub fn related_among<T: ContentRecord>(primary: &T, candidates: Vec<T>, max: usize) -> Vec<T> {
    let Some(category) = primary.category().filter(|c| !c.is_empty()) else {
        return Vec::new();
    };

    candidates
        .into_iter()
        .filter(|candidate| candidate.id() != primary.id() && candidate.category() == Some(category))
        .take(max)
        .collect()
}
