use crate::core::repository::ContentRepository;
use crate::core::{ContentRecord, ContentStore, QueryFilter, QueryOptions};
use crate::domain::model::{BlogPost, Faq, Testimonial};

pub const DEFAULT_FAQ_LIMIT: usize = 6;
pub const DEFAULT_BLOG_LIMIT: usize = 3;
pub const DEFAULT_TESTIMONIAL_LIMIT: usize = 3;

/// Featured records if any are flagged, otherwise the first ones delivered.
pub fn featured_or_first<T: ContentRecord>(records: Vec<T>, limit: usize) -> Vec<T> {
    let featured: Vec<T> = records.iter().filter(|r| r.is_featured()).cloned().collect();
    let chosen = if featured.is_empty() { records } else { featured };
    chosen.into_iter().take(limit).collect()
}

#[derive(Debug, Clone, Copy)]
pub struct HomeLimits {
    pub faqs: usize,
    pub posts: usize,
    pub testimonials: usize,
}

impl Default for HomeLimits {
    fn default() -> Self {
        Self {
            faqs: DEFAULT_FAQ_LIMIT,
            posts: DEFAULT_BLOG_LIMIT,
            testimonials: DEFAULT_TESTIMONIAL_LIMIT,
        }
    }
}

/// Landing page sections. Each one loads and fails on its own.
pub struct HomePage<S: ContentStore> {
    repository: ContentRepository<S>,
    limits: HomeLimits,
    faqs: Vec<Faq>,
    latest_posts: Vec<BlogPost>,
    testimonials: Vec<Testimonial>,
    loading_faqs: bool,
    loading_posts: bool,
    loading_testimonials: bool,
}

impl<S: ContentStore> HomePage<S> {
    pub fn new(repository: ContentRepository<S>) -> Self {
        Self {
            repository,
            limits: HomeLimits::default(),
            faqs: Vec::new(),
            latest_posts: Vec::new(),
            testimonials: Vec::new(),
            loading_faqs: true,
            loading_posts: true,
            loading_testimonials: true,
        }
    }

    pub fn with_limits(mut self, limits: HomeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Loads the three sections concurrently.
    pub async fn load(&mut self) {
        self.loading_faqs = true;
        self.loading_posts = true;
        self.loading_testimonials = true;

        let limits = self.limits;
        let (faqs, posts, testimonials) = tokio::join!(
            load_section::<S, Faq>(&self.repository, limits.faqs),
            load_section::<S, BlogPost>(&self.repository, limits.posts),
            load_section::<S, Testimonial>(&self.repository, limits.testimonials),
        );

        self.faqs = featured_or_first(faqs, limits.faqs);
        self.loading_faqs = false;

        self.latest_posts = posts.into_iter().take(limits.posts).collect();
        self.loading_posts = false;

        self.testimonials = featured_or_first(testimonials, limits.testimonials);
        self.loading_testimonials = false;
    }

    pub fn faqs(&self) -> &[Faq] {
        &self.faqs
    }

    pub fn latest_posts(&self) -> &[BlogPost] {
        &self.latest_posts
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn is_loading(&self) -> bool {
        self.loading_faqs || self.loading_posts || self.loading_testimonials
    }
}

async fn load_section<S: ContentStore, T: ContentRecord>(
    repository: &ContentRepository<S>,
    limit: usize,
) -> Vec<T> {
    match repository
        .fetch_all::<T>(&QueryFilter::default(), &QueryOptions::limit(limit))
        .await
    {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(collection = T::COLLECTION, "Error loading home section: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentStore;
    use serde_json::json;

    fn store() -> InMemoryContentStore {
        InMemoryContentStore::from_json(json!({
            "faq": [
                {"_id": "f1", "question": "Q1"},
                {"_id": "f2", "question": "Q2", "isFeatured": true},
                {"_id": "f3", "question": "Q3"},
                {"_id": "f4", "question": "Q4", "isFeatured": true}
            ],
            "blogposts": [
                {"_id": "b1"}, {"_id": "b2"}, {"_id": "b3"}, {"_id": "b4"}
            ],
            "testimonials": [
                {"_id": "t1", "clientName": "Priya"},
                {"_id": "t2", "clientName": "Sam"}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_sections() {
        let mut page = HomePage::new(ContentRepository::new(store()));
        assert!(page.is_loading());
        page.load().await;
        assert!(!page.is_loading());

        let faq_ids: Vec<&str> = page.faqs().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(faq_ids, vec!["f2", "f4"]);

        let post_ids: Vec<&str> = page.latest_posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(post_ids, vec!["b1", "b2", "b3"]);

        // nothing featured, so the first ones are shown
        assert_eq!(page.testimonials().len(), 2);
    }

    #[tokio::test]
    async fn test_sections_fail_independently() {
        let store = store();
        store.set_unavailable("faq", true);
        let mut page = HomePage::new(ContentRepository::new(store));
        page.load().await;
        assert!(!page.is_loading());
        assert!(page.faqs().is_empty());
        assert_eq!(page.latest_posts().len(), 3);
    }

    #[test]
    fn test_featured_or_first() {
        let faq = |id: &str, featured: Option<bool>| Faq {
            id: id.to_string(),
            created_date: None,
            updated_date: None,
            question: None,
            answer: None,
            category: None,
            is_featured: featured,
            last_updated: None,
        };

        let chosen = featured_or_first(vec![faq("1", None), faq("2", Some(false))], 1);
        assert_eq!(chosen, vec![faq("1", None)]);

        let chosen = featured_or_first(
            vec![faq("1", None), faq("2", Some(true)), faq("3", Some(true))],
            6,
        );
        assert_eq!(chosen, vec![faq("2", Some(true)), faq("3", Some(true))]);

        assert!(featured_or_first(Vec::<Faq>::new(), 6).is_empty());
    }
}
