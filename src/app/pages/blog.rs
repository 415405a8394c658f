use crate::core::filter::{CategoryFilter, ListFilter};
use crate::core::repository::ContentRepository;
use crate::core::ContentStore;
use crate::domain::model::{BlogPost, ALL_CATEGORIES};
use std::borrow::Cow;

pub const DEFAULT_BLOG_CATEGORIES: [&str; 5] =
    [ALL_CATEGORIES, "Breastfeeding", "Postpartum", "Nutrition", "Baby Care"];

pub const NO_RESULTS_MESSAGE: &str = "No articles found. Try adjusting your search or filters.";

pub const FEATURED_EXCERPT_CHARS: usize = 200;
pub const LISTING_EXCERPT_CHARS: usize = 150;

/// Leading `max_chars` characters of a post body, with `...` appended when
/// the body was cut.
pub fn excerpt(content: &str, max_chars: usize) -> Cow<'_, str> {
    match content.char_indices().nth(max_chars) {
        Some((end, _)) => Cow::Owned(format!("{}...", &content[..end])),
        None => Cow::Borrowed(content),
    }
}

/// Blog listing: the fetched posts plus the current category and search
/// selection. The displayed list is derived on every read.
pub struct BlogPage<S: ContentStore> {
    repository: ContentRepository<S>,
    posts: Vec<BlogPost>,
    filter: ListFilter,
    categories: Vec<String>,
    loading: bool,
}

impl<S: ContentStore> BlogPage<S> {
    pub fn new(repository: ContentRepository<S>) -> Self {
        Self {
            repository,
            posts: Vec::new(),
            filter: ListFilter::default(),
            categories: DEFAULT_BLOG_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            loading: true,
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Fetches every post. A failed fetch leaves the listing empty.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.repository.list::<BlogPost>().await {
            Ok(posts) => {
                tracing::debug!("Loaded {} blog posts", posts.len());
                self.posts = posts;
            }
            Err(e) => {
                tracing::error!("Error loading blog posts: {}", e);
                self.posts = Vec::new();
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn select_category(&mut self, category: &str) {
        self.filter.category = CategoryFilter::from(category);
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.to_string();
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// First post as delivered. Hidden while a category or query narrows
    /// the listing.
    pub fn featured(&self) -> Option<&BlogPost> {
        if !self.filter.is_unconstrained() {
            return None;
        }
        self.posts.first()
    }

    pub fn filtered(&self) -> Vec<&BlogPost> {
        self.filter.apply(&self.posts)
    }

    /// True once loaded when nothing matches; the page then shows
    /// [`NO_RESULTS_MESSAGE`].
    pub fn shows_no_results(&self) -> bool {
        !self.loading && self.filtered().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentStore;
    use serde_json::json;

    fn store() -> InMemoryContentStore {
        InMemoryContentStore::from_json(json!({
            "blogposts": [
                {"_id": "1", "title": "Latch basics", "category": "Breastfeeding"},
                {"_id": "2", "title": "Iron-rich foods", "category": "Nutrition"}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_filtering_follows_selection() {
        let mut page = BlogPage::new(ContentRepository::new(store()));
        assert!(page.is_loading());
        page.load().await;
        assert!(!page.is_loading());
        assert_eq!(page.filtered().len(), 2);
        assert_eq!(page.featured().map(|p| p.id.as_str()), Some("1"));

        page.select_category("Nutrition");
        let ids: Vec<&str> = page.filtered().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        page.select_category(ALL_CATEGORIES);
        page.set_query("LATCH");
        let ids: Vec<&str> = page.filtered().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);

        page.select_category("Nutrition");
        assert!(page.shows_no_results());
        // source collection is never narrowed
        assert_eq!(page.posts().len(), 2);
    }

    #[tokio::test]
    async fn test_featured_hidden_while_filtered() {
        let mut page = BlogPage::new(ContentRepository::new(store()));
        page.load().await;
        assert_eq!(page.featured().map(|p| p.id.as_str()), Some("1"));

        page.select_category("Nutrition");
        assert!(page.featured().is_none());

        page.select_category(ALL_CATEGORIES);
        page.set_query("iron");
        assert!(page.featured().is_none());

        page.set_query("");
        assert_eq!(page.featured().map(|p| p.id.as_str()), Some("1"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("Short note", LISTING_EXCERPT_CHARS), "Short note");
        let body = "é".repeat(250);
        let cut = excerpt(&body, FEATURED_EXCERPT_CHARS);
        assert_eq!(cut.chars().count(), FEATURED_EXCERPT_CHARS + 3);
        assert!(cut.ends_with("é..."));
        assert_eq!(excerpt("abcdef", 6), "abcdef");
        assert_eq!(excerpt("abcdefg", 6), "abcdef...");
    }

    #[tokio::test]
    async fn test_failed_load_degrades_to_empty() {
        let store = store();
        store.set_unavailable("blogposts", true);
        let mut page = BlogPage::new(ContentRepository::new(store));
        page.load().await;
        assert!(!page.is_loading());
        assert!(page.posts().is_empty());
        assert!(page.featured().is_none());
        assert!(page.shows_no_results());
    }

    #[test]
    fn test_default_categories() {
        let page = BlogPage::new(ContentRepository::new(InMemoryContentStore::new()));
        assert_eq!(page.categories()[0], ALL_CATEGORIES);
        assert_eq!(page.categories().len(), 5);
        assert_eq!(page.filter().category, CategoryFilter::All);
    }
}
