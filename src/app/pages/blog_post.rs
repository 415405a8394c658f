use crate::core::detail::{DetailOutcome, DetailResolver};
use crate::core::ContentStore;
use crate::domain::model::BlogPost;

pub const NOT_FOUND_TITLE: &str = "Article Not Found";
pub const NOT_FOUND_MESSAGE: &str =
    "The article you're looking for doesn't exist or has been removed.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Found {
        post: BlogPost,
        related: Vec<BlogPost>,
    },
    NotFound,
}

impl DetailState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

impl From<DetailOutcome<BlogPost>> for DetailState {
    fn from(outcome: DetailOutcome<BlogPost>) -> Self {
        match outcome {
            DetailOutcome::Found { record, related } => Self::Found {
                post: record,
                related,
            },
            DetailOutcome::NotFound => Self::NotFound,
        }
    }
}

/// Identifies one load request. A response is applied only while its ticket
/// is still the page's current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    id: String,
    generation: u64,
}

impl LoadTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Article page: `Loading -> Found | NotFound` per requested id.
///
/// Requests are not cancelled when the id changes. Instead each request
/// carries a [`LoadTicket`], and [`BlogPostPage::complete`] drops any
/// response whose ticket has been superseded.
pub struct BlogPostPage<S: ContentStore> {
    resolver: DetailResolver<S>,
    current: Option<LoadTicket>,
    generation: u64,
    state: DetailState,
}

impl<S: ContentStore> BlogPostPage<S> {
    pub fn new(resolver: DetailResolver<S>) -> Self {
        Self {
            resolver,
            current: None,
            generation: 0,
            state: DetailState::Loading,
        }
    }

    pub fn resolver(&self) -> &DetailResolver<S> {
        &self.resolver
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(LoadTicket::id)
    }

    /// Starts a request for `id`, moving the page back to `Loading`.
    pub fn begin(&mut self, id: &str) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            id: id.to_string(),
            generation: self.generation,
        };
        self.current = Some(ticket.clone());
        self.state = DetailState::Loading;
        ticket
    }

    /// Applies a resolved outcome. Returns false, leaving the state alone,
    /// when the ticket is stale or its request already finished.
    pub fn complete(&mut self, ticket: &LoadTicket, outcome: DetailOutcome<BlogPost>) -> bool {
        if self.current.as_ref() != Some(ticket) {
            tracing::debug!(id = ticket.id(), "Discarding stale article response");
            return false;
        }
        if self.state.is_terminal() {
            return false;
        }
        self.state = outcome.into();
        true
    }

    pub async fn load(&mut self, id: &str) -> &DetailState {
        let ticket = self.begin(id);
        let outcome = self.resolver.resolve::<BlogPost>(id).await;
        self.complete(&ticket, outcome);
        &self.state
    }
}
