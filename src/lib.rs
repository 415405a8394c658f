pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SiteConfig;

pub use adapters::{HttpContentStore, InMemoryContentStore};
pub use crate::core::{
    detail::{DetailOutcome, DetailResolver},
    filter::{CategoryFilter, ListFilter},
    repository::ContentRepository,
};
pub use domain::model::{BlogPost, ContentRecord, Document, Faq, Service, Testimonial};
pub use domain::ports::ContentStore;
pub use utils::error::{ContentError, Result};
