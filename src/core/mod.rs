pub mod detail;
pub mod filter;
pub mod repository;

pub use crate::domain::model::{ContentRecord, Document, QueryFilter, QueryOptions};
pub use crate::domain::ports::{ConfigProvider, ContentStore};
pub use crate::utils::error::Result;
