// Adapters layer: concrete content stores behind the ContentStore port.

pub mod http;
pub mod memory;

pub use http::HttpContentStore;
pub use memory::InMemoryContentStore;
