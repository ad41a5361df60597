pub mod client;
pub mod types;

pub use client::{ApiClient, API_KEY_HEADER};
pub use types::{Envelope, SearchQuery, Snippet, SnippetPayload};
