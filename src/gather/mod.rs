//! Gathering real articles from a news-search provider

mod client;
mod gatherer;
mod query;

pub use client::{
    mock_article, GNewsClient, MockSearchClient, NewsSearchClient, ProviderArticle,
    ProviderSource, SearchError,
};
pub use gatherer::Gatherer;
pub use query::{QueryDescriptor, SearchRequest};
