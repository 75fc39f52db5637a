pub mod apify_search;
pub mod openai_client;
pub mod outreach_pipeline;
pub mod page_fetcher;
pub mod research_cache;
pub mod research_resolver;

#[cfg(test)]
pub mod test_stubs;

pub use apify_search::*;
pub use openai_client::*;
pub use outreach_pipeline::*;
pub use page_fetcher::*;
pub use research_cache::*;
pub use research_resolver::*;
