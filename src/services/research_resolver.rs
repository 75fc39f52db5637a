use std::sync::Arc;

use crate::configuration::ResearchSettings;
use crate::domain::{Company, CompletionResponse, ResearchOutcome, Strategy};
use crate::services::{video_id, ContentFetcher, SearchProvider, Summarizer};

/// Works through an ordered list of research strategies for one company and
/// stops at the first extracted fact. Candidate urls within a strategy are
/// taken in search-ranking order, so the same inputs resolve the same way
/// every run.
pub struct StrategyResolver {
    search_provider: Arc<dyn SearchProvider>,
    content_fetcher: Arc<dyn ContentFetcher>,
    summarizer: Arc<dyn Summarizer>,
    settings: ResearchSettings,
}

impl StrategyResolver {
    pub fn new(
        search_provider: Arc<dyn SearchProvider>,
        content_fetcher: Arc<dyn ContentFetcher>,
        summarizer: Arc<dyn Summarizer>,
        settings: ResearchSettings,
    ) -> Self {
        StrategyResolver {
            search_provider,
            content_fetcher,
            summarizer,
            settings,
        }
    }

    pub async fn resolve(&self, company: &Company, strategies: &[Strategy]) -> ResearchOutcome {
        let domain = company.root_domain();

        for strategy in strategies {
            let query = match strategy.render_query(&company.name, domain.as_deref()) {
                Some(query) => query,
                None => {
                    log::debug!(
                        "Skipping strategy for {}: query needs a domain",
                        company.name
                    );
                    continue;
                }
            };

            log::info!("Searching: {}", query);
            let results = match self.search_provider.search(&query).await {
                Ok(results) => results,
                Err(e) => {
                    log::error!("Search failed for query {}: {:?}", query, e);
                    continue;
                }
            };
            if results.is_empty() {
                log::info!("No results for query: {}", query);
                continue;
            }

            for candidate in results.iter().take(self.settings.top_result_count) {
                let content = match video_id(&candidate.url) {
                    Some(id) => self.content_fetcher.fetch_transcript(&id).await,
                    None => self.content_fetcher.fetch_page(&candidate.url).await,
                };
                let content = match content {
                    Some(content) => content,
                    None => continue,
                };

                if content.chars().count() < self.settings.min_content_length {
                    log::info!("Content too thin at {}, skipping", candidate.url);
                    continue;
                }

                match self
                    .summarizer
                    .extract(&strategy.extraction_prompt, &content)
                    .await
                {
                    CompletionResponse::Text(fact)
                        if fact.chars().count() > self.settings.min_fact_length =>
                    {
                        log::info!("Found fact for {} at {}", company.name, candidate.url);
                        return ResearchOutcome::resolved(fact, candidate.url.clone());
                    }
                    CompletionResponse::Text(_) => {
                        log::info!("Fact too short from {}, skipping", candidate.url);
                    }
                    CompletionResponse::Refusal => {
                        log::info!("Model found nothing at {}", candidate.url);
                    }
                    CompletionResponse::Error(e) => {
                        log::error!("Extraction failed at {}: {}", candidate.url, e);
                    }
                }
            }
        }

        ResearchOutcome::unresolved()
    }
}
