use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::outcome::SearchResult;

const NUM_SEARCH_RETRIES: u8 = 3; // Should be > 0
const RETRY_SLEEP_SECS: u64 = 2;
const RESULTS_PER_PAGE: u8 = 5;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Ok with an empty list means "no results", Err means the provider
    /// itself failed. Neither is fatal to the caller.
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>>;
}

/// Google search through the Apify google-search-scraper actor, run
/// synchronously so the dataset items come back in the same response.
pub struct ApifySearch {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload {
    queries: String,
    results_per_page: u8,
    max_pages_per_query: u8,
    mobile_results: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetItem {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    url: Option<String>,
    title: Option<String>,
    description: Option<String>,
}

impl ApifySearch {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to build Apify http client");

        ApifySearch {
            client,
            endpoint: format!(
                "https://api.apify.com/v2/acts/apify~google-search-scraper/run-sync-get-dataset-items?token={}",
                api_key
            ),
        }
    }
}

#[async_trait]
impl SearchProvider for ApifySearch {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>> {
        let payload = SearchPayload {
            queries: query.to_string(),
            results_per_page: RESULTS_PER_PAGE,
            max_pages_per_query: 1,
            mobile_results: false,
        };

        let mut retry_count = 0;

        while retry_count < NUM_SEARCH_RETRIES {
            match self.client.post(&self.endpoint).json(&payload).send().await {
                Ok(res) => match res.status().is_success() {
                    true => {
                        let body = res.text().await.unwrap_or_default();
                        match parse_dataset_items(&body) {
                            Ok(results) => {
                                log::info!("Found {} organic results for query: {}", results.len(), query);
                                return Ok(results);
                            }
                            Err(e) => {
                                log::error!("Failed to parse Apify dataset items: {:?}", e);
                                retry_count += 1;
                            }
                        }
                    }
                    false => {
                        log::error!(
                            "Apify answered with status {} on query: {}",
                            res.status(),
                            query
                        );
                        retry_count += 1;
                    }
                },
                Err(e) => {
                    log::error!("No response from Apify, error: {:?}", e);
                    retry_count += 1;
                }
            }

            tokio::time::sleep(Duration::from_secs(RETRY_SLEEP_SECS)).await;
        }

        anyhow::bail!("Search failed after {} attempts for query: {}", NUM_SEARCH_RETRIES, query)
    }
}

/// Flattens the actor's dataset items into provider-ranked search results.
/// Entries without a url are dropped.
fn parse_dataset_items(body: &str) -> anyhow::Result<Vec<SearchResult>> {
    let items: Vec<DatasetItem> = serde_json::from_str(body)?;

    Ok(items
        .into_iter()
        .flat_map(|item| item.organic_results)
        .filter_map(|result| {
            result.url.map(|url| SearchResult {
                url,
                title: result.title.unwrap_or_default(),
                snippet: result.description.unwrap_or_default(),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::parse_dataset_items;

    #[test]
    fn parse_dataset_items_flattens_organic_results() {
        let body = r#"[
            {
                "searchQuery": {"term": "\"Acme Robotics\" funding"},
                "organicResults": [
                    {
                        "title": "Acme Robotics raises $12M",
                        "url": "https://news.example.com/acme-series-a",
                        "description": "Acme Robotics announced a $12M Series A."
                    },
                    {
                        "title": "Acme Robotics | About",
                        "url": "https://acme-robotics.com/about",
                        "description": "We build warehouse robots."
                    }
                ]
            }
        ]"#;

        let results = parse_dataset_items(body).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://news.example.com/acme-series-a");
        assert_eq!(results[0].title, "Acme Robotics raises $12M");
        assert_eq!(results[1].snippet, "We build warehouse robots.");
    }

    #[test]
    fn parse_dataset_items_skips_entries_without_url() {
        let body = r#"[
            {
                "organicResults": [
                    {"title": "No link here", "description": "ad slot"},
                    {"url": "https://example.com", "title": "Linked", "description": ""}
                ]
            }
        ]"#;

        let results = parse_dataset_items(body).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://example.com");
    }

    #[test]
    fn parse_dataset_items_handles_missing_organic_results() {
        let results = parse_dataset_items(r#"[{"searchQuery": {"term": "acme"}}]"#).unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn parse_dataset_items_rejects_malformed_payload() {
        assert!(parse_dataset_items("not json").is_err());
    }
}
