// In-memory stand-ins for the external seams, with call recording so tests
// can assert what was (and was not) reached.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{CompletionResponse, ResearchOutcome, SearchResult};
use crate::services::{ContentFetcher, Personalizer, ResultCache, SearchProvider, Summarizer};

pub struct StubSearch {
    results: HashMap<String, Vec<String>>,
    failures: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl StubSearch {
    pub fn new() -> Self {
        StubSearch {
            results: HashMap::new(),
            failures: HashSet::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_results(mut self, query: &str, urls: Vec<&str>) -> Self {
        self.results
            .insert(query.to_string(), urls.into_iter().map(String::from).collect());
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failures.insert(query.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchResult>> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.failures.contains(query) {
            anyhow::bail!("stubbed provider failure");
        }

        Ok(self
            .results
            .get(query)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|url| SearchResult {
                url,
                title: "stub result".to_string(),
                snippet: String::new(),
            })
            .collect())
    }
}

pub struct StubFetcher {
    pages: HashMap<String, String>,
    transcripts: HashMap<String, String>,
    fetched_pages: Mutex<Vec<String>>,
    fetched_transcripts: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        StubFetcher {
            pages: HashMap::new(),
            transcripts: HashMap::new(),
            fetched_pages: Mutex::new(Vec::new()),
            fetched_transcripts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }

    pub fn with_transcript(mut self, video_id: &str, text: &str) -> Self {
        self.transcripts
            .insert(video_id.to_string(), text.to_string());
        self
    }

    pub fn fetched_pages(&self) -> Vec<String> {
        self.fetched_pages.lock().unwrap().clone()
    }

    pub fn fetched_transcripts(&self) -> Vec<String> {
        self.fetched_transcripts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for StubFetcher {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        self.fetched_pages.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned()
    }

    async fn fetch_transcript(&self, video_id: &str) -> Option<String> {
        self.fetched_transcripts
            .lock()
            .unwrap()
            .push(video_id.to_string());
        self.transcripts.get(video_id).cloned()
    }
}

/// Responses are keyed by the content argument; unknown content gets a
/// refusal.
pub struct StubSummarizer {
    responses: HashMap<String, CompletionResponse>,
    calls: Mutex<Vec<String>>,
}

impl StubSummarizer {
    pub fn new() -> Self {
        StubSummarizer {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, content: &str, response: CompletionResponse) -> Self {
        self.responses.insert(content.to_string(), response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn extract(&self, _prompt: &str, content: &str) -> CompletionResponse {
        self.calls.lock().unwrap().push(content.to_string());
        self.responses
            .get(content)
            .cloned()
            .unwrap_or(CompletionResponse::Refusal)
    }
}

pub struct StubPersonalizer {
    response: CompletionResponse,
    prompts: Mutex<Vec<String>>,
}

impl StubPersonalizer {
    pub fn new() -> Self {
        StubPersonalizer {
            response: CompletionResponse::Text(
                "Hi, loved reading about your latest launch.".to_string(),
            ),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: CompletionResponse) -> Self {
        self.response = response;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Personalizer for StubPersonalizer {
    async fn personalize(&self, prompt: &str) -> CompletionResponse {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone()
    }
}

pub struct MemoryCache {
    entries: Mutex<HashMap<String, ResearchOutcome>>,
    puts: Mutex<Vec<(String, ResearchOutcome)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        MemoryCache {
            entries: Mutex::new(HashMap::new()),
            puts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_entry(self, company_name: &str, outcome: ResearchOutcome) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert(company_name.to_string(), outcome);
        self
    }

    pub fn puts(&self) -> Vec<(String, ResearchOutcome)> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, company_name: &str) -> Option<ResearchOutcome> {
        self.entries.lock().unwrap().get(company_name).cloned()
    }

    async fn put(&self, company_name: &str, outcome: &ResearchOutcome) {
        self.puts
            .lock()
            .unwrap()
            .push((company_name.to_string(), outcome.clone()));
        self.entries
            .lock()
            .unwrap()
            .insert(company_name.to_string(), outcome.clone());
    }
}
