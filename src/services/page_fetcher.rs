use std::time::Duration;

use async_trait::async_trait;
use fake_user_agent::get_rua;
use scraper::{Html, Selector};
use url::Url;

const PAGE_TEXT_MAX_CHARS: usize = 15_000;
const TRANSCRIPT_MAX_CHARS: usize = 7_000;

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Plain text of a web page, None on any failure.
    async fn fetch_page(&self, url: &str) -> Option<String>;

    /// Flattened caption text of a video, None on any failure.
    async fn fetch_transcript(&self, video_id: &str) -> Option<String>;
}

pub struct WebFetcher {
    client: reqwest::Client,
}

impl WebFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to build fetcher http client");

        WebFetcher { client }
    }

    async fn get_text(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).header("User-Agent", get_rua()).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Fetch failed for {}: {:?}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::error!("Fetch got status {} for {}", response.status(), url);
            return None;
        }

        match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                log::error!("Failed to read body from {}: {:?}", url, e);
                None
            }
        }
    }
}

impl Default for WebFetcher {
    fn default() -> Self {
        WebFetcher::new()
    }
}

#[async_trait]
impl ContentFetcher for WebFetcher {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        let html = self.get_text(url).await?;
        extract_body_text(&html)
    }

    async fn fetch_transcript(&self, video_id: &str) -> Option<String> {
        let url = format!("https://video.google.com/timedtext?lang=en&v={}", video_id);
        let xml = self.get_text(&url).await?;
        flatten_transcript(&xml)
    }
}

/// Extracts the video id when the url points at a video platform we can
/// transcribe; page urls return None. Recognizes `youtube.com/watch?v=` and
/// `youtu.be/` forms.
pub fn video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;

    if host == "youtu.be" {
        return parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string());
    }

    if host.ends_with("youtube.com") {
        return parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.to_string())
            .filter(|id| !id.is_empty());
    }

    None
}

/// Visible text of the `<body>`, one line per text node, capped. None when
/// there is no body or it carries no text.
pub fn extract_body_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").unwrap();

    let body = document.select(&body_selector).next()?;
    let text: Vec<&str> = body
        .text()
        .map(|node| node.trim())
        .filter(|node| !node.is_empty())
        .collect();

    match text.is_empty() {
        true => None,
        false => Some(truncate_chars(&text.join("\n"), PAGE_TEXT_MAX_CHARS)),
    }
}

/// Joins the `<text>` caption elements of a timedtext document into one
/// plain-text string, capped.
pub fn flatten_transcript(xml: &str) -> Option<String> {
    let document = Html::parse_fragment(xml);
    let text_selector = Selector::parse("text").unwrap();

    let parts: Vec<String> = document
        .select(&text_selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|part| !part.is_empty())
        .collect();

    match parts.is_empty() {
        true => None,
        false => Some(truncate_chars(&parts.join(" "), TRANSCRIPT_MAX_CHARS)),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
