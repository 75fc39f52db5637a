/// One ranked hit from the search provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// Answer from a completion model, as a closed set: a usable text, an
/// explicit "nothing relevant found" refusal, or a transport/API failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResponse {
    Text(String),
    Refusal,
    Error(String),
}

/// Terminal result of researching one company. `fact` and `source_url` are
/// present exactly when `found` is true; the constructors keep that so.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchOutcome {
    pub fact: Option<String>,
    pub source_url: Option<String>,
    pub confidence: bool,
    pub found: bool,
}

impl ResearchOutcome {
    pub fn resolved(fact: String, source_url: String) -> Self {
        ResearchOutcome {
            fact: Some(fact),
            source_url: Some(source_url),
            confidence: true,
            found: true,
        }
    }

    pub fn unresolved() -> Self {
        ResearchOutcome {
            fact: None,
            source_url: None,
            confidence: false,
            found: false,
        }
    }
}
