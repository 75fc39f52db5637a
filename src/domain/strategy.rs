use serde::Deserialize;

/// One way of finding a fact about a company: a search query template with
/// `{company}` / `{domain}` placeholders plus the extraction prompt handed to
/// the summarizer for whatever the query turns up. Strategies are tried in
/// the order the operator listed them.
#[derive(Debug, Clone, Deserialize)]
pub struct Strategy {
    pub query_template: String,
    pub extraction_prompt: String,
}

impl Strategy {
    /// Renders the search query for a company. None when the template needs
    /// a `{domain}` and the company has none — the strategy simply does not
    /// apply to that company.
    pub fn render_query(&self, company_name: &str, domain: Option<&str>) -> Option<String> {
        let query = self.query_template.replace("{company}", company_name);

        match query.contains("{domain}") {
            true => domain.map(|domain| query.replace("{domain}", domain)),
            false => Some(query),
        }
    }
}
