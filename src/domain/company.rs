use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Company {
    pub name: String,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
}

impl Company {
    /// Root domain of the company website: scheme and `www.` stripped,
    /// lowercased. None when there is no website or it does not parse.
    pub fn root_domain(&self) -> Option<String> {
        let website = self.website_url.as_deref()?.trim();
        if website.is_empty() {
            return None;
        }

        let normalized = match website.starts_with("http://") || website.starts_with("https://") {
            true => website.to_string(),
            false => format!("https://{}", website),
        };

        let parsed = Url::parse(&normalized).ok()?;
        let host = parsed.host_str()?;
        let host = host.strip_prefix("www.").unwrap_or(host);

        Some(host.to_lowercase())
    }
}
