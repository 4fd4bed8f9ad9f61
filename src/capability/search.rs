//! Web search provider (Tavily), restricted to YouTube results.

use crate::error::{GranskeError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// One search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

/// Trait for web search providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>>;
}

/// Tavily search client scoped to YouTube video pages.
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: String,
}

impl TavilySearch {
    /// Create a client from the `TAVILY_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY")
            .map_err(|_| GranskeError::Config("TAVILY_API_KEY not set".to_string()))?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>> {
        let body = json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
            "include_domains": ["https://www.youtube.com/"],
            "exclude_domains": [
                "https://www.youtube.com/shorts",
                "https://www.youtube.com/playlist"
            ],
        });

        let response = self
            .client
            .post(TAVILY_ENDPOINT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GranskeError::Search(format!(
                "Tavily returned status {}",
                response.status()
            )));
        }

        let parsed: TavilyResponse = response.json().await?;
        Ok(parsed.results)
    }
}

/// Render hits the way agents consume them: one markdown block per result.
pub fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| {
            format!(
                "### {}\n- URL: {}\n- Content: {}\n",
                hit.title, hit.url, hit.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}
