//! Research service client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{AiClient, ResearchProvider, ServiceError};
use crate::domain::ai::{ResearchResult, ResearchSource};

const MAX_TOKENS: u32 = 4000;

#[derive(Clone)]
pub struct ResearchClient {
    http: AiClient,
    url: String,
    api_key: Option<String>,
}

impl ResearchClient {
    pub fn new(http: AiClient, url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            url: url.to_string(),
            api_key,
        }
    }
}

#[derive(Serialize)]
struct Request {
    query: String,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct RawSource {
    title: Option<String>,
    url: Option<String>,
}

/// Providers answer with either `text` or `content`.
#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    sources: Vec<RawSource>,
}

fn into_result(query: &str, response: Response) -> ResearchResult {
    ResearchResult {
        query: query.to_string(),
        content: response.text.or(response.content).unwrap_or_default(),
        sources: response
            .sources
            .into_iter()
            .map(|s| ResearchSource {
                title: s.title.unwrap_or_else(|| "Unknown Source".to_string()),
                url: s.url.unwrap_or_else(|| "#".to_string()),
            })
            .collect(),
        fallback: false,
    }
}

#[async_trait]
impl ResearchProvider for ResearchClient {
    #[instrument(skip(self))]
    async fn research(
        &self,
        query: &str,
        request_id: Option<&str>,
    ) -> Result<ResearchResult, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::MissingCredential("Research"))?;

        let req = self.http.post(&self.url, request_id).bearer_auth(api_key);
        let body = Request {
            query: format!(
                "Research the following and create a detailed report of all relevant facts \
                 that could be used in a report on this topic: {}",
                query
            ),
            max_tokens: MAX_TOKENS,
        };

        let response: Response = self.http.send_json(req, &body).await?;
        Ok(into_result(query, response))
    }
}

/// Content used when the research service is unavailable.
pub fn placeholder(query: &str) -> ResearchResult {
    ResearchResult {
        query: query.to_string(),
        content: "This is a placeholder for research content. Live research was unavailable, \
                  so no external findings were used."
            .to_string(),
        sources: vec![
            ResearchSource {
                title: "Sample Source 1".to_string(),
                url: "https://example.com/source1".to_string(),
            },
            ResearchSource {
                title: "Sample Source 2".to_string(),
                url: "https://example.com/source2".to_string(),
            },
        ],
        fallback: true,
    }
}
