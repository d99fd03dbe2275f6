//! Generative-language HTTP backend.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::service::{InsightBackend, InsightError, InsightResult};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Backend calling the `generateContent` endpoint.
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiBackend {
    /// Create a backend for the given credential, model and base URL.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> InsightResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| InsightError::Backend(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

impl InsightBackend for GeminiBackend {
    fn generate(&self, prompt: &str) -> InsightResult<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.model, "calling generateContent");
        let response = self
            .client
            .post(self.url())
            .header(USER_AGENT, concat!("agrotech/", env!("CARGO_PKG_VERSION")))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .map_err(|e| InsightError::Backend(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| InsightError::Backend(e.to_string()))?;
        if !status.is_success() {
            return Err(InsightError::Backend(format!("HTTP {status}")));
        }

        extract_text(&text)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(json: &str) -> InsightResult<String> {
    let response: GenerateResponse = serde_json::from_str(json)?;
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .ok_or_else(|| InsightError::InvalidFormat("response has no candidates".into()))?;

    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        return Err(InsightError::InvalidFormat("candidate has no text".into()));
    }
    Ok(text)
}
