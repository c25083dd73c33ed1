//! Gemini `generateContent` REST client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{InsightError, Summarizer};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
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

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Concatenated text parts of the first candidate, if any is non-blank.
fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

impl GeminiClient {
    /// A blank `api_key` counts as missing.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, prompt: &str) -> Result<String, InsightError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("gemini api key not configured");
            return Err(InsightError::MissingCredential);
        };

        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        tracing::debug!(model = %self.model, "requesting gemini summary");
        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| InsightError::Transport(err.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<ErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => "provider error".to_string(),
            };
            tracing::error!(%status, %message, "gemini request failed");
            return Err(transport(status, &message));
        }

        let response = resp
            .json::<GenerateResponse>()
            .await
            .map_err(|err| InsightError::Transport(err.to_string()))?;
        first_candidate_text(response).ok_or(InsightError::EmptyResponse)
    }
}

fn transport(status: StatusCode, message: &str) -> InsightError {
    InsightError::Transport(format!("{status}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let response = parse(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"Keep "},{"text":"saving."}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        );
        assert_eq!(first_candidate_text(response).as_deref(), Some("Keep saving."));
    }

    #[test]
    fn blank_or_missing_text_is_empty() {
        assert_eq!(first_candidate_text(parse(r#"{}"#)), None);
        assert_eq!(first_candidate_text(parse(r#"{"candidates":[{}]}"#)), None);
        assert_eq!(
            first_candidate_text(parse(
                r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#
            )),
            None
        );
    }

    #[test]
    fn url_includes_model() {
        let client = GeminiClient::new(Client::new(), None)
            .with_base_url("http://localhost:8080/")
            .with_model("gemini-test");
        assert_eq!(
            client.url(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(Client::new(), Some("   ".to_string()))
            .with_base_url("http://127.0.0.1:9");
        assert!(!client.has_credential());
        assert_eq!(
            client.summarize("prompt").await,
            Err(InsightError::MissingCredential)
        );
    }
}
