//! Core `QuoteGenerator` trait and `GeminiGenerator` implementation.
//!
//! `GeminiGenerator` calls the Google Generative Language REST API
//! (`models/{model}:generateContent`).  Connection details come from
//! [`LlmConfig`]; sampling parameters and safety thresholds are fixed per
//! process and live in this module as constants.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::LlmConfig;

// ---------------------------------------------------------------------------
// Generation constants
// ---------------------------------------------------------------------------

/// Sampling temperature for quote generation.
const TEMPERATURE: f64 = 0.7;
/// Top-k sampling cutoff.
const TOP_K: u32 = 1;
/// Nucleus sampling cutoff.
const TOP_P: f64 = 1.0;
/// Upper bound on the generated answer length.
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Harm categories filtered on every request.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
/// Moderate blocking threshold applied to every category.
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

// ---------------------------------------------------------------------------
// LlmError
// ---------------------------------------------------------------------------

/// Errors that can occur during quote generation.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("quote generation timed out")]
    Timeout,

    /// The provider answered with a non-success status.  `body` is kept
    /// verbatim so the caller can surface it for diagnostics.
    #[error("provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// The provider returned a response with no usable candidate text.
    #[error("provider returned no candidate text")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// QuoteGenerator trait
// ---------------------------------------------------------------------------

/// Async trait for LLM-backed quote generation.
///
/// Implementors must be `Send + Sync` so they can be shared across request
/// handlers behind an `Arc<dyn QuoteGenerator>`.
///
/// `generate` returns the model's *raw* answer text; turning it into a
/// quote/role-model pair is [`crate::llm::parse_motivation`]'s job, so the
/// fallback policy stays out of the transport layer.
#[async_trait]
pub trait QuoteGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

// Compile-time assertion: Box<dyn QuoteGenerator> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn QuoteGenerator>) {}
};

// ---------------------------------------------------------------------------
// GeminiGenerator
// ---------------------------------------------------------------------------

/// Calls `POST {base}/v1beta/models/{model}:generateContent`.
///
/// The API key travels as the `key` query parameter, which is how the
/// Generative Language API authenticates non-OAuth callers.
pub struct GeminiGenerator {
    client: reqwest::Client,
    config: LlmConfig,
}

impl GeminiGenerator {
    /// Build a `GeminiGenerator` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn request_body(prompt: &str) -> Value {
        let safety_settings: Vec<Value> = SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({ "category": category, "threshold": SAFETY_THRESHOLD }))
            .collect();

        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature":     TEMPERATURE,
                "topK":            TOP_K,
                "topP":            TOP_P,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
            "safetySettings": safety_settings,
        })
    }
}

#[async_trait]
impl QuoteGenerator for GeminiGenerator {
    /// Submit `prompt` and return the first candidate's text, trimmed.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or(LlmError::EmptyResponse)?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn make_config(base_url: &str) -> LlmConfig {
        LlmConfig {
            base_url: base_url.into(),
            api_key: "test-key".into(),
            model: "gemini-1.5-flash".into(),
            timeout_secs: 5,
        }
    }

    fn candidate_response(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] }
            }]
        })
        .to_string()
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _generator = GeminiGenerator::from_config(&make_config("http://localhost:9"));
    }

    /// Verify that `GeminiGenerator` is usable as `dyn QuoteGenerator`.
    #[test]
    fn generator_is_object_safe() {
        let config = make_config("http://localhost:9");
        let generator: Box<dyn QuoteGenerator> = Box::new(GeminiGenerator::from_config(&config));
        drop(generator);
    }

    #[tokio::test]
    async fn success_returns_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(candidate_response("{\"quote\": \"Q\", \"roleModel\": \"R\"}"))
            .create_async()
            .await;

        let generator = GeminiGenerator::from_config(&make_config(&server.url()));
        let text = generator.generate("some prompt").await.unwrap();

        assert_eq!(text, "{\"quote\": \"Q\", \"roleModel\": \"R\"}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn request_carries_fixed_generation_config() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 1,
                    "topP": 1.0,
                    "maxOutputTokens": 2048,
                }
            })))
            .with_status(200)
            .with_body(candidate_response("ok"))
            .create_async()
            .await;

        let generator = GeminiGenerator::from_config(&make_config(&server.url()));
        generator.generate("p").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn request_carries_all_four_safety_categories() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(json!({
                "safetySettings": [
                    { "category": "HARM_CATEGORY_HARASSMENT",
                      "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_HATE_SPEECH",
                      "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT",
                      "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_DANGEROUS_CONTENT",
                      "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                ]
            })))
            .with_status(200)
            .with_body(candidate_response("ok"))
            .create_async()
            .await;

        let generator = GeminiGenerator::from_config(&make_config(&server.url()));
        generator.generate("p").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn request_embeds_prompt_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "the exact prompt" }] }]
            })))
            .with_status(200)
            .with_body(candidate_response("ok"))
            .create_async()
            .await;

        let generator = GeminiGenerator::from_config(&make_config(&server.url()));
        generator.generate("the exact prompt").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_surfaces_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body("API key not valid")
            .create_async()
            .await;

        let generator = GeminiGenerator::from_config(&make_config(&server.url()));
        let err = generator.generate("p").await.unwrap_err();

        match err {
            LlmError::Api { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn response_without_candidates_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let generator = GeminiGenerator::from_config(&make_config(&server.url()));
        let err = generator.generate("p").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn non_json_success_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let generator = GeminiGenerator::from_config(&make_config(&server.url()));
        let err = generator.generate("p").await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_request_error() {
        // Nothing listens on this port.
        let config = make_config("http://127.0.0.1:1");
        let generator = GeminiGenerator::from_config(&config);

        let err = generator.generate("p").await.unwrap_err();
        assert!(matches!(err, LlmError::Request(_)));
    }
}
