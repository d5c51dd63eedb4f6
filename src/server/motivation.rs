//! `POST /api/generate-motivation` — the motivation endpoint.
//!
//! Request orchestration is strictly sequential: validate the input, ask
//! the generator for a quote/role-model pair, substitute a fallback pair
//! when the answer is unusable, synthesize the (now guaranteed valid)
//! quote, and answer with the audio bytes.  The quote and role model ride
//! along in URL-encoded `X-Quote` / `X-RoleModel` headers because the body
//! is binary.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::MotivationServices;
use crate::llm::{build_prompt, parse_motivation, FallbackReason, Motivation};

/// Fixed message for every input-validation failure.
const VALIDATION_MESSAGE: &str = "Input text is required and must be a non-empty string.";

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Error half of the handler: renders as `{"error": "<message>"}` JSON.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Wrap an upstream failure for the 500 path.  The provider error's
/// `Display` already carries any structured response body, so the whole
/// thing lands in the diagnostic message.
fn upstream_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::internal(format!("Failed to generate motivation. Details: {err}"))
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Generate a motivational quote for the posted text and speak it.
///
/// * `200` — body is `audio/mpeg`, `X-Quote`/`X-RoleModel` carry the
///   URL-encoded pair the audio was synthesized from.
/// * `400` — the body had no usable `text` field; no upstream call made.
/// * `500` — a provider call failed; the error body carries diagnostics.
pub async fn generate_motivation(
    State(services): State<MotivationServices>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let text = validate_request(&body)?;

    log::info!("generating motivation for {} chars of input", text.len());

    let prompt = build_prompt(&text);
    let raw = services.generator.generate(&prompt).await.map_err(|e| {
        log::error!("quote generation failed: {e}");
        upstream_error(e)
    })?;

    let outcome = parse_motivation(&raw);
    match outcome.fallback_reason() {
        Some(FallbackReason::InvalidJson) => {
            log::warn!("generator answer was not JSON; substituting parse-failure pair");
        }
        Some(FallbackReason::MissingFields) => {
            log::warn!("generator answer lacked quote/roleModel; substituting structural pair");
        }
        None => {}
    }
    let motivation = outcome.into_motivation();

    // Synthesis starts only after the quote is final (fallbacks included).
    let audio = services
        .synthesizer
        .synthesize(&motivation.quote)
        .await
        .map_err(|e| {
            log::error!("speech synthesis failed: {e}");
            upstream_error(e)
        })?;

    log::info!(
        "motivation ready: {} audio bytes for \"{}\"",
        audio.len(),
        motivation.role_model
    );

    audio_response(&motivation, audio)
}

/// Extract a non-empty `text` string from the request body.
///
/// Malformed JSON, a missing `text` key, a non-string value and a
/// blank-after-trim string all collapse into the same fixed 400.
fn validate_request(body: &[u8]) -> Result<String, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::bad_request(VALIDATION_MESSAGE))?;

    match value.get("text").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ApiError::bad_request(VALIDATION_MESSAGE)),
    }
}

/// Assemble the success response: audio body plus metadata headers.
fn audio_response(motivation: &Motivation, audio: Vec<u8>) -> Result<Response, ApiError> {
    // Percent-encoding keeps the values header-safe regardless of what the
    // model put in the quote.
    let quote = encode_header_value(&motivation.quote)?;
    let role_model = encode_header_value(&motivation.role_model)?;

    let mut response = (StatusCode::OK, audio).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
    headers.insert(HeaderName::from_static("x-quote"), quote);
    headers.insert(HeaderName::from_static("x-rolemodel"), role_model);

    Ok(response)
}

fn encode_header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&urlencoding::encode(value))
        .map_err(|e| ApiError::internal(format!("Failed to encode response header: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
