//! Configuration for the motivation service.
//!
//! Everything comes from the process environment, read once at startup.
//! The three provider credentials are *required*: a process that cannot
//! reach both providers refuses to initialise instead of degrading
//! per-request, so [`AppConfig::from_env`] returns an error that `main`
//! turns into a startup failure.
//!
//! [`AppConfig::from_lookup`] takes the variable lookup as a closure so
//! tests can build configurations without touching the process
//! environment.

use anyhow::{bail, Result};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Production endpoint of the Google Generative Language API.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Production endpoint of the ElevenLabs API.
const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Model used for quote generation unless `GEMINI_MODEL` overrides it.
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
/// Multilingual ElevenLabs model used for synthesis.
const DEFAULT_TTS_MODEL: &str = "eleven_multilingual_v2";
/// Output encoding requested from ElevenLabs: MP3, 44.1 kHz, 128 kbit/s.
const DEFAULT_OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Listen address unless `BIND_ADDR` overrides it.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Per-request timeout for the generation call.
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
/// Per-request timeout for the synthesis call (audio downloads are slower).
const DEFAULT_TTS_TIMEOUT_SECS: u64 = 60;

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the Gemini quote-generation client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the Generative Language API.  Defaults to the production
    /// endpoint; tests point it at a local mock server.
    pub base_url: String,
    /// API key, sent as the `key` query parameter.
    pub api_key: String,
    /// Model identifier (e.g. `"gemini-1.5-flash"`).
    pub model: String,
    /// Maximum seconds to wait for a generation response.
    pub timeout_secs: u64,
}

// ---------------------------------------------------------------------------
// TtsConfig
// ---------------------------------------------------------------------------

/// Settings for the ElevenLabs speech-synthesis client.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Base URL of the ElevenLabs API.  Defaults to the production endpoint.
    pub base_url: String,
    /// API key, sent as the `xi-api-key` header.
    pub api_key: String,
    /// Voice identifier the quote is spoken with.
    pub voice_id: String,
    /// Synthesis model identifier.
    pub model_id: String,
    /// Audio encoding requested from the provider.
    pub output_format: String,
    /// Maximum seconds to wait for the synthesis response.
    pub timeout_secs: u64,
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds to (`host:port`).
    pub bind_addr: String,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Quote-generation (Gemini) settings.
    pub llm: LlmConfig,
    /// Speech-synthesis (ElevenLabs) settings.
    pub tts: TtsConfig,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when any of `GEMINI_API_KEY`, `ELEVENLABS_API_KEY` or
    /// `ELEVENLABS_VOICE_ID` is absent or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    /// (useful for tests).
    ///
    /// Recognised variables:
    ///
    /// | Variable              | Required | Default                  |
    /// |-----------------------|----------|--------------------------|
    /// | `GEMINI_API_KEY`      | yes      |                          |
    /// | `ELEVENLABS_API_KEY`  | yes      |                          |
    /// | `ELEVENLABS_VOICE_ID` | yes      |                          |
    /// | `GEMINI_MODEL`        | no       | `gemini-1.5-flash`       |
    /// | `BIND_ADDR`           | no       | `0.0.0.0:3000`           |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let llm = LlmConfig {
            base_url: GEMINI_BASE_URL.into(),
            api_key: require(&lookup, "GEMINI_API_KEY")?,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        };

        let tts = TtsConfig {
            base_url: ELEVENLABS_BASE_URL.into(),
            api_key: require(&lookup, "ELEVENLABS_API_KEY")?,
            voice_id: require(&lookup, "ELEVENLABS_VOICE_ID")?,
            model_id: DEFAULT_TTS_MODEL.into(),
            output_format: DEFAULT_OUTPUT_FORMAT.into(),
            timeout_secs: DEFAULT_TTS_TIMEOUT_SECS,
        };

        let server = ServerConfig {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
        };

        Ok(Self { server, llm, tts })
    }
}

/// Fetch a required variable; a blank value counts as missing.
fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("missing required environment variable {key}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
