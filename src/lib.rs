//! Mood Motivator — a voice-driven motivation service.
//!
//! The user says how they feel; the service asks an LLM for a matching
//! motivational quote and role model, synthesizes the quote into speech,
//! and hands the audio back for playback.
//!
//! # Architecture
//!
//! ```text
//! capture::CaptureSession            server::generate_motivation
//! (client state machine)             (POST /api/generate-motivation)
//!        │                                     │
//!        │  RequestMotivation { text }         ├─ llm::build_prompt
//!        └────────── HTTP POST ───────────────▶├─ llm::QuoteGenerator  (Gemini)
//!                                              ├─ llm::parse_motivation (typed fallback)
//!                                              ├─ tts::SpeechSynthesizer (ElevenLabs)
//!        ◀───── audio/mpeg + X-Quote ──────────┘
//!        MotivationReady → autoplay
//! ```
//!
//! The two provider calls are strictly sequential per request; nothing is
//! persisted, and nothing outlives a request beyond the injected service
//! handles in [`server::MotivationServices`].

pub mod capture;
pub mod config;
pub mod llm;
pub mod server;
pub mod tts;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use capture::{CaptureEffect, CaptureEvent, CapturePhase, CaptureSession};
pub use config::AppConfig;
pub use llm::{Motivation, QuoteOutcome};
pub use server::MotivationServices;
