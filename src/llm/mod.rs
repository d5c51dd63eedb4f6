//! Quote generation for the motivation service.
//!
//! This module provides:
//! * [`QuoteGenerator`] — async trait implemented by generation backends.
//! * [`GeminiGenerator`] — Google Generative Language REST implementation.
//! * [`build_prompt`] — the fixed motivation prompt around the user text.
//! * [`parse_motivation`] / [`QuoteOutcome`] — turning the model's free-form
//!   answer into a guaranteed-usable [`Motivation`], with a typed fallback.
//! * [`LlmError`] — error variants for the generation call.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use mood_motivator::config::AppConfig;
//! use mood_motivator::llm::{build_prompt, parse_motivation, GeminiGenerator, QuoteGenerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::from_env().unwrap();
//!     let generator = GeminiGenerator::from_config(&config.llm);
//!
//!     let prompt = build_prompt("I feel like giving up");
//!     let raw = generator.generate(&prompt).await.unwrap();
//!
//!     // Never fails: substitutes a fixed pair when `raw` is unusable.
//!     let motivation = parse_motivation(&raw).into_motivation();
//!     println!("{} ({})", motivation.quote, motivation.role_model);
//! }
//! ```

pub mod generator;
pub mod parse;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use generator::{GeminiGenerator, LlmError, QuoteGenerator};
pub use parse::{parse_motivation, FallbackReason, Motivation, QuoteOutcome};
pub use prompt::build_prompt;
