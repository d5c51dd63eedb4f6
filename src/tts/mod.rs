//! Speech synthesis for the motivation service.
//!
//! This module provides:
//! * [`SpeechSynthesizer`] — async trait implemented by synthesis backends.
//! * [`ElevenLabsSynthesizer`] — ElevenLabs streaming REST implementation.
//! * [`TtsError`] — error variants for the synthesis call.

pub mod synthesizer;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use synthesizer::{ElevenLabsSynthesizer, SpeechSynthesizer, TtsError};
