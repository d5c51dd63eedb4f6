//! Client-session capture logic for the motivation app.
//!
//! The browser wires speech recognition, `fetch` and an audio element
//! together with callbacks mutating shared state.  This module re-expresses
//! that flow as an explicit state machine: the host shim converts callbacks
//! into [`CaptureEvent`]s, hands them to [`CaptureSession::apply`], and
//! executes the returned [`CaptureEffect`]s.  Transcription capture stays
//! decoupled from network orchestration, and every transition is unit
//! testable without a browser.
//!
//! # Quick start
//!
//! ```rust
//! use mood_motivator::capture::{CaptureEffect, CaptureEvent, CaptureSession};
//!
//! let mut session = CaptureSession::new();
//!
//! let effects = session.apply(CaptureEvent::ToggleMic);
//! assert_eq!(effects, vec![CaptureEffect::StartRecognition]);
//!
//! session.apply(CaptureEvent::RecognitionStarted);
//! session.apply(CaptureEvent::FinalTranscript("I feel stuck".into()));
//!
//! let effects = session.apply(CaptureEvent::RecognitionEnded);
//! assert_eq!(
//!     effects,
//!     vec![CaptureEffect::RequestMotivation { text: "I feel stuck".into() }]
//! );
//! ```

pub mod events;
pub mod session;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use events::{CaptureEffect, CaptureEvent, RecognitionError};
pub use session::{CapturePhase, CaptureSession, PLAYBACK_RATE};
