//! Capture-session state machine.
//!
//! [`CaptureSession`] re-expresses the browser-side capture flow as a
//! single reducer: every capability callback and network continuation
//! becomes a [`CaptureEvent`], and [`CaptureSession::apply`] answers with
//! the [`CaptureEffect`]s the host shim must perform.  The state machine
//! transitions are:
//!
//! ```text
//! Idle ──toggle──▶ Listening
//!                  ──capture ends, transcript non-empty──▶ Transcribed
//!                  ──capture ends, transcript empty─────▶ Idle
//!                  ──capability error────────────────────▶ Error
//! Transcribed ──request dispatched──▶ Loading
//! Loading ──response──▶ Result        (audio autoplays, slightly slowed)
//!         ──failure───▶ Error
//! Result / Error ──toggle──▶ Listening   (previous state cleared)
//! ```
//!
//! The microphone control is disabled while `Loading`, so exactly one
//! motivation request can be in flight per capture session.

use crate::capture::events::{CaptureEffect, CaptureEvent};
use crate::llm::Motivation;

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

/// Playback rate for the returned audio (slightly below natural speed).
pub const PLAYBACK_RATE: f32 = 0.8;

// ---------------------------------------------------------------------------
// CapturePhase
// ---------------------------------------------------------------------------

/// Phases of one capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    /// Waiting for the user to press the microphone control.
    Idle,
    /// The capability is capturing; transcript segments accumulate.
    Listening,
    /// Capture ended with text; the motivation request is about to go out.
    Transcribed,
    /// The motivation request is in flight.  The control is disabled.
    Loading,
    /// A quote and its audio are on display; audio is replayable.
    Result,
    /// A capability or request failure.  The user may retry.
    Error,
}

impl Default for CapturePhase {
    fn default() -> Self {
        CapturePhase::Idle
    }
}

// ---------------------------------------------------------------------------
// CaptureSession
// ---------------------------------------------------------------------------

/// State of one capture session, mutated only through [`apply`].
///
/// [`apply`]: CaptureSession::apply
#[derive(Debug, Clone)]
pub struct CaptureSession {
    phase: CapturePhase,
    /// Whether the host environment offers speech recognition at all.
    supported: bool,
    /// Accumulated finalized transcript for this capture.
    transcript: String,
    /// Latest provisional segment; replaced on every update.
    interim: String,
    /// The pair decoded from the response headers, once available.
    motivation: Option<Motivation>,
    /// User-facing message when `phase` is `Error` (or support is missing).
    error: Option<String>,
    /// Whether a playable audio resource is currently held.
    audio_held: bool,
}

impl CaptureSession {
    /// New session in a host that supports speech recognition.
    pub fn new() -> Self {
        Self {
            phase: CapturePhase::Idle,
            supported: true,
            transcript: String::new(),
            interim: String::new(),
            motivation: None,
            error: None,
            audio_held: false,
        }
    }

    /// New session in a host *without* speech recognition: the control is
    /// permanently disabled and an explanatory message is set.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            error: Some(
                "Your browser doesn't support speech recognition. Try Chrome or Edge.".into(),
            ),
            ..Self::new()
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }

    pub fn motivation(&self) -> Option<&Motivation> {
        self.motivation.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a playable audio resource is held (replay is possible).
    pub fn audio_held(&self) -> bool {
        self.audio_held
    }

    /// Whether the microphone control reacts to a press.
    ///
    /// Disabled while a request is in flight and when the capability is
    /// missing altogether.
    pub fn mic_enabled(&self) -> bool {
        self.supported && self.phase != CapturePhase::Loading
    }

    /// UI caption for the current state.
    pub fn status_line(&self) -> &'static str {
        if !self.supported {
            return "Voice input not supported";
        }
        match self.phase {
            CapturePhase::Listening => "Listening...",
            CapturePhase::Transcribed | CapturePhase::Loading => "Finding inspiration...",
            CapturePhase::Idle | CapturePhase::Result | CapturePhase::Error => {
                if self.transcript.is_empty() {
                    "Click the mic to speak"
                } else {
                    "Click to speak again"
                }
            }
        }
    }

    // ── Reducer ────────────────────────────────────────────────────────────

    /// Advance the session by one event, returning the effects to execute.
    pub fn apply(&mut self, event: CaptureEvent) -> Vec<CaptureEffect> {
        match event {
            CaptureEvent::ToggleMic => self.on_toggle(),

            CaptureEvent::RecognitionStarted => {
                self.phase = CapturePhase::Listening;
                Vec::new()
            }

            CaptureEvent::PartialTranscript(text) => {
                if self.phase == CapturePhase::Listening {
                    self.interim = text;
                }
                Vec::new()
            }

            CaptureEvent::FinalTranscript(text) => {
                if self.phase == CapturePhase::Listening {
                    self.transcript.push_str(&text);
                    self.interim.clear();
                }
                Vec::new()
            }

            CaptureEvent::RecognitionEnded => self.on_recognition_ended(),

            CaptureEvent::RecognitionFailed(err) => {
                self.error = Some(err.user_message());
                self.phase = CapturePhase::Error;
                Vec::new()
            }

            CaptureEvent::RequestDispatched => {
                if self.phase == CapturePhase::Transcribed {
                    self.phase = CapturePhase::Loading;
                    return self.release_audio();
                }
                Vec::new()
            }

            CaptureEvent::MotivationReady(motivation) => {
                if self.phase != CapturePhase::Loading {
                    // Stale response; the user already moved on.
                    return Vec::new();
                }
                self.motivation = Some(motivation);
                self.audio_held = true;
                self.error = None;
                self.phase = CapturePhase::Result;
                vec![CaptureEffect::PlayAudio {
                    rate: PLAYBACK_RATE,
                }]
            }

            CaptureEvent::MotivationFailed { message } => {
                if self.phase == CapturePhase::Loading {
                    self.error = Some(message);
                    self.motivation = None;
                    self.audio_held = false;
                    self.phase = CapturePhase::Error;
                }
                Vec::new()
            }

            CaptureEvent::Replay => {
                if self.audio_held {
                    vec![CaptureEffect::PlayAudio {
                        rate: PLAYBACK_RATE,
                    }]
                } else {
                    Vec::new()
                }
            }
        }
    }

    // ── Transition helpers ─────────────────────────────────────────────────

    fn on_toggle(&mut self) -> Vec<CaptureEffect> {
        if !self.mic_enabled() {
            return Vec::new();
        }

        if self.phase == CapturePhase::Listening {
            // Finalization continues until RecognitionEnded arrives.
            return vec![CaptureEffect::StopRecognition];
        }

        // Fresh capture: everything from the previous round is cleared.
        let mut effects = self.release_audio();
        self.transcript.clear();
        self.interim.clear();
        self.motivation = None;
        self.error = None;
        effects.push(CaptureEffect::StartRecognition);
        effects
    }

    fn on_recognition_ended(&mut self) -> Vec<CaptureEffect> {
        if self.phase != CapturePhase::Listening {
            // A failure already routed the session to Error; ending the
            // capture must not fire a request on top of it.
            return Vec::new();
        }

        self.interim.clear();
        let text = self.transcript.trim();
        if text.is_empty() {
            self.phase = CapturePhase::Idle;
            return Vec::new();
        }

        self.phase = CapturePhase::Transcribed;
        vec![CaptureEffect::RequestMotivation {
            text: text.to_string(),
        }]
    }

    fn release_audio(&mut self) -> Vec<CaptureEffect> {
        if self.audio_held {
            self.audio_held = false;
            vec![CaptureEffect::ReleaseAudio]
        } else {
            Vec::new()
        }
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
