//! Events and effects for the speech-capture session.
//!
//! The browser's speech-recognition capability and the audio element are
//! external to this crate; the host shim translates their callbacks into
//! [`CaptureEvent`]s, feeds them to the reducer, and executes whatever
//! [`CaptureEffect`]s come back.

use crate::llm::Motivation;

// ---------------------------------------------------------------------------
// RecognitionError
// ---------------------------------------------------------------------------

/// Categorised failures reported by the speech-recognition capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// The capability heard nothing before giving up.
    NoSpeech,
    /// The microphone failed or produced no usable signal.
    AudioCapture,
    /// The user denied microphone permission.
    NotAllowed,
    /// Anything else, carrying the capability's own description.
    Other(String),
}

impl RecognitionError {
    /// The user-facing message for this failure.
    pub fn user_message(&self) -> String {
        match self {
            RecognitionError::NoSpeech => "No speech was detected. Please try again.".into(),
            RecognitionError::AudioCapture => {
                "Microphone problem. Ensure it's working and permission is granted.".into()
            }
            RecognitionError::NotAllowed => {
                "Permission to use microphone was denied. Please enable it in browser settings."
                    .into()
            }
            RecognitionError::Other(detail) => format!("Error: {detail}"),
        }
    }
}

// ---------------------------------------------------------------------------
// CaptureEvent
// ---------------------------------------------------------------------------

/// Discrete inputs driving [`CaptureSession::apply`].
///
/// [`CaptureSession::apply`]: crate::capture::CaptureSession::apply
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// The user pressed the microphone control.
    ToggleMic,
    /// The capability confirmed that capture began.
    RecognitionStarted,
    /// A provisional transcript segment; replaces the previous one.
    PartialTranscript(String),
    /// A finalized transcript segment; appended to the transcript.
    FinalTranscript(String),
    /// Capture finished (silence, timeout or explicit stop).
    RecognitionEnded,
    /// Capture failed with a categorised error.
    RecognitionFailed(RecognitionError),
    /// The host shim issued the motivation request.
    RequestDispatched,
    /// The motivation response arrived and its audio is playable.
    MotivationReady(Motivation),
    /// The motivation request failed; `message` is user-facing.
    MotivationFailed { message: String },
    /// The user asked to hear the existing audio again.
    Replay,
}

// ---------------------------------------------------------------------------
// CaptureEffect
// ---------------------------------------------------------------------------

/// Side effects the host shim must execute after a reducer step.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEffect {
    /// Start the speech-recognition capability.
    StartRecognition,
    /// Ask the capability to stop and finalize.
    StopRecognition,
    /// Release the currently held audio resource (it was superseded).
    ReleaseAudio,
    /// POST `text` to the motivation endpoint, then report back with
    /// [`CaptureEvent::RequestDispatched`] and eventually
    /// [`CaptureEvent::MotivationReady`] / [`CaptureEvent::MotivationFailed`].
    RequestMotivation { text: String },
    /// Play the held audio at `rate`.  Playback failures (autoplay
    /// restrictions) are logged by the host and are not fed back.
    PlayAudio { rate: f32 },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
