//! HTTP surface of the motivation service.
//!
//! One route, one handler: `POST /api/generate-motivation`
//! ([`motivation::generate_motivation`]).  The provider clients are not
//! process-wide singletons; they are constructed once in `main`, wrapped
//! in [`MotivationServices`], and injected into the handler through axum
//! state, so tests swap in doubles without touching any global.

pub mod motivation;

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::llm::QuoteGenerator;
use crate::tts::SpeechSynthesizer;

// ---------------------------------------------------------------------------
// MotivationServices
// ---------------------------------------------------------------------------

/// Provider handles shared by all requests.
///
/// Cheap to clone (two `Arc` clones); axum clones it per request.
#[derive(Clone)]
pub struct MotivationServices {
    /// Quote/role-model generation backend.
    pub generator: Arc<dyn QuoteGenerator>,
    /// Speech-synthesis backend.
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}

/// Build the application router around the injected services.
pub fn router(services: MotivationServices) -> Router {
    Router::new()
        .route(
            "/api/generate-motivation",
            post(motivation::generate_motivation),
        )
        .with_state(services)
}
