//! Application entry point — Mood Motivator service.
//!
//! # Startup sequence
//!
//! 1. Load `.env` if present (development convenience).
//! 2. Initialise logging.
//! 3. Build [`AppConfig`] from the environment; missing provider
//!    credentials abort startup here rather than failing per-request.
//! 4. Construct the provider clients ([`GeminiGenerator`],
//!    [`ElevenLabsSynthesizer`]) with their per-request timeouts.
//! 5. Wire the router around the injected [`MotivationServices`].
//! 6. Bind the listener and serve until the process is stopped.

use std::sync::Arc;

use tokio::net::TcpListener;

use mood_motivator::{
    config::AppConfig,
    llm::{GeminiGenerator, QuoteGenerator},
    server::{self, MotivationServices},
    tts::{ElevenLabsSynthesizer, SpeechSynthesizer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment file (ignored when absent; real env vars win).
    dotenvy::dotenv().ok();

    // 2. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Mood Motivator starting up");

    // 3. Configuration — refuses to start without provider credentials.
    let config = AppConfig::from_env()?;

    // 4. Provider clients
    let generator: Arc<dyn QuoteGenerator> = Arc::new(GeminiGenerator::from_config(&config.llm));
    let synthesizer: Arc<dyn SpeechSynthesizer> =
        Arc::new(ElevenLabsSynthesizer::from_config(&config.tts));

    // 5. Router with injected service handles
    let services = MotivationServices {
        generator,
        synthesizer,
    };
    let app = server::router(services);

    // 6. Serve
    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
