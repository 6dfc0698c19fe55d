//! Wiring & DI. Entry point: bootstrap adapters, inject into the session, run UI.
//! No business logic here.

use dotenv::dotenv;
use oranje_studie::adapters::ai::{GeminiTutor, MockTutor};
use oranje_studie::adapters::ui::tui::TuiInputPort;
use oranje_studie::ports::{InputPort, TutorPort};
use oranje_studie::shared::config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found (check CWD)"),
    }

    oranje_studie::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();

    let tutor: Arc<dyn TutorPort> = if cfg.is_tutor_configured() {
        info!("Gemini tutor enabled (STUDIE_API_KEY is set)");
        let api_key = cfg.api_key().unwrap_or_default();
        match cfg.api_url() {
            Some(url) => Arc::new(GeminiTutor::with_base_url(api_key, url)),
            None => Arc::new(GeminiTutor::new(api_key)),
        }
    } else {
        warn!("STUDIE_API_KEY not set, using mock tutor");
        Arc::new(MockTutor::new())
    };

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(tutor));

    // --- Run (collect input -> analyze -> present -> reset, until quit) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
