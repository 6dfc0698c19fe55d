//! Application configuration. Service credential and endpoint override.
//!
//! The model id and sampling temperature are fixed constants in the Gemini
//! adapter, deliberately not configuration.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Gemini API key. Read from STUDIE_API_KEY. Without it the app runs
    /// against the mock tutor.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL override for the generateContent endpoint (local proxy,
    /// testing). Read from STUDIE_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl AppConfig {
    /// Environment (plus .env) is the entire configuration surface; there is
    /// no config file.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let cfg: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("STUDIE"))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    /// Returns the API key if configured. Reads from config or STUDIE_API_KEY env.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("STUDIE_API_KEY").ok())
    }

    /// Returns the base URL override, if any. Reads from config or STUDIE_API_URL env.
    pub fn api_url(&self) -> Option<String> {
        self.api_url
            .clone()
            .or_else(|| std::env::var("STUDIE_API_URL").ok())
    }

    /// Returns true if the real tutor is configured (API key present).
    pub fn is_tutor_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
