//! Configuration values passed explicitly into the pipeline components.

use std::{env, time::Duration};

use log::debug;

pub const DEFAULT_MODEL_NAME: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

/// Settings for the generative model client.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// API key; checked before any request is attempted
    pub api_key: Option<String>,
    /// Model identifier sent with each request
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Upper bound for one model call
    pub timeout: Duration,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ModelSettings {
    /// Reads settings from the process environment, loading a `.env` file
    /// first when one is present.
    ///
    /// Recognised variables: `OPENAI_API_KEY`, `MODEL_NAME`,
    /// `OPENAI_BASE_URL` and `MODEL_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: non_empty("OPENAI_API_KEY"),
            model: non_empty("MODEL_NAME").unwrap_or(defaults.model),
            base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            timeout: non_empty("MODEL_TIMEOUT_SECS")
                .and_then(|secs| secs.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            temperature: defaults.temperature,
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
