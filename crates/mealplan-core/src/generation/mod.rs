//! Plan generation through a generative text model.
//!
//! The model is an opaque capability behind the [`PlanModel`] trait: it takes
//! a system instruction plus a prompt and returns free-form text. Turning that
//! text into plan candidates is the job of [`extract`], which is kept apart so
//! the heuristic can be tightened without touching validation.
//!
//! Calls are made at most once; retry policy belongs to the caller, which can
//! tell transient failures ([`MealPlanError::Transport`]) from fatal ones.

use async_trait::async_trait;
use log::{debug, info};

use crate::{
    config::ModelSettings,
    error::{MealPlanError, Result},
    prompt::SYSTEM_INSTRUCTION,
};

pub mod extract;
pub mod openai;

pub use extract::extract_plan;
pub use openai::OpenAiClient;

/// A single completion request sent to the generative capability.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier, e.g. `gpt-4.1-mini`
    pub model: String,
    /// System instruction framing the conversation
    pub system: String,
    /// User prompt produced by [`crate::prompt::build_prompt`]
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Builds a request using the planner's system instruction.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: prompt.into(),
            temperature,
        }
    }
}

/// Text-completion capability used to generate plans.
///
/// Implementations report failures as [`MealPlanError::Configuration`],
/// [`MealPlanError::AccessDenied`] or [`MealPlanError::Transport`] and must
/// not retry internally.
#[async_trait]
pub trait PlanModel: Send + Sync {
    /// Sends one completion request and returns the raw response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Sends `prompt` to the configured model once and returns the raw text.
///
/// Fails with [`MealPlanError::Configuration`] before any network traffic
/// when no API key is configured.
pub async fn generate(prompt: &str, settings: &ModelSettings) -> Result<String> {
    let client = OpenAiClient::new(settings.clone())?;
    let request = CompletionRequest::new(settings.model.clone(), prompt, settings.temperature);

    info!("Requesting plan from model {}", request.model);
    let raw = client.complete(&request).await?;
    debug!("Model returned {} bytes", raw.len());
    Ok(raw)
}

/// Convenience check used by callers that want to fail before building a
/// prompt when credentials are missing.
pub fn require_api_key(settings: &ModelSettings) -> Result<&str> {
    settings
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| MealPlanError::Configuration {
            message: "OPENAI_API_KEY is not configured. Set it in your environment or .env file."
                .to_string(),
        })
}
