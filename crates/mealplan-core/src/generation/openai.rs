//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{require_api_key, CompletionRequest, PlanModel};
use crate::{
    config::ModelSettings,
    error::{MealPlanError, Result},
};

/// Client for `/chat/completions` on OpenAI or any compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    settings: ModelSettings,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Creates a client, failing with [`MealPlanError::Configuration`] when
    /// no API key is configured.
    pub fn new(settings: ModelSettings) -> Result<Self> {
        let api_key = require_api_key(&settings)?.to_string();
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| MealPlanError::Configuration {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            settings,
            api_key,
            client,
        })
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PlanModel for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.prompt.clone(),
                },
            ],
            temperature: request.temperature,
        };

        let url = self.endpoint();
        debug!("POST {url} (model {})", request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| transport_error(&e))?;

        if !status.is_success() {
            warn!("Model request failed with HTTP {status}");
            debug!("Error body: {text}");
            return Err(classify_status(status, &request.model, &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| MealPlanError::Transport {
            message: format!("Unreadable completion response: {e}"),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| MealPlanError::Transport {
                message: "Completion response contained no message content".to_string(),
            })
    }
}

/// Maps a non-success HTTP status to the error taxonomy.
pub fn classify_status(status: StatusCode, model: &str, body: &str) -> MealPlanError {
    match status {
        StatusCode::UNAUTHORIZED => MealPlanError::Configuration {
            message: format!("The API rejected the configured credentials: {}", error_detail(body)),
        },
        StatusCode::FORBIDDEN => MealPlanError::AccessDenied {
            model: model.to_string(),
        },
        _ => MealPlanError::Transport {
            message: format!("HTTP {}: {}", status.as_u16(), error_detail(body)),
        },
    }
}

fn transport_error(error: &reqwest::Error) -> MealPlanError {
    let message = if error.is_timeout() {
        format!("Model request timed out: {error}")
    } else {
        format!("HTTP request failed: {error}")
    };
    MealPlanError::Transport { message }
}

/// Pulls `error.message` out of an API error body, falling back to the body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.trim().to_string())
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}
