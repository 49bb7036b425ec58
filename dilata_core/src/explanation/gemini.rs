//! Gemini `generateContent` client.
//!
//! Sends one request per explanation. Any failure (network, HTTP status,
//! API error body, missing text) becomes [`LabError::ExternalService`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ApiKey, AppConfig};
use crate::errors::{LabError, LabResult};
use crate::explanation::{ExplanationFuture, ExplanationRequest, ExplanationService, ExplanationSettings};

/// Current library version (from Cargo.toml)
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Content {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// [`ExplanationService`] that calls the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: ApiKey,
    settings: ExplanationSettings,
}

impl GeminiClient {
    /// Create a client with an explicit credential and settings
    pub fn new(api_key: ApiKey, settings: ExplanationSettings) -> LabResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("Dilata/{}", CURRENT_VERSION))
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| LabError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(GeminiClient {
            http,
            api_key,
            settings,
        })
    }

    /// Create a client from the loaded application config
    pub fn from_config(config: &AppConfig) -> LabResult<Self> {
        Self::new(config.api_key.clone(), config.explanation.clone())
    }

    pub fn settings(&self) -> &ExplanationSettings {
        &self.settings
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model.trim()
        )
    }
}

impl ExplanationService for GeminiClient {
    fn generate_explanation(&self, request: ExplanationRequest) -> ExplanationFuture {
        let http = self.http.clone();
        let url = self.url();
        let api_key = self.api_key.expose().to_string();
        let body = request_body(&request);

        Box::pin(async move {
            let response = http
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| LabError::external_service(format!("error de red: {}", e)))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| LabError::external_service(format!("no se pudo leer la respuesta: {}", e)))?;

            if !status.is_success() {
                return Err(api_error(status.as_u16(), &text));
            }

            parse_response(&text)
        })
    }
}

fn request_body(request: &ExplanationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content::text(None, &request.system_instruction),
        contents: vec![Content::text(Some("user"), &request.prompt)],
    }
}

/// Extract the answer text from a successful response body
fn parse_response(body: &str) -> LabResult<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LabError::external_service(format!("respuesta con formato inválido: {}", e)))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("la solicitud fue bloqueada ({})", r))
            .unwrap_or_else(|| "la respuesta no contiene candidatos".to_string());
        return Err(LabError::external_service(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = match candidate.finish_reason {
            Some(finish) => format!("respuesta vacía (finishReason: {})", finish),
            None => "respuesta vacía".to_string(),
        };
        return Err(LabError::external_service(reason));
    }

    Ok(text)
}

/// Map a non-success HTTP response to an error
fn api_error(status: u16, body: &str) -> LabError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => {
            let label = parsed.error.status.unwrap_or_else(|| status.to_string());
            LabError::external_service(format!("{} {}", label, parsed.error.message).trim().to_string())
        }
        Err(_) => LabError::external_service(format!("el servicio respondió con el estado {}", status)),
    }
}
