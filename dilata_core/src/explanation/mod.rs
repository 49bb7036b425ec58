//! # Explanations
//!
//! Asking a language model to explain the current experiment.
//!
//! - [`prompt`] - Turns the experiment and a question into prompt text
//! - [`sequence`] - Generation tokens so only the latest answer is shown
//! - [`gemini`] - [`ExplanationService`] backed by the Gemini REST API
//!
//! The service is a trait so front ends receive it already configured and
//! tests can substitute a fake. Requests are single shot: no retry.

pub mod prompt;
pub mod sequence;

#[cfg(feature = "gemini")]
pub mod gemini;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{LabError, LabResult};

pub use prompt::{build_prompt, build_request, DEFAULT_QUESTION};
pub use sequence::{ExplanationSlot, ExplanationStatus, RequestSequencer, RequestTicket};

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;

/// Model used when the config file does not name one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Gemini REST API
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Transport timeout applied by the HTTP client
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Persona and language policy sent with every request
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "\
Eres un tutor de física experto y amigable que acompaña a estudiantes del primer curso \
de Física en la universidad. Explica los conceptos de forma clara, concisa y atractiva, \
con analogías sencillas, y relaciona siempre tu respuesta con los datos del experimento \
que aparecen en el mensaje del estudiante. Puedes tener un humor seco, pero nunca \
sacrifiques la corrección. No uses asteriscos ni formato Markdown. \
Responde siempre en español.";

/// Future returned by an [`ExplanationService`]
pub type ExplanationFuture = Pin<Box<dyn Future<Output = LabResult<String>> + Send + 'static>>;

/// One request to the explanation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationRequest {
    /// Experiment context plus the student's question
    pub prompt: String,
    /// Persona and response-language policy
    pub system_instruction: String,
}

impl ExplanationRequest {
    pub fn new(prompt: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        ExplanationRequest {
            prompt: prompt.into(),
            system_instruction: system_instruction.into(),
        }
    }
}

/// External text generator that answers questions about the experiment.
///
/// The returned future owns everything it needs, so callers can hand it to
/// a background executor and keep handling input while it runs.
pub trait ExplanationService: Send + Sync {
    fn generate_explanation(&self, request: ExplanationRequest) -> ExplanationFuture;
}

impl<T: ExplanationService + ?Sized> ExplanationService for Arc<T> {
    fn generate_explanation(&self, request: ExplanationRequest) -> ExplanationFuture {
        (**self).generate_explanation(request)
    }
}

/// Model and transport settings for explanation requests.
///
/// ## TOML Example
///
/// ```toml
/// [explanation]
/// model = "gemini-2.5-flash"
/// request_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationSettings {
    pub model: String,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub system_instruction: String,
}

impl Default for ExplanationSettings {
    fn default() -> Self {
        ExplanationSettings {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl ExplanationSettings {
    pub fn validate(&self) -> LabResult<()> {
        if self.model.trim().is_empty() {
            return Err(LabError::invalid_input(
                "explanation.model",
                "",
                "Model name must not be empty",
            ));
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(LabError::invalid_input(
                "explanation.endpoint",
                self.endpoint.clone(),
                "Endpoint must be an http(s) URL",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(LabError::invalid_input(
                "explanation.request_timeout_secs",
                "0",
                "Timeout must be at least one second",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl ExplanationService for Echo {
        fn generate_explanation(&self, request: ExplanationRequest) -> ExplanationFuture {
            Box::pin(async move { Ok(request.prompt) })
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = ExplanationSettings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.system_instruction.contains("español"));
    }

    #[test]
    fn test_invalid_settings() {
        let no_model = ExplanationSettings {
            model: " ".to_string(),
            ..ExplanationSettings::default()
        };
        assert!(no_model.validate().is_err());

        let no_timeout = ExplanationSettings {
            request_timeout_secs: 0,
            ..ExplanationSettings::default()
        };
        assert!(no_timeout.validate().is_err());

        let bad_endpoint = ExplanationSettings {
            endpoint: "generativelanguage.googleapis.com".to_string(),
            ..ExplanationSettings::default()
        };
        assert!(bad_endpoint.validate().is_err());
    }

    #[tokio::test]
    async fn test_service_behind_arc() {
        let service: Arc<dyn ExplanationService> = Arc::new(Echo);
        let answer = service
            .generate_explanation(ExplanationRequest::new("hola", "sys"))
            .await
            .unwrap();
        assert_eq!(answer, "hola");
    }
}
