use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{PabuError, Result};
use crate::llm::api::LlmApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    Groq,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

/// Role of a single message in a chat completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in the sequence sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            "groq" => LlmBackend::Groq,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        Self {
            backend,
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    /// Runs a full chat completion over the given message sequence.
    /// Cancelling the token aborts the in-flight request and yields
    /// `LlmCancelled` instead of waiting for the HTTP timeout.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        options: Option<&CompletionOptions>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        if !self.is_available() {
            return Err(PabuError::LlmUnavailable(self.unavailable_reason()));
        }

        let config = self
            .config()
            .ok_or_else(|| PabuError::LlmUnavailable("No config available".to_string()))?;

        let client = LlmApiClient::new(config)?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PabuError::LlmCancelled),
            result = client.chat(messages, options) => result,
        }
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM completion is not implemented yet".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(model: &str) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            api_key: Some("test-key".to_string()),
            base_url: None,
            timeout_secs: 30,
            max_retries: 0,
            temperature: 0.7,
            max_tokens: 2048,
        }
    }

    #[test]
    fn test_backend_detection() {
        let provider = LlmProvider::new(Some(&llm_config("groq/llama-3.1-8b-instant")));
        assert_eq!(provider.backend(), &LlmBackend::Groq);
        assert!(provider.is_available());

        let provider = LlmProvider::new(Some(&llm_config("openai/gpt-4o-mini")));
        assert_eq!(provider.backend(), &LlmBackend::OpenAI);

        let provider = LlmProvider::new(None);
        assert!(!provider.is_available());
    }

    #[test]
    fn test_unknown_provider_without_base_url_is_unavailable() {
        let provider = LlmProvider::new(Some(&llm_config("mystery-model")));
        assert!(!provider.is_available());
    }

    #[test]
    fn test_unknown_provider_with_base_url_is_openai_compatible() {
        let mut config = llm_config("mystery-model");
        config.base_url = Some("http://llm.internal:8080/v1".to_string());

        let provider = LlmProvider::new(Some(&config));
        assert_eq!(
            provider.backend(),
            &LlmBackend::OpenAICompatible {
                base_url: "http://llm.internal:8080/v1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_chat_cancelled_before_start() {
        let provider = LlmProvider::new(Some(&llm_config("openai/gpt-4o-mini")));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = provider
            .chat(&[ChatMessage::user("hello")], None, &cancel)
            .await;
        assert!(matches!(result, Err(PabuError::LlmCancelled)));
    }

    #[tokio::test]
    async fn test_chat_unavailable() {
        let provider = LlmProvider::unavailable("no model configured");
        let cancel = CancellationToken::new();

        let result = provider
            .chat(&[ChatMessage::user("hello")], None, &cancel)
            .await;
        assert!(matches!(result, Err(PabuError::LlmUnavailable(_))));
    }
}
