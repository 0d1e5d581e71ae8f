use std::fmt;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;
use llm::error::LLMError;
use thiserror::Error;

pub const MODEL: &str = "gpt-4o-mini";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 900;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompletionError {
    #[error("client setup failed: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider returned error: {0}")]
    Upstream(String),
}

/// A text-completion service. One call, one system instruction, one user
/// message, raw text back.
#[async_trait]
pub trait CompletionClient: Send + Sync + fmt::Debug {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError>;

    fn model_name(&self) -> &str;
}

#[derive(Clone)]
pub struct CompletionSettings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: MODEL.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

impl fmt::Debug for CompletionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// OpenAI chat completions through the `llm` crate.
#[derive(Debug)]
pub struct LlmClient {
    settings: CompletionSettings,
}

impl LlmClient {
    pub fn new(settings: CompletionSettings) -> Self {
        Self { settings }
    }
}

fn map_llm_error(err: LLMError) -> CompletionError {
    match err {
        LLMError::HttpError(msg) => CompletionError::Transport(msg),
        other => CompletionError::Upstream(other.to_string()),
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError> {
        let llm = LLMBuilder::new()
            .backend(LLMBackend::OpenAI)
            .api_key(&self.settings.api_key)
            .model(&self.settings.model)
            .system(system)
            .temperature(self.settings.temperature)
            .max_tokens(self.settings.max_tokens)
            .build()
            .map_err(|e| CompletionError::Config(format!("build LLM: {e}")))?;

        let messages = vec![ChatMessage::user().content(prompt).build()];

        let response = llm.chat(&messages).await.map_err(map_llm_error)?;

        match response.text() {
            Some(text) => Ok(text),
            None => {
                tracing::warn!(model = %self.settings.model, "completion returned no text");
                Ok(String::new())
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

/// Deterministic client for tests. Replies are matched by prompt substring
/// (case-insensitive), falling back to the default reply.
#[derive(Debug, Default)]
pub struct FakeClient {
    replies: Vec<(String, Result<String, CompletionError>)>,
    default_reply: Option<Result<String, CompletionError>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_reply = Some(Ok(response.to_string()));
        self
    }

    pub fn with_default_error(mut self, error: CompletionError) -> Self {
        self.default_reply = Some(Err(error));
        self
    }

    pub fn with_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.replies
            .push((prompt_contains.to_lowercase(), Ok(response.to_string())));
        self
    }

    /// Every user prompt received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CompletionClient for FakeClient {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let prompt_lower = prompt.to_lowercase();
        if let Some((_, reply)) = self
            .replies
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
        {
            return reply.clone();
        }

        match &self.default_reply {
            Some(reply) => reply.clone(),
            None => Err(CompletionError::Transport(format!(
                "FakeClient: no response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
