//! LLM rewriter: OpenAI-compatible chat completions over [`Transport`].

use async_trait::async_trait;
use lift_transport::{HeaderMap, HeaderValue, Transport, header};
use serde::{Deserialize, Serialize};

use crate::rewriter::{RewriteError, Rewriter};

/// Model requested when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Completion budget per file.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Instruction sent ahead of every file.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a Java refactoring assistant. \
Extract every string literal into a `public static final String` constant \
declared at the top (after package+imports), and replace usages accordingly. \
Return ONLY the full, compilable refactored source code.";

const ERROR_BODY_PREVIEW_CHARS: usize = 400;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response: choices[0].message.content.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Request options fixed for the whole run.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// Model identifier.
    pub model: String,
    /// Bearer credential, if the endpoint needs one.
    pub api_key: Option<String>,
    /// Instruction message.
    pub system_prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token budget.
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// [`Rewriter`] backed by a chat completions endpoint.
pub struct LlmRewriter {
    transport: Transport,
    options: ChatOptions,
    headers: HeaderMap,
}

impl LlmRewriter {
    /// # Errors
    /// `RewriteError::Credential` when the API key is not a valid header value.
    pub fn new(transport: Transport, options: ChatOptions) -> Result<Self, RewriteError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if let Some(key) = options.api_key.as_deref().filter(|key| !key.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|error| RewriteError::Credential(error.to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(Self {
            transport,
            options,
            headers,
        })
    }

    fn encode(&self, source: &str) -> Result<Vec<u8>, RewriteError> {
        let body = ChatCompletionRequest {
            model: &self.options.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.options.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: source,
                },
            ],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };
        Ok(serde_json::to_vec(&body)?)
    }
}

#[async_trait]
impl Rewriter for LlmRewriter {
    async fn rewrite(&self, source: &str) -> Result<String, RewriteError> {
        let body = self.encode(source)?;
        let response = self.transport.send(&body, &self.headers).await?;
        extract_content(&response)
    }
}

/// Pull `choices[0].message.content` out of a completions response body.
///
/// Only the first choice is considered, whatever the others say.
///
/// # Errors
/// `RewriteError::Schema` for anything that is not JSON of that shape.
pub fn extract_content(body: &str) -> Result<String, RewriteError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|error| {
        RewriteError::Schema(format!("{error}; body: {}", preview(body)))
    })?;
    let choice = parsed
        .choices
        .and_then(|choices| choices.into_iter().next())
        .ok_or_else(|| RewriteError::Schema(format!("no choices; body: {}", preview(body))))?;
    choice
        .message
        .and_then(|message| message.content)
        .ok_or_else(|| {
            RewriteError::Schema(format!(
                "first choice has no message content; body: {}",
                preview(body)
            ))
        })
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(ERROR_BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
