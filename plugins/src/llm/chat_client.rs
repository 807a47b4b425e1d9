use serde::{Deserialize, Serialize};
use tasksift_core::api::{preview_body, LlmError, LlmErrorKind};

fn from_reqwest(err: reqwest::Error, url: String) -> LlmError {
    let kind = if err.is_timeout() {
        LlmErrorKind::Timeout
    } else if err.is_connect() {
        LlmErrorKind::Connect
    } else if err.is_request() {
        LlmErrorKind::Request
    } else if err.is_body() {
        LlmErrorKind::Body
    } else if err.is_decode() {
        LlmErrorKind::Decode
    } else {
        LlmErrorKind::Unknown
    };
    let message = err.to_string();
    let mut out = LlmError::new(kind, message).with_url(url);
    if let Some(status) = err.status() {
        out = out.with_status(status.as_u16());
    }
    out.with_source(err)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Minimal OpenAI-compatible chat-completion client (Groq, OpenAI, vLLM...).
#[derive(Clone)]
pub struct ChatClient {
    api_key: String,
    http: reqwest::Client,
    model: String,
    temperature: f32,
    url_completions: String,
}

impl ChatClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: f32,
        timeout_ms: Option<u64>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let http = builder.build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            api_key,
            http,
            model,
            temperature,
            url_completions: format!("{}/chat/completions", normalized),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system + one user message and returns the first choice's text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let url = &self.url_completions;
        tracing::debug!(
            target: "tasksift.llm",
            stage = "llm.http.complete.in",
            url = %url,
            model = %self.model,
            temperature = self.temperature,
            user_len = user.len()
        );

        let payload = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| from_reqwest(err, url.clone()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| from_reqwest(err, url.clone()))?;

        if !status.is_success() {
            return Err(LlmError::status_error(status.as_u16(), url.clone(), &body));
        }

        let envelope: ChatResponse = serde_json::from_str(&body).map_err(|err| {
            let message = format!(
                "failed to decode response body: {} | body={}",
                err,
                preview_body(&body)
            );
            LlmError::new(LlmErrorKind::Decode, message)
                .with_status(status.as_u16())
                .with_url(url.clone())
                .with_source(err)
        })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                LlmError::new(LlmErrorKind::Empty, "response has no message content")
                    .with_status(status.as_u16())
                    .with_url(url.clone())
            })?;

        tracing::debug!(
            target: "tasksift.llm",
            stage = "llm.http.complete.out",
            status = %status,
            content_len = content.len()
        );
        Ok(content)
    }
}
