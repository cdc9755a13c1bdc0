use super::{ChatCompleter, http_client};
use crate::config::ChatConfig;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const SYSTEM_PROMPT: &str = "You are an expert plant pathologist and horticulturist. \
Provide accurate, practical advice about plant diseases, care, watering, fertilizing, \
pest control, and general plant health. Keep responses concise but informative, \
focusing on actionable solutions.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

pub struct ChatClient {
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    http: reqwest::blocking::Client,
}

impl ChatClient {
    pub fn new(cfg: &ChatConfig) -> AppResult<Self> {
        Ok(Self {
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            http: http_client()?,
        })
    }
}

impl ChatCompleter for ChatClient {
    fn complete(&self, user_message: &str) -> AppResult<String> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Remote("chat API key is not configured".into()));
        }

        let req = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        let body: ChatResponse = serde_json::from_str(&text).unwrap_or_default();

        if let Some(err) = body.error {
            return Err(AppError::Remote(format!("chat {}: {}", status, err.message)));
        }
        if !status.is_success() {
            return Err(AppError::Remote(format!("chat {}: {}", status, text)));
        }

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::Remote("chat completion returned no choices".into()))
    }
}
