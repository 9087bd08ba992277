//! Gemini `generateContent` client
//!
//! ureq is blocking, so requests run on the blocking thread pool.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{trace, warn};
use ureq::Agent;

use super::client::CompletionClient;
use crate::config::ChatConfig;
use crate::errors::{LessonLinkerError, Result};

pub struct GeminiClient {
    agent: Agent,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &ChatConfig, api_key: &str) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs.max(1))))
            .build()
            .into();

        Self {
            agent,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.api_base.trim_end_matches('/'),
                config.model
            ),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 构造请求体
    pub fn build_request(system_prompt: &str, user_message: &str) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": system_prompt }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": user_message }]
            }]
        })
    }

    /// 取第一个候选的第一段文本
    pub fn extract_text(response: &Value) -> Option<String> {
        response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }

    fn complete_sync(agent: Agent, endpoint: String, api_key: String, body: Value) -> Result<Value> {
        let resp = agent
            .post(&endpoint)
            .header("x-goog-api-key", &api_key)
            .send_json(&body)
            .map_err(|e| {
                warn!("Gemini request failed: {}", e);
                LessonLinkerError::upstream(format!("Gemini request failed: {}", e))
            })?;

        resp.into_body().read_json::<Value>().map_err(|e| {
            warn!("Gemini response parse failed: {}", e);
            LessonLinkerError::upstream(format!("Gemini response parse failed: {}", e))
        })
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<Option<String>> {
        let body = Self::build_request(system_prompt, user_message);
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let api_key = self.api_key.clone();

        let response = tokio::task::spawn_blocking(move || {
            Self::complete_sync(agent, endpoint, api_key, body)
        })
        .await
        .map_err(|e| LessonLinkerError::upstream(format!("Gemini task failed: {}", e)))??;

        let text = Self::extract_text(&response);
        trace!("Gemini returned text: {}", text.is_some());
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
