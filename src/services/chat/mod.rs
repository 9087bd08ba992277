//! Dashboard assistant
//!
//! Forwards a user question to a completion provider with a fixed system
//! prompt. The call is bounded by `chat.timeout_secs`.

mod client;
mod gemini;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use ts_rs::TS;

pub use client::CompletionClient;
pub use gemini::GeminiClient;

use crate::config::ChatConfig;
use crate::errors::{LessonLinkerError, Result};
use crate::storage::models::TS_EXPORT_PATH;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ChatInput {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ChatReply {
    pub reply: String,
}

pub struct ChatService {
    client: Option<Arc<dyn CompletionClient>>,
    system_prompt: String,
    fallback_reply: String,
    timeout: Duration,
}

impl ChatService {
    pub fn new(client: Option<Arc<dyn CompletionClient>>, config: &ChatConfig) -> Self {
        Self {
            client,
            system_prompt: config.system_prompt.clone(),
            fallback_reply: config.fallback_reply.clone(),
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }

    /// Build the service with the Gemini client when an API key is configured
    pub fn from_config(config: &ChatConfig) -> Self {
        let client: Option<Arc<dyn CompletionClient>> = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                info!("Chat assistant enabled (model: {})", config.model);
                Some(Arc::new(GeminiClient::new(config, key.trim())))
            }
            _ => {
                warn!("Chat assistant has no API key configured; /api/chat will fail");
                None
            }
        };
        Self::new(client, config)
    }

    pub async fn reply(&self, message: Option<&str>) -> Result<ChatReply> {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| LessonLinkerError::validation("Message is required"))?;

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| LessonLinkerError::upstream("Chat API key is not configured"))?;

        let outcome =
            tokio::time::timeout(self.timeout, client.complete(&self.system_prompt, message))
                .await;

        match outcome {
            Ok(Ok(Some(reply))) => Ok(ChatReply { reply }),
            Ok(Ok(None)) => Ok(ChatReply {
                reply: self.fallback_reply.clone(),
            }),
            Ok(Err(e)) => {
                error!("{} completion failed: {}", client.name(), e);
                match e {
                    LessonLinkerError::Upstream(_) => Err(e),
                    other => Err(LessonLinkerError::upstream(other.message().to_string())),
                }
            }
            Err(_) => {
                error!(
                    "{} completion timed out after {}s",
                    client.name(),
                    self.timeout.as_secs()
                );
                Err(LessonLinkerError::upstream(format!(
                    "Completion timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}
