//! Chat with the accountability buddy.
//!
//! Each request is the persona instruction, optionally the user's aggregated
//! context as a second system message, and the user's message. Provider
//! failures never reach the caller: they are logged and replaced by the
//! configured fallback reply.

use crate::context::{ContextAggregator, UserContext};
use ascend_config::AppConfig;
use ascend_core::message::Message;
use ascend_core::provider::{Provider, ProviderRequest};
use ascend_data::Repository;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Persona instruction sent as the first system message.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a motivational AI accountability partner. \
Your role is to help users achieve their goals by providing encouragement, advice, \
and accountability. Keep responses concise and actionable.";

/// Reply substituted whenever the completion endpoint fails.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "I'm currently unavailable. Please try again shortly.";

/// Why a message was not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatRejected {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("A message is already being sent")]
    AlreadySending,
}

/// Request parameters for the buddy chat.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system_prompt: String,
    pub fallback_message: String,
    /// Attach the user's context as a second system message.
    pub enriched: bool,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            max_tokens: 150,
            temperature: 0.7,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.into(),
            enriched: true,
        }
    }
}

impl ChatSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.provider.model.clone(),
            max_tokens: config.provider.max_tokens,
            temperature: config.provider.temperature,
            system_prompt: config
                .buddy
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.into()),
            fallback_message: config.buddy.fallback_message.clone(),
            enriched: config.buddy.enriched,
        }
    }

    /// Build the completion request for one user message.
    pub fn build_request(&self, user_message: &str, context: Option<&UserContext>) -> ProviderRequest {
        let mut messages = vec![Message::system(self.system_prompt.as_str())];

        if let Some(context) = context {
            // UserContext holds only strings, numbers and maps, so this cannot fail.
            let json = serde_json::to_string(context).unwrap_or_default();
            messages.push(Message::system(format!("User context: {json}")));
        }

        messages.push(Message::user(user_message));

        ProviderRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        }
    }
}

/// One chat panel: a transcript and at most one message in flight.
pub struct ChatSession {
    provider: Arc<dyn Provider>,
    aggregator: ContextAggregator,
    settings: ChatSettings,
    sending: Mutex<()>,
    transcript: RwLock<Vec<Message>>,
}

impl ChatSession {
    pub fn new(provider: Arc<dyn Provider>, repo: Repository, settings: ChatSettings) -> Self {
        Self {
            provider,
            aggregator: ContextAggregator::new(repo),
            settings,
            sending: Mutex::new(()),
            transcript: RwLock::new(Vec::new()),
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Whether a message is currently in flight.
    pub fn is_sending(&self) -> bool {
        self.sending.try_lock().is_err()
    }

    /// The user and assistant turns so far, oldest first.
    pub async fn transcript(&self) -> Vec<Message> {
        self.transcript.read().await.clone()
    }

    /// Send `message` on behalf of `uid` and return the buddy's reply.
    ///
    /// Blank messages are rejected without a request, as is a second call
    /// while one is still in flight. Endpoint and aggregation failures yield
    /// the fallback reply.
    pub async fn ask(&self, uid: &str, message: &str) -> Result<String, ChatRejected> {
        if message.trim().is_empty() {
            return Err(ChatRejected::EmptyMessage);
        }
        let _guard = self
            .sending
            .try_lock()
            .map_err(|_| ChatRejected::AlreadySending)?;

        self.transcript.write().await.push(Message::user(message));

        let reply = self.reply(uid, message).await;

        self.transcript
            .write()
            .await
            .push(Message::assistant(reply.as_str()));
        Ok(reply)
    }

    async fn reply(&self, uid: &str, message: &str) -> String {
        let context = if self.settings.enriched {
            match self.aggregator.aggregate(uid).await {
                Ok(context) => Some(context),
                Err(e) => {
                    warn!(uid, error = %e, "Could not aggregate chat context");
                    return self.settings.fallback_message.clone();
                }
            }
        } else {
            None
        };

        let request = self.settings.build_request(message, context.as_ref());
        debug!(
            uid,
            provider = %self.provider.name(),
            messages = request.messages.len(),
            "Sending chat message"
        );

        match self.provider.complete(request).await {
            Ok(response) => response.message.content,
            Err(e) => {
                warn!(uid, provider = %self.provider.name(), error = %e, "Chat completion failed");
                self.settings.fallback_message.clone()
            }
        }
    }
}
