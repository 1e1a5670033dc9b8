//! A single conversational context with the remote model.

use std::sync::Arc;

use audiotech_common::SessionId;

use crate::token_tracker::TokenTracker;
use crate::{AiClient, AiError, AiResponse, ChatRequest, Content, Part};

use super::types::SessionSettings;

/// Conversation history plus the settings every request is sent with.
pub struct ChatSession {
    id: SessionId,
    client: Arc<dyn AiClient>,
    settings: SessionSettings,
    /// Committed turns, alternating user and model.
    history: Vec<Content>,
    tracker: TokenTracker,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("settings", &self.settings)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl ChatSession {
    pub(crate) fn new(client: Arc<dyn AiClient>, settings: SessionSettings) -> Self {
        Self {
            id: SessionId::new(),
            client,
            settings,
            history: Vec::new(),
            tracker: TokenTracker::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    /// Send one user turn and return the model's reply.
    ///
    /// The turn and its reply are committed to history only on success.
    pub async fn send(&mut self, parts: Vec<Part>) -> Result<String, AiError> {
        self.history.push(Content::user(parts));

        match self.generate().await {
            Ok(response) => {
                self.tracker.record(&response.usage);
                if response.content.trim().is_empty() {
                    self.history.pop();
                    return Err(AiError::EmptyReply);
                }
                self.history.push(Content::model_text(response.content.clone()));
                Ok(response.content)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    async fn generate(&self) -> Result<AiResponse, AiError> {
        let request = ChatRequest {
            system_instruction: &self.settings.system_instruction,
            contents: &self.history,
            generation: &self.settings.generation,
        };
        self.client.send_message(&request).await
    }
}
