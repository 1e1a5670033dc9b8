//! Owner of the process-wide chat session.

use std::sync::Arc;

use audiotech_common::image::strip_data_url_prefix;
use audiotech_common::{new_correlation_id, ImageAttachment};
use tracing::{debug, error, info};

use crate::{AiClient, Part, TokenUsage};

use super::chat::ChatSession;
use super::types::{SessionError, SessionSettings};

/// Creates at most one `ChatSession` and routes every send through it.
pub struct SessionManager {
    client: Arc<dyn AiClient>,
    settings: SessionSettings,
    session: Option<ChatSession>,
}

impl SessionManager {
    pub fn new(client: Arc<dyn AiClient>, settings: SessionSettings) -> Self {
        Self {
            client,
            settings,
            session: None,
        }
    }

    /// Return the existing session, or create it after confirming the
    /// remote model accepts this configuration.
    pub async fn initialize(&mut self) -> Result<&mut ChatSession, SessionError> {
        let session = match self.session.take() {
            Some(session) => session,
            None => self.create_session().await?,
        };
        Ok(self.session.insert(session))
    }

    async fn create_session(&self) -> Result<ChatSession, SessionError> {
        if let Err(e) = self.client.check_model().await {
            error!(model = %self.client.model_name(), error = %e, "Failed to initialize chat session");
            return Err(SessionError::Init(e));
        }

        let session = ChatSession::new(Arc::clone(&self.client), self.settings.clone());
        info!(
            session_id = %session.id(),
            model = %self.client.model_name(),
            temperature = self.settings.generation.temperature,
            "Chat session created"
        );
        Ok(session)
    }

    /// Send text and an optional image on the session, creating it first
    /// if needed. Returns the model's reply.
    pub async fn send(
        &mut self,
        text: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, SessionError> {
        if text.trim().is_empty() && image.is_none() {
            return Err(SessionError::EmptyMessage);
        }

        let correlation_id = new_correlation_id();
        let session = self.initialize().await?;

        let mut parts = Vec::with_capacity(2);
        if !text.is_empty() {
            parts.push(Part::Text(text.to_string()));
        }
        if let Some(image) = image {
            parts.push(Part::InlineData {
                mime_type: image.mime_type().to_string(),
                data: strip_data_url_prefix(image.data()).to_string(),
            });
        }

        debug!(
            correlation_id = %correlation_id,
            session_id = %session.id(),
            has_image = image.is_some(),
            "Sending message"
        );

        match session.send(parts).await {
            Ok(reply) => {
                debug!(correlation_id = %correlation_id, chars = reply.len(), "Reply received");
                Ok(reply)
            }
            Err(e) => {
                error!(correlation_id = %correlation_id, error = %e, "Error sending message to Gemini");
                Err(SessionError::Connection(e))
            }
        }
    }

    /// Drop the session, logging its token usage.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            let usage = session.tracker().total();
            info!(
                session_id = %session.id(),
                calls = session.tracker().call_count(),
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Chat session closed"
            );
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    /// Token usage of the current session, zero when none exists.
    pub fn usage(&self) -> TokenUsage {
        self.session
            .as_ref()
            .map(|s| s.tracker().total().clone())
            .unwrap_or_default()
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}
