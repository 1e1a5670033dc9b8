//! Non-interactive mode: one question, one printed answer.

use std::path::Path;

use audiotech_ai::SessionManager;
use audiotech_common::{AudioTechError, ImageAttachment, Role};
use tracing::info;

use crate::conversation::Conversation;

/// Result of a one-shot question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub failed: bool,
}

/// Send `text` (and an optional image file) through the conversation
/// controller and return the model's reply, or the apology on failure.
pub async fn ask(
    manager: &mut SessionManager,
    text: &str,
    image: Option<&Path>,
) -> Result<Answer, AudioTechError> {
    let image = image.map(ImageAttachment::from_path).transpose()?;
    let mut conversation = Conversation::new();

    if !conversation.send(manager, text, image).await {
        return Err(AudioTechError::Other(
            "nothing to send: provide text or an image".into(),
        ));
    }

    let state = conversation.state();
    let reply = state
        .last()
        .filter(|m| m.role() == Role::Model)
        .map(|m| m.content().to_string())
        .unwrap_or_default();
    let failed = state.last_error().is_some();
    info!(failed, chars = reply.len(), "One-shot question answered");

    Ok(Answer {
        text: reply,
        failed,
    })
}
