//! Chat message model and the locally displayed conversation.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::id::new_id;
use crate::image::ImageAttachment;

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single chat turn. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    role: Role,
    content: String,
    image: Option<ImageAttachment>,
    timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, image: Option<ImageAttachment>) -> Self {
        Self {
            id: new_id(),
            role,
            content: content.into(),
            image,
            timestamp: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>, image: Option<ImageAttachment>) -> Self {
        Self::new(Role::User, content, image)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content, None)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Display time, e.g. `14:05`.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// The ordered history shown to the user plus the request state.
///
/// Messages are only ever appended; insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    loading: bool,
    last_error: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_last_error(&mut self, error: Option<String>) {
        self.last_error = error;
    }

    // -- Getters --

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_keeps_image() {
        let image = ImageAttachment::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]);
        let msg = Message::user("veja o erro", Some(image.clone()));
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.content(), "veja o erro");
        assert_eq!(msg.image(), Some(&image));
    }

    #[test]
    fn model_message_has_no_image() {
        let msg = Message::model("Tente revalidar.");
        assert_eq!(msg.role(), Role::Model);
        assert!(msg.image().is_none());
    }

    #[test]
    fn message_ids_are_unique() {
        let a = Message::user("a", None);
        let b = Message::user("a", None);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn time_label_is_hours_and_minutes() {
        let msg = Message::model("ok");
        let label = msg.time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn conversation_preserves_insertion_order() {
        let mut state = ConversationState::new();
        state.push(Message::user("primeira", None));
        state.push(Message::model("segunda"));
        state.push(Message::user("terceira", None));

        let contents: Vec<_> = state.messages().iter().map(Message::content).collect();
        assert_eq!(contents, ["primeira", "segunda", "terceira"]);
        assert_eq!(state.last().map(Message::content), Some("terceira"));
    }

    #[test]
    fn conversation_starts_idle_and_empty() {
        let state = ConversationState::default();
        assert!(state.is_empty());
        assert!(!state.is_loading());
        assert!(state.last_error().is_none());
    }
}
