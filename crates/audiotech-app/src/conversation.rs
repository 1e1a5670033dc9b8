//! Conversation controller: optimistic submit, then commit the reply or
//! the fallback apology.

use audiotech_ai::{SessionError, SessionManager};
use audiotech_common::{ConversationState, ImageAttachment, Message};
use tracing::warn;

/// Shown in the model role whenever a send fails.
pub const APOLOGY_MESSAGE: &str = "Desculpe, encontrei um erro de conexão. Por favor, verifique sua internet ou tente novamente em alguns instantes.";

/// Sent to the model when the user attaches an image without typing.
pub const DEFAULT_IMAGE_PROMPT: &str = "Analise esta imagem.";

/// A submitted turn waiting for the model.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub text: String,
    pub image: Option<ImageAttachment>,
}

/// Owns the visible history and the loading flag.
#[derive(Debug, Default)]
pub struct Conversation {
    state: ConversationState,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Append the user's message and enter the loading state.
    ///
    /// Returns `None` without touching state when the input is empty
    /// (no text, no image) or a request is already outstanding.
    pub fn submit(&mut self, text: &str, image: Option<ImageAttachment>) -> Option<PendingRequest> {
        if self.state.is_loading() {
            return None;
        }
        let has_text = !text.trim().is_empty();
        if !has_text && image.is_none() {
            return None;
        }

        self.state.set_last_error(None);
        self.state.push(Message::user(text, image.clone()));
        self.state.set_loading(true);

        let text = if has_text {
            text.to_string()
        } else {
            DEFAULT_IMAGE_PROMPT.to_string()
        };
        Some(PendingRequest { text, image })
    }

    /// Commit the outcome of the outstanding request.
    pub fn complete(&mut self, result: Result<String, SessionError>) {
        match result {
            Ok(reply) => self.state.push(Message::model(reply)),
            Err(e) => {
                warn!(error = %e, "Send failed, showing apology");
                self.state.set_last_error(Some(e.to_string()));
                self.state.push(Message::model(APOLOGY_MESSAGE));
            }
        }
        self.state.set_loading(false);
    }

    /// Submit, send and complete in one go. Returns false when the input
    /// was rejected.
    pub async fn send(
        &mut self,
        manager: &mut SessionManager,
        text: &str,
        image: Option<ImageAttachment>,
    ) -> bool {
        let Some(request) = self.submit(text, image) else {
            return false;
        };
        let result = manager.send(&request.text, request.image.as_ref()).await;
        self.complete(result);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use audiotech_ai::{
        AiClient, AiError, AiResponse, ChatRequest, Content, Part, SessionSettings, TokenUsage,
    };
    use audiotech_common::Role;

    use super::*;

    #[derive(Default)]
    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, AiError>>>,
        sent: Mutex<Vec<Content>>,
    }

    #[async_trait]
    impl AiClient for ScriptedClient {
        async fn send_message(&self, request: &ChatRequest<'_>) -> Result<AiResponse, AiError> {
            if let Some(last) = request.contents.last() {
                self.sent.lock().unwrap().push(last.clone());
            }
            let next = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AiError::NetworkError("no reply scripted".into())));
            next.map(|content| AiResponse {
                content,
                usage: TokenUsage::default(),
            })
        }

        async fn check_model(&self) -> Result<(), AiError> {
            Ok(())
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn manager_with(replies: Vec<Result<String, AiError>>) -> (SessionManager, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        });
        let dyn_client: Arc<dyn AiClient> = client.clone();
        (
            SessionManager::new(dyn_client, SessionSettings::default()),
            client,
        )
    }

    fn png_attachment() -> ImageAttachment {
        ImageAttachment::from_encoded("data:image/png;base64,iVBORw0KGgo=").unwrap()
    }

    #[test]
    fn submit_appends_user_message_and_sets_loading() {
        let mut conversation = Conversation::new();

        let pending = conversation.submit("Meu plugin não valida", None).unwrap();

        assert_eq!(pending.text, "Meu plugin não valida");
        assert_eq!(conversation.state().len(), 1);
        let message = conversation.state().last().unwrap();
        assert_eq!(message.role(), Role::User);
        assert_eq!(message.content(), "Meu plugin não valida");
        assert!(conversation.is_loading());
    }

    #[test]
    fn empty_input_changes_nothing() {
        let mut conversation = Conversation::new();

        assert!(conversation.submit("", None).is_none());
        assert!(conversation.submit("   \n\t", None).is_none());

        assert!(conversation.state().is_empty());
        assert!(!conversation.is_loading());
    }

    #[test]
    fn submit_while_loading_is_a_noop() {
        let mut conversation = Conversation::new();
        conversation.submit("primeira", None).unwrap();

        assert!(conversation.submit("segunda", None).is_none());
        assert!(conversation.submit("", Some(png_attachment())).is_none());

        assert_eq!(conversation.state().len(), 1);
        assert!(conversation.is_loading());
    }

    #[test]
    fn image_only_submit_uses_default_prompt() {
        let mut conversation = Conversation::new();

        let pending = conversation.submit("", Some(png_attachment())).unwrap();

        assert_eq!(pending.text, DEFAULT_IMAGE_PROMPT);
        assert!(pending.image.is_some());
        let message = conversation.state().last().unwrap();
        assert_eq!(message.content(), "");
        assert_eq!(message.image().unwrap().mime_type(), "image/png");
    }

    #[test]
    fn complete_success_appends_reply_and_clears_loading() {
        let mut conversation = Conversation::new();
        conversation.submit("Meu plugin não valida", None).unwrap();

        conversation.complete(Ok("Tente revalidar no Plugin Manager.".into()));

        let state = conversation.state();
        assert_eq!(state.len(), 2);
        assert!(!state.is_loading());
        assert!(state.last_error().is_none());
        let reply = state.last().unwrap();
        assert_eq!(reply.role(), Role::Model);
        assert_eq!(reply.content(), "Tente revalidar no Plugin Manager.");
        assert!(reply.timestamp() >= state.messages()[0].timestamp());
    }

    #[test]
    fn complete_failure_appends_apology_and_records_error() {
        let mut conversation = Conversation::new();
        conversation.submit("Olá", None).unwrap();

        conversation.complete(Err(SessionError::Connection(AiError::NetworkError(
            "timeout".into(),
        ))));

        let state = conversation.state();
        assert_eq!(state.len(), 2);
        assert!(!state.is_loading());
        assert_eq!(state.messages()[0].content(), "Olá");
        assert_eq!(state.last().unwrap().content(), APOLOGY_MESSAGE);
        assert_eq!(state.last().unwrap().role(), Role::Model);
        assert!(state.last_error().is_some());
    }

    #[test]
    fn next_submit_clears_last_error() {
        let mut conversation = Conversation::new();
        conversation.submit("Olá", None).unwrap();
        conversation.complete(Err(SessionError::EmptyMessage));
        assert!(conversation.state().last_error().is_some());

        conversation.submit("De novo", None).unwrap();
        assert!(conversation.state().last_error().is_none());
    }

    #[tokio::test]
    async fn send_success_adds_user_and_model_messages() {
        let (mut manager, _client) =
            manager_with(vec![Ok("Tente revalidar no Plugin Manager.".into())]);
        let mut conversation = Conversation::new();

        assert!(
            conversation
                .send(&mut manager, "Meu plugin não valida", None)
                .await
        );

        let state = conversation.state();
        assert_eq!(state.len(), 2);
        assert!(!state.is_loading());
        assert_eq!(
            state.last().unwrap().content(),
            "Tente revalidar no Plugin Manager."
        );
    }

    #[tokio::test]
    async fn send_failure_adds_apology() {
        let (mut manager, _client) =
            manager_with(vec![Err(AiError::NetworkError("offline".into()))]);
        let mut conversation = Conversation::new();

        conversation
            .send(&mut manager, "Meu plugin não valida", None)
            .await;

        let state = conversation.state();
        assert_eq!(state.len(), 2);
        assert!(!state.is_loading());
        assert_eq!(state.messages()[0].content(), "Meu plugin não valida");
        assert_eq!(state.messages()[1].content(), APOLOGY_MESSAGE);
    }

    #[tokio::test]
    async fn send_rejects_empty_input_without_calling_the_model() {
        let (mut manager, client) = manager_with(vec![]);
        let mut conversation = Conversation::new();

        assert!(!conversation.send(&mut manager, "  ", None).await);
        assert!(conversation.state().is_empty());
        assert!(client.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn image_only_send_carries_default_prompt_and_raw_base64() {
        let (mut manager, client) = manager_with(vec![Ok("Vejo o erro.".into())]);
        let mut conversation = Conversation::new();

        conversation
            .send(&mut manager, "", Some(png_attachment()))
            .await;

        let sent = client.sent.lock().unwrap();
        assert_eq!(
            sent[0].parts,
            vec![
                Part::Text(DEFAULT_IMAGE_PROMPT.into()),
                Part::InlineData {
                    mime_type: "image/png".into(),
                    data: "iVBORw0KGgo=".into(),
                },
            ]
        );
    }
}
