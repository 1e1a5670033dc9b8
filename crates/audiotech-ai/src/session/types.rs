//! Session settings and errors.

use crate::prompt::SYSTEM_INSTRUCTION;
use crate::{AiError, GenerationConfig};

/// Shown to callers whenever a send fails, whatever the underlying cause.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Não foi possível conectar ao servidor de IA. Tente novamente.";

/// Fixed configuration a session is created with.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub system_instruction: String,
    pub generation: GenerationConfig,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            generation: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to initialize chat session: {0}")]
    Init(#[source] AiError),
    #[error("{}", CONNECTION_ERROR_MESSAGE)]
    Connection(#[source] AiError),
    #[error("message needs text or an image")]
    EmptyMessage,
}
