pub mod errors;
pub mod id;
pub mod image;
pub mod types;

pub use errors::{AttachmentError, AudioTechError, ConfigError};
pub use id::{new_correlation_id, new_id, SessionId};
pub use image::ImageAttachment;
pub use types::{ConversationState, Message, Role};
