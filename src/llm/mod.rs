pub mod types;

pub use types::{ChatMessage, ContentPart, ImageUrl, MessageContent, Role};
