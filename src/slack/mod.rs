pub mod blocks;
pub mod client;

pub use blocks::{Block, Button, ButtonStyle, Text};
pub use client::SlackClient;

use serde::Serialize;

use crate::error::AppResult;

/// Body of a `chat.postMessage` call.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessage {
    pub channel: String,
    pub blocks: Vec<Block>,
    /// Shown by clients that cannot render blocks, and in notifications.
    pub text: String,
}

#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    async fn post_message(&self, message: &PostMessage) -> AppResult<()>;
}
