use serde::Deserialize;

use super::{Messenger, PostMessage};
use crate::error::{AppError, AppResult};

pub struct SlackClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// `ok` is the real verdict; Slack answers 200 for most rejected calls.
#[derive(Deserialize)]
struct SlackAck {
    ok: bool,
    error: Option<String>,
}

impl SlackClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Messenger for SlackClient {
    #[tracing::instrument(
        name = "slack.post_message",
        skip(self, message),
        fields(
            slack.channel = %message.channel,
            slack.blocks = message.blocks.len(),
        )
    )]
    async fn post_message(&self, message: &PostMessage) -> AppResult<()> {
        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.base_url))
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await?;

        // Non-2xx replies (e.g. 429 ratelimited) still carry the ok/error body.
        let status_error = response.error_for_status_ref().err();
        let body = response.text().await?;

        match serde_json::from_str::<SlackAck>(&body) {
            Ok(ack) if !ack.ok => Err(AppError::Slack(
                ack.error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
            Ok(_) if status_error.is_none() => Ok(()),
            _ => match status_error {
                Some(e) => Err(AppError::Http(e)),
                None => Err(AppError::Slack(format!("Unreadable response: {body}"))),
            },
        }
    }
}
