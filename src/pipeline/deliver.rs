use opentelemetry::KeyValue;

use crate::slack::{Block, Messenger, PostMessage};
use crate::telemetry::metrics::REPORT_DELIVERIES;

use super::format::FALLBACK_TEXT;

/// Slack rejects messages with more blocks than this.
const MAX_BLOCKS: usize = 50;

fn exceeds_block_limit(blocks: &[Block]) -> bool {
    blocks.len() > MAX_BLOCKS
}

/// Posts the report as a single message. Returns whether Slack accepted it;
/// errors are logged here and never retried.
#[tracing::instrument(
    name = "pipeline_stage deliver",
    skip(messenger, blocks),
    fields(
        pipeline.stage = "deliver",
        slack.blocks = blocks.len(),
    )
)]
pub async fn deliver(messenger: &dyn Messenger, recipient: &str, blocks: Vec<Block>) -> bool {
    if exceeds_block_limit(&blocks) {
        tracing::warn!(
            blocks = blocks.len(),
            limit = MAX_BLOCKS,
            "Report exceeds Slack's 50-block limit; delivery will fail"
        );
    }

    let message = PostMessage {
        channel: recipient.to_string(),
        blocks,
        text: FALLBACK_TEXT.to_string(),
    };

    match messenger.post_message(&message).await {
        Ok(()) => {
            REPORT_DELIVERIES.add(1, &[KeyValue::new("outcome", "success")]);
            tracing::info!("Successfully sent progress report to Slack");
            true
        }
        Err(e) => {
            REPORT_DELIVERIES.add(1, &[KeyValue::new("outcome", "failure")]);
            tracing::error!(error = %e, "Error sending Slack message");
            false
        }
    }
}
