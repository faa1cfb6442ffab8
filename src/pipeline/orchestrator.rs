use std::time::Instant;

use chrono::Local;
use uuid::Uuid;

use crate::config::Config;
use crate::github::SourceApi;
use crate::models::{Repository, TrackedGroup};
use crate::slack::Messenger;
use crate::telemetry::metrics::{REPORT_AVERAGE_PROGRESS, REPORT_RUN_DURATION};

use super::format::{self, FormatOptions, GroupReport, Summary};
use super::{deliver, discover, fetch};

#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub repository: Repository,
    pub recipient: String,
    /// When non-empty, these groups are reported instead of discovering milestones.
    pub manual_groups: Vec<TrackedGroup>,
    pub format: FormatOptions,
}

impl ReportRequest {
    pub fn from_config(config: &Config, manual_groups: Vec<TrackedGroup>) -> Self {
        Self {
            repository: config.repository.clone(),
            recipient: config.slack_user_id.clone(),
            manual_groups,
            format: FormatOptions {
                web_url: config.github_web_url.clone(),
                ..FormatOptions::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Delivered { tracked: usize, failed: usize },
    NoGroups,
    DeliveryFailed,
}

impl RunOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, RunOutcome::Delivered { .. })
    }
}

#[tracing::instrument(
    name = "pipeline report",
    skip(source, messenger, request),
    fields(
        report.id = %Uuid::new_v4(),
        repository = %request.repository,
        report.groups,
        report.failed,
        report.duration_ms,
    )
)]
pub async fn run_report(
    source: &dyn SourceApi,
    messenger: &dyn Messenger,
    request: &ReportRequest,
) -> RunOutcome {
    let start = Instant::now();
    let span = tracing::Span::current();

    tracing::info!("Generating weekly progress report");

    // Stage 1: Discover milestones, unless they were registered by hand
    let groups = if request.manual_groups.is_empty() {
        discover::discover(source, &request.repository).await
    } else {
        tracing::info!(
            count = request.manual_groups.len(),
            "Using manually registered milestones"
        );
        request.manual_groups.clone()
    };

    if groups.is_empty() {
        tracing::warn!(
            repository = %request.repository,
            "No milestones found in the repository"
        );
        return RunOutcome::NoGroups;
    }

    // Stage 2: Fetch each milestone in order
    let mut results = Vec::with_capacity(groups.len());
    for group in groups {
        let snapshot = fetch::fetch(source, &group).await;
        results.push(GroupReport { group, snapshot });
    }

    // Stage 3: Format the message
    let summary = Summary::from_results(&results);
    let blocks = format::build_report(
        &request.repository,
        &results,
        &request.format,
        Local::now().naive_local(),
    );

    // Stage 4: Deliver
    let delivered = deliver::deliver(messenger, &request.recipient, blocks).await;

    let duration = start.elapsed();
    REPORT_RUN_DURATION.record(duration.as_secs_f64(), &[]);
    REPORT_AVERAGE_PROGRESS.record(summary.average_progress, &[]);

    span.record("report.groups", summary.total);
    span.record("report.failed", summary.failed());
    span.record("report.duration_ms", duration.as_millis() as u64);

    if delivered {
        tracing::info!(
            tracked = summary.fetched,
            failed = summary.failed(),
            "Report sent! Tracked {} milestones successfully",
            summary.fetched
        );
        RunOutcome::Delivered {
            tracked: summary.fetched,
            failed: summary.failed(),
        }
    } else {
        tracing::error!(groups = summary.total, "Failed to send report");
        RunOutcome::DeliveryFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MilestoneState;
    use crate::pipeline::fakes::{FakeMessenger, FakeSource, detail, summary};
    use crate::slack::{Block, Text};

    fn request() -> ReportRequest {
        ReportRequest {
            repository: Repository::new("acme", "rocket"),
            recipient: "U123".to_string(),
            manual_groups: Vec::new(),
            format: FormatOptions::default(),
        }
    }

    fn two_groups_one_failing() -> FakeSource {
        FakeSource::new(vec![
            summary(1, "A", MilestoneState::Open, 1, 3),
            summary(2, "B", MilestoneState::Open, 2, 2),
        ])
        .with_detail(detail(1, "A", MilestoneState::Open, 1, 3))
    }

    fn texts(block: &Block) -> Vec<&str> {
        match block {
            Block::Header { text } => vec![text.as_str()],
            Block::Section { text, fields } => text
                .iter()
                .chain(fields.iter().flatten())
                .map(Text::as_str)
                .collect(),
            Block::Context { elements } => elements.iter().map(Text::as_str).collect(),
            Block::Actions { .. } | Block::Divider => Vec::new(),
        }
    }

    #[test]
    fn test_end_to_end_with_one_failed_fetch() {
        let source = two_groups_one_failing();
        let messenger = FakeMessenger::accepting();

        let outcome = tokio_test::block_on(run_report(&source, &messenger, &request()));

        assert_eq!(
            outcome,
            RunOutcome::Delivered {
                tracked: 1,
                failed: 1
            }
        );
        assert_eq!(source.requested(), vec![1, 2]);

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        let blocks = &sent[0].blocks;

        // title, summary(3), A(6), B failure(2 minus trailing divider), footer
        assert_eq!(blocks.len(), 1 + 3 + 6 + 1 + 1);
        assert_eq!(blocks[0], Block::header("🚀 acme/rocket - Weekly Progress"));

        let summary_fields = texts(&blocks[2]);
        assert_eq!(summary_fields[0], "*Total Milestones:* 2 (1 failed to load)");
        assert_eq!(summary_fields[1], "*Completed:* 0");
        assert_eq!(summary_fields[2], "*Average Progress:* 75.0%");

        assert_eq!(blocks[4], Block::header("🚀 A"));
        assert_eq!(texts(&blocks[5])[1], "*Status:* 🟢 75.0% Complete 📊");

        let failure: Vec<&Block> = blocks
            .iter()
            .filter(|b| texts(b).iter().any(|t| t.contains("Failed to fetch")))
            .collect();
        assert_eq!(failure.len(), 1);
        assert_eq!(texts(failure[0]), vec!["❌ *B*\nFailed to fetch milestone data"]);

        assert!(matches!(blocks.last(), Some(Block::Context { .. })));
        assert!(!blocks[blocks.len() - 2].is_divider());
    }

    #[test]
    fn test_delivery_failure_is_reported_not_raised() {
        let source = two_groups_one_failing();
        let messenger = FakeMessenger::rejecting("not_authed");

        let outcome = tokio_test::block_on(run_report(&source, &messenger, &request()));

        assert_eq!(outcome, RunOutcome::DeliveryFailed);
        assert!(!outcome.is_success());
        assert_eq!(messenger.sent().len(), 1);
    }

    #[test]
    fn test_no_milestones_skips_delivery() {
        let source = FakeSource::unreachable();
        let messenger = FakeMessenger::accepting();

        let outcome = tokio_test::block_on(run_report(&source, &messenger, &request()));

        assert_eq!(outcome, RunOutcome::NoGroups);
        assert!(messenger.sent().is_empty());
    }

    #[test]
    fn test_manual_groups_bypass_discovery() {
        let source = FakeSource::unreachable()
            .with_detail(detail(7, "Launch", MilestoneState::Closed, 0, 4));
        let messenger = FakeMessenger::accepting();
        let mut req = request();
        req.manual_groups = vec![TrackedGroup::manual(
            req.repository.clone(),
            7,
            Some("Launch".to_string()),
        )];

        let outcome = tokio_test::block_on(run_report(&source, &messenger, &req));

        assert_eq!(
            outcome,
            RunOutcome::Delivered {
                tracked: 1,
                failed: 0
            }
        );
        let blocks = &messenger.sent()[0].blocks;
        assert_eq!(blocks[4], Block::header("📊 Launch"));
        assert_eq!(texts(&blocks[2])[1], "*Completed:* 1");
    }

    #[test]
    fn test_request_from_config() {
        let config = Config::from_lookup(|key| match key {
            "GITHUB_TOKEN" => Some("ghp".to_string()),
            "SLACK_BOT_TOKEN" => Some("xoxb".to_string()),
            "SLACK_USER_ID" => Some("U999".to_string()),
            "GITHUB_WEB_URL" => Some("https://ghe.example.com".to_string()),
            _ => None,
        })
        .unwrap();

        let req = ReportRequest::from_config(&config, Vec::new());

        assert_eq!(req.recipient, "U999");
        assert_eq!(req.repository.to_string(), "leyangloh/FakeProgress");
        assert_eq!(req.format.web_url, "https://ghe.example.com");
        assert_eq!(req.format.bar_width, 20);
    }
}
