use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Url;

use crate::models::{ProgressSnapshot, Repository, TrackedGroup};
use crate::slack::{Block, Button, ButtonStyle, Text};

use super::indicators::{DEFAULT_BAR_WIDTH, StatusLevel, Trend, progress_bar};

pub const FALLBACK_TEXT: &str = "Weekly Progress Report";

const DATE_FORMAT: &str = "%B %d, %Y";
const DATETIME_FORMAT: &str = "%B %d, %Y at %I:%M %p";

#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub web_url: String,
    pub bar_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            web_url: "https://github.com".to_string(),
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

/// One tracked group and the outcome of fetching it.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub group: TrackedGroup,
    pub snapshot: Option<ProgressSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub fetched: usize,
    pub completed: usize,
    pub average_progress: f64,
}

impl Summary {
    /// Completed count and average only consider groups that were fetched.
    pub fn from_results(results: &[GroupReport]) -> Self {
        let fetched: Vec<&ProgressSnapshot> =
            results.iter().filter_map(|r| r.snapshot.as_ref()).collect();

        let average_progress = if fetched.is_empty() {
            0.0
        } else {
            fetched.iter().map(|s| s.progress_percentage).sum::<f64>() / fetched.len() as f64
        };

        Self {
            total: results.len(),
            fetched: fetched.len(),
            completed: fetched.iter().filter(|s| s.is_complete()).count(),
            average_progress,
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.fetched
    }
}

pub fn issues_url(web_url: &str, repository: &Repository, title: &str) -> String {
    let base = format!(
        "{}/{}/{}/issues",
        web_url.trim_end_matches('/'),
        repository.owner,
        repository.name
    );
    match Url::parse_with_params(&base, &[("q", format!("milestone:\"{title}\""))]) {
        Ok(url) => url.into(),
        Err(_) => base,
    }
}

pub fn title_block(repository: &Repository) -> Block {
    Block::header(format!("🚀 {repository} - Weekly Progress"))
}

pub fn summary_blocks(summary: &Summary, report_date: NaiveDate) -> Vec<Block> {
    let total = match summary.failed() {
        0 => summary.total.to_string(),
        failed => format!("{} ({failed} failed to load)", summary.total),
    };

    vec![
        Block::header("Milestone Summary"),
        Block::fields_section(vec![
            Text::markdown(format!("*Total Milestones:* {total}")),
            Text::markdown(format!("*Completed:* {}", summary.completed)),
            Text::markdown(format!(
                "*Average Progress:* {:.1}%",
                summary.average_progress
            )),
            Text::markdown(format!(
                "*Report Date:* {}",
                report_date.format(DATE_FORMAT)
            )),
        ]),
        Block::Divider,
    ]
}

pub fn group_blocks(
    group: &TrackedGroup,
    snapshot: &ProgressSnapshot,
    options: &FormatOptions,
) -> Vec<Block> {
    let percentage = snapshot.progress_percentage;
    let status = StatusLevel::from_percentage(percentage);
    // No progress history is kept between runs.
    let trend = Trend::between(percentage, None);

    let fields = Block::fields_section(vec![
        Text::markdown(format!(
            "*Milestone:* <{}|{}>",
            snapshot.html_url, snapshot.title
        )),
        Text::markdown(format!(
            "*Status:* {} {percentage:.1}% Complete {}",
            status.emoji(),
            trend.emoji()
        )),
        Text::markdown(format!(
            "*Progress:* {}/{} issues",
            snapshot.closed_issues, snapshot.total_issues
        )),
        Text::markdown(format!("*State:* {}", snapshot.state.label())),
    ]);

    let bar = Block::text_section(format!(
        "```{}``` {percentage:.1}%",
        progress_bar(percentage, options.bar_width)
    ));

    let mut info = Vec::with_capacity(3);
    if let Some(description) = &snapshot.description {
        info.push(format!("📝 *Description:* {description}"));
    }
    if let Some(due_on) = snapshot.due_on {
        info.push(format!("📅 *Due Date:* {}", due_on.format(DATE_FORMAT)));
    }
    info.push(format!(
        "*Last Updated:* {}",
        snapshot.updated_at.format(DATETIME_FORMAT)
    ));

    let actions = Block::Actions {
        elements: vec![
            Button {
                text: Text::plain("View Milestone"),
                url: snapshot.html_url.clone(),
                style: Some(ButtonStyle::Primary),
            },
            Button {
                text: Text::plain("View Issues"),
                url: issues_url(&options.web_url, &group.repository, &snapshot.title),
                style: None,
            },
        ],
    };

    vec![
        Block::header(format!("{} {}", group.emoji, group.name)),
        fields,
        bar,
        Block::text_section(info.join("\n")),
        actions,
        Block::Divider,
    ]
}

pub fn failure_blocks(group: &TrackedGroup) -> Vec<Block> {
    vec![
        Block::text_section(format!(
            "❌ *{}*\nFailed to fetch milestone data",
            group.name
        )),
        Block::Divider,
    ]
}

pub fn footer_block(generated_at: NaiveDateTime) -> Block {
    Block::Context {
        elements: vec![Text::markdown(format!(
            "📅 Generated on {} | 🤖 Progress Bot",
            generated_at.format(DATETIME_FORMAT)
        ))],
    }
}

/// Assembles the full message: title, summary, one block set per group, footer.
#[tracing::instrument(
    name = "pipeline_stage format",
    skip_all,
    fields(
        pipeline.stage = "format",
        report.groups = results.len(),
        report.blocks,
    )
)]
pub fn build_report(
    repository: &Repository,
    results: &[GroupReport],
    options: &FormatOptions,
    generated_at: NaiveDateTime,
) -> Vec<Block> {
    let mut blocks = vec![title_block(repository)];
    blocks.extend(summary_blocks(
        &Summary::from_results(results),
        generated_at.date(),
    ));

    for result in results {
        match &result.snapshot {
            Some(snapshot) => blocks.extend(group_blocks(&result.group, snapshot, options)),
            None => blocks.extend(failure_blocks(&result.group)),
        }
    }

    if blocks.last().is_some_and(Block::is_divider) {
        blocks.pop();
    }
    blocks.push(footer_block(generated_at));

    tracing::Span::current().record("report.blocks", blocks.len());

    blocks
}
