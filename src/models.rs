use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AppError;

/// Emoji and color given to groups registered by hand rather than discovered.
pub const DEFAULT_EMOJI: &str = "📊";
pub const DEFAULT_COLOR: &str = "#36a64f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(AppError::Config(format!(
                "repository {s:?} must look like owner/name"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Open,
    Closed,
}

impl MilestoneState {
    pub fn label(self) -> &'static str {
        match self {
            MilestoneState::Open => "Open",
            MilestoneState::Closed => "Closed",
        }
    }
}

/// Three-way classification used to pick a group's display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    Completed,
    Pending,
    Active,
}

impl GroupStatus {
    pub fn classify(state: MilestoneState, open_issues: u32) -> Self {
        match state {
            MilestoneState::Closed => GroupStatus::Completed,
            MilestoneState::Open if open_issues == 0 => GroupStatus::Pending,
            MilestoneState::Open => GroupStatus::Active,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            GroupStatus::Completed => "#28a745",
            GroupStatus::Pending => "#ffc107",
            GroupStatus::Active => "#007bff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedGroup {
    pub name: String,
    pub repository: Repository,
    pub milestone_number: u64,
    pub emoji: String,
    pub color: String,
}

impl TrackedGroup {
    /// Registers a milestone explicitly instead of discovering it.
    pub fn manual(repository: Repository, milestone_number: u64, name: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| format!("Milestone #{milestone_number}")),
            repository,
            milestone_number,
            emoji: DEFAULT_EMOJI.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Row of the list-milestones endpoint. Unused fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneSummary {
    pub number: u64,
    pub title: String,
    pub state: MilestoneState,
    pub open_issues: u32,
    pub closed_issues: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneDetail {
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub state: MilestoneState,
    pub open_issues: u32,
    pub closed_issues: u32,
    pub due_on: Option<DateTime<Utc>>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub title: String,
    pub description: Option<String>,
    pub total_issues: u32,
    pub closed_issues: u32,
    pub open_issues: u32,
    pub progress_percentage: f64,
    pub due_on: Option<DateTime<Utc>>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: MilestoneState,
}

impl ProgressSnapshot {
    pub fn is_complete(&self) -> bool {
        self.progress_percentage >= 100.0
    }
}

impl From<MilestoneDetail> for ProgressSnapshot {
    fn from(detail: MilestoneDetail) -> Self {
        let total_issues = detail.open_issues.saturating_add(detail.closed_issues);
        Self {
            progress_percentage: completion_percentage(detail.closed_issues, total_issues),
            title: detail.title,
            description: detail.description.filter(|d| !d.trim().is_empty()),
            total_issues,
            closed_issues: detail.closed_issues,
            open_issues: detail.open_issues,
            due_on: detail.due_on,
            html_url: detail.html_url,
            created_at: detail.created_at,
            updated_at: detail.updated_at,
            state: detail.state,
        }
    }
}

/// Percentage of closed items, 0 for an empty milestone, clamped to [0, 100].
pub fn completion_percentage(closed: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(closed) / f64::from(total) * 100.0).clamp(0.0, 100.0)
}
