//! In-memory stand-ins for the GitHub and Slack seams.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::github::SourceApi;
use crate::models::{MilestoneDetail, MilestoneState, MilestoneSummary, Repository};
use crate::slack::{Messenger, PostMessage};

pub fn summary(
    number: u64,
    title: &str,
    state: MilestoneState,
    open_issues: u32,
    closed_issues: u32,
) -> MilestoneSummary {
    MilestoneSummary {
        number,
        title: title.to_string(),
        state,
        open_issues,
        closed_issues,
    }
}

pub fn detail(
    number: u64,
    title: &str,
    state: MilestoneState,
    open_issues: u32,
    closed_issues: u32,
) -> MilestoneDetail {
    MilestoneDetail {
        number,
        title: title.to_string(),
        description: None,
        state,
        open_issues,
        closed_issues,
        due_on: None,
        html_url: format!("https://github.com/acme/rocket/milestone/{number}"),
        created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
        updated_at: "2025-05-12T16:45:00Z".parse().unwrap(),
    }
}

/// Serves a fixed milestone list; `get_milestone` fails for unknown numbers.
pub struct FakeSource {
    milestones: Option<Vec<MilestoneSummary>>,
    details: HashMap<u64, MilestoneDetail>,
    requested: Mutex<Vec<u64>>,
}

impl FakeSource {
    pub fn new(milestones: Vec<MilestoneSummary>) -> Self {
        Self {
            milestones: Some(milestones),
            details: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            milestones: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_detail(mut self, detail: MilestoneDetail) -> Self {
        self.details.insert(detail.number, detail);
        self
    }

    pub fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SourceApi for FakeSource {
    async fn list_milestones(&self, _repository: &Repository) -> AppResult<Vec<MilestoneSummary>> {
        self.milestones.clone().ok_or_else(|| AppError::GitHub {
            status: 503,
            message: "Service Unavailable".to_string(),
        })
    }

    async fn get_milestone(
        &self,
        _repository: &Repository,
        number: u64,
    ) -> AppResult<MilestoneDetail> {
        self.requested.lock().unwrap().push(number);
        self.details.get(&number).cloned().ok_or(AppError::GitHub {
            status: 404,
            message: "Not Found".to_string(),
        })
    }
}

/// Records every message and answers with a fixed acknowledgment.
pub struct FakeMessenger {
    rejection: Option<String>,
    sent: Mutex<Vec<PostMessage>>,
}

impl FakeMessenger {
    pub fn accepting() -> Self {
        Self {
            rejection: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(error: &str) -> Self {
        Self {
            rejection: Some(error.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<PostMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Messenger for FakeMessenger {
    async fn post_message(&self, message: &PostMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message.clone());
        match &self.rejection {
            Some(error) => Err(AppError::Slack(error.clone())),
            None => Ok(()),
        }
    }
}
