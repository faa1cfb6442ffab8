pub mod client;

pub use client::GitHubClient;

use crate::error::AppResult;
use crate::models::{MilestoneDetail, MilestoneSummary, Repository};

/// Read side of the report: where milestone progress comes from.
#[async_trait::async_trait]
pub trait SourceApi: Send + Sync {
    /// Lists milestones in every state. Only the first page is returned.
    async fn list_milestones(&self, repository: &Repository) -> AppResult<Vec<MilestoneSummary>>;

    async fn get_milestone(
        &self,
        repository: &Repository,
        number: u64,
    ) -> AppResult<MilestoneDetail>;
}
