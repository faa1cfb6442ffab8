use crate::github::SourceApi;
use crate::models::{GroupStatus, MilestoneSummary, Repository, TrackedGroup};

pub const EMOJI_PALETTE: [&str; 6] = ["🚀", "🔬", "📊", "🎯", "🏆", "⭐"];

#[tracing::instrument(
    name = "pipeline_stage discover",
    skip(source),
    fields(
        pipeline.stage = "discover",
        repository = %repository,
        groups.discovered,
    )
)]
pub async fn discover(source: &dyn SourceApi, repository: &Repository) -> Vec<TrackedGroup> {
    match source.list_milestones(repository).await {
        Ok(milestones) => {
            let groups = tracked_groups(repository, &milestones);
            tracing::Span::current().record("groups.discovered", groups.len());
            tracing::info!(
                count = groups.len(),
                repository = %repository,
                "Discovered milestones"
            );
            groups
        }
        Err(e) => {
            tracing::error!(
                repository = %repository,
                error = %e,
                "Error discovering milestones"
            );
            Vec::new()
        }
    }
}

/// Assigns palette emoji by discovery order and color by milestone state.
pub fn tracked_groups(
    repository: &Repository,
    milestones: &[MilestoneSummary],
) -> Vec<TrackedGroup> {
    milestones
        .iter()
        .enumerate()
        .map(|(i, milestone)| TrackedGroup {
            name: milestone.title.clone(),
            repository: repository.clone(),
            milestone_number: milestone.number,
            emoji: EMOJI_PALETTE[i % EMOJI_PALETTE.len()].to_string(),
            color: GroupStatus::classify(milestone.state, milestone.open_issues)
                .color()
                .to_string(),
        })
        .collect()
}
