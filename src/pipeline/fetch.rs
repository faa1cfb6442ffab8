use opentelemetry::KeyValue;

use crate::github::SourceApi;
use crate::models::{ProgressSnapshot, TrackedGroup};
use crate::telemetry::metrics::REPORT_GROUPS_FETCHED;

/// Fetches one group's counters. Failures are logged and come back as `None`
/// so the rest of the run carries on.
#[tracing::instrument(
    name = "pipeline_stage fetch",
    skip(source, group),
    fields(
        pipeline.stage = "fetch",
        milestone.name = %group.name,
        milestone.number = group.milestone_number,
        milestone.color = %group.color,
        milestone.progress,
    )
)]
pub async fn fetch(source: &dyn SourceApi, group: &TrackedGroup) -> Option<ProgressSnapshot> {
    tracing::info!(milestone = %group.name, "Fetching milestone data");

    match source
        .get_milestone(&group.repository, group.milestone_number)
        .await
    {
        Ok(detail) => {
            let snapshot = ProgressSnapshot::from(detail);
            tracing::Span::current().record("milestone.progress", snapshot.progress_percentage);
            REPORT_GROUPS_FETCHED.add(1, &[KeyValue::new("outcome", "success")]);
            Some(snapshot)
        }
        Err(e) => {
            tracing::error!(
                milestone = %group.name,
                error = %e,
                "Error fetching milestone data"
            );
            REPORT_GROUPS_FETCHED.add(1, &[KeyValue::new("outcome", "failure")]);
            None
        }
    }
}
