pub mod deliver;
pub mod discover;
pub mod fetch;
pub mod format;
pub mod indicators;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod fakes;

pub use orchestrator::{ReportRequest, RunOutcome, run_report};
