use std::process::ExitCode;

use clap::Parser;

use milestone_digest::Config;
use milestone_digest::github::GitHubClient;
use milestone_digest::models::TrackedGroup;
use milestone_digest::pipeline::{ReportRequest, RunOutcome, run_report};
use milestone_digest::slack::SlackClient;
use milestone_digest::telemetry::init_telemetry;

/// Posts a GitHub milestone progress digest to Slack.
#[derive(Parser, Debug)]
#[command(name = "milestone-digest", version, about)]
struct Cli {
    /// Run a test report to verify tokens and recipient
    #[arg(long)]
    test: bool,

    /// Track only this milestone instead of discovering all of them (repeatable)
    #[arg(long = "milestone", value_name = "NUMBER[:NAME]", value_parser = parse_milestone)]
    milestones: Vec<ManualMilestone>,
}

#[derive(Debug, Clone, PartialEq)]
struct ManualMilestone {
    number: u64,
    name: Option<String>,
}

fn parse_milestone(value: &str) -> Result<ManualMilestone, String> {
    let (number, name) = match value.split_once(':') {
        Some((number, name)) => (number, Some(name.trim().to_string())),
        None => (value, None),
    };
    let number = number
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid milestone number {number:?}"))?;

    Ok(ManualMilestone {
        number,
        name: name.filter(|n| !n.is_empty()),
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            if let Some(hint) = e.hint() {
                eprintln!("{hint}");
            }
            return ExitCode::FAILURE;
        }
    };

    let telemetry_guard = match init_telemetry(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("❌ Failed to initialize telemetry: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        repository = %config.repository,
        environment = %config.environment,
        test_run = cli.test,
        "Starting milestone-digest"
    );

    let exit_code = match run(&cli, &config).await {
        Ok(RunOutcome::Delivered { .. }) => ExitCode::SUCCESS,
        Ok(RunOutcome::NoGroups | RunOutcome::DeliveryFailed) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Report run aborted");
            ExitCode::FAILURE
        }
    };

    telemetry_guard.shutdown();

    exit_code
}

async fn run(cli: &Cli, config: &Config) -> anyhow::Result<RunOutcome> {
    let source = GitHubClient::new(&config.github_api_url, &config.github_token)?;
    let messenger = SlackClient::new(&config.slack_api_url, &config.slack_bot_token);

    let manual_groups = cli
        .milestones
        .iter()
        .map(|m| TrackedGroup::manual(config.repository.clone(), m.number, m.name.clone()))
        .collect();
    let request = ReportRequest::from_config(config, manual_groups);

    if cli.test {
        tracing::info!("Running test report");
    }

    Ok(run_report(&source, &messenger, &request).await)
}
