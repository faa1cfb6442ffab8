use std::env;

use crate::error::{AppError, AppResult};
use crate::models::Repository;

const DEFAULT_REPOSITORY: &str = "leyangloh/FakeProgress";

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub github_token: String,
    pub slack_bot_token: String,
    pub slack_user_id: String,
    pub repository: Repository,
    pub github_api_url: String,
    pub github_web_url: String,
    pub slack_api_url: String,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Credentials are checked in a
    /// fixed order so the first missing one is the one reported.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| var(key).ok_or(AppError::MissingCredential(key));

        let github_token = required("GITHUB_TOKEN")?;
        let slack_bot_token = required("SLACK_BOT_TOKEN")?;
        let slack_user_id = required("SLACK_USER_ID")?;

        let repository = var("GITHUB_REPOSITORY")
            .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string())
            .parse()?;

        Ok(Self {
            environment: var("APP_ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            github_token,
            slack_bot_token,
            slack_user_id,
            repository,
            github_api_url: var("GITHUB_API_URL")
                .unwrap_or_else(|| "https://api.github.com".to_string()),
            github_web_url: var("GITHUB_WEB_URL")
                .unwrap_or_else(|| "https://github.com".to_string()),
            slack_api_url: var("SLACK_API_URL")
                .unwrap_or_else(|| "https://slack.com/api".to_string()),
            otel_service_name: var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| "milestone-digest".to_string()),
            otel_exporter_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
