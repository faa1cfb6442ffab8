use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing {0} environment variable")]
    MissingCredential(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error ({status}): {message}")]
    GitHub { status: u16, message: String },

    #[error("Slack API error: {0}")]
    Slack(String),
}

impl AppError {
    /// Shell hint printed next to a missing-credential error.
    pub fn hint(&self) -> Option<String> {
        match self {
            AppError::MissingCredential(var) => Some(format!(
                "Please set: export {var}='your_{}_here'",
                var.to_lowercase()
            )),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
