pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod pipeline;
pub mod slack;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult};
