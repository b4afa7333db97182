use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("user {0} not found, please check the name")]
    UserNotFound(String),
    #[error("failed collecting data from GitHub, status {0}")]
    Status(StatusCode),
    #[error("error calling the GitHub API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response from GitHub: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("can't build request URL from {0}")]
    InvalidUrl(String),
}
