//! Summarizes recent public GitHub activity of a user.
//! [client::GitHubClient] fetches raw events and [digest::ActivityDigest] groups them into one
//! line per repository and event type.

pub mod client;
pub mod digest;
pub mod entities;
pub mod error;

pub use client::{EventSource, GitHubClient};
pub use digest::ActivityDigest;
pub use error::ActivityError;

/// Fetches the events of `username` and groups them.
pub async fn summarize_user(
    source: &impl EventSource,
    username: &str,
) -> Result<ActivityDigest, ActivityError> {
    let events = source.fetch_events(username).await?;
    Ok(ActivityDigest::from_events(&events))
}
