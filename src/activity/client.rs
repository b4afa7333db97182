use std::{future::Future, time::Duration};

use reqwest::{
    header::{ACCEPT, USER_AGENT},
    StatusCode, Url,
};
use tracing::{debug, info};

use super::{entities::GitHubEvent, ActivityError};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Interface for abstracting where events come from.
pub trait EventSource {
    fn fetch_events(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<GitHubEvent>, ActivityError>>;
}

/// The main realization of [EventSource]. Makes a single request, there are no retries.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: Url,
}

impl GitHubClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ActivityError> {
        let api_url = Url::parse(api_url).map_err(|_| ActivityError::InvalidUrl(api_url.into()))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }

    fn events_url(&self, username: &str) -> Result<Url, ActivityError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ActivityError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(["users", username, "events"]);
        Ok(url)
    }
}

impl EventSource for GitHubClient {
    async fn fetch_events(&self, username: &str) -> Result<Vec<GitHubEvent>, ActivityError> {
        let url = self.events_url(username)?;
        debug!("Requesting {url}");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(USER_AGENT, concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        check_status(response.status(), username)?;
        info!("GitHub responded with {}", response.status());

        let body = response.bytes().await?;
        decode_events(&body)
    }
}

fn check_status(status: StatusCode, username: &str) -> Result<(), ActivityError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(ActivityError::UserNotFound(username.into())),
        status => Err(ActivityError::Status(status)),
    }
}

/// An empty body means there is no activity.
fn decode_events(body: &[u8]) -> Result<Vec<GitHubEvent>, ActivityError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(vec![]);
    }
    Ok(serde_json::from_slice(body)?)
}
