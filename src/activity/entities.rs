use serde::Deserialize;

/// Part of a GitHub event we care about. Everything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

impl GitHubEvent {
    pub fn new(kind: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            repo: EventRepo { name: repo.into() },
        }
    }
}
