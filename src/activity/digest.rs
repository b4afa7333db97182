use std::collections::BTreeMap;

use super::entities::GitHubEvent;

/// Number of events of one type in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub repo: String,
    pub kind: String,
    pub count: usize,
}

impl ActivityEntry {
    /// Human readable description. Known event types get their own phrasing.
    pub fn describe(&self) -> String {
        let ActivityEntry { repo, kind, count } = self;
        match kind.as_str() {
            "CreateEvent" => format!("Created a branch from {repo}"),
            "PushEvent" => format!("Pushed {count} commits to {repo}"),
            "WatchEvent" => format!("Watched {repo}"),
            "IssuesEvent" => format!("Opened a new issue in {repo}"),
            "ForkEvent" => format!("Forked the repo {repo}"),
            _ => format!("{kind}, {count} time(s) at repo {repo}"),
        }
    }
}

/// Events grouped by repository and then by event type. Both levels are sorted by name so the
/// output is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDigest {
    entries: Vec<ActivityEntry>,
}

impl ActivityDigest {
    pub fn from_events(events: &[GitHubEvent]) -> Self {
        let mut grouped = BTreeMap::<&str, BTreeMap<&str, usize>>::new();
        for event in events {
            *grouped
                .entry(event.repo.name.as_str())
                .or_default()
                .entry(event.kind.as_str())
                .or_default() += 1;
        }

        let entries = grouped
            .into_iter()
            .flat_map(|(repo, kinds)| {
                kinds.into_iter().map(move |(kind, count)| ActivityEntry {
                    repo: repo.to_string(),
                    kind: kind.to_string(),
                    count,
                })
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(ActivityEntry::describe)
    }
}
