use std::path::PathBuf;

use crate::{
    store::{RecordId, RecordStore, StoreError},
    utils::clock::Clock,
};

use super::{Task, TaskStatus};

/// Owns the task document for the duration of a single command.
pub struct TaskTracker {
    store: RecordStore<Task>,
    clock: Box<dyn Clock>,
}

impl TaskTracker {
    pub fn open(path: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Result<Self, StoreError> {
        Ok(Self {
            store: RecordStore::load(path)?,
            clock,
        })
    }

    /// Creates a `todo` task.
    pub fn add(&mut self, description: &str) -> Result<RecordId, StoreError> {
        let description = validate_description(description)?;
        let now = self.clock.time();
        self.store.insert_with(|id| Task {
            id,
            description,
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update(&mut self, id: RecordId, description: &str) -> Result<&Task, StoreError> {
        let now = self.clock.time();
        self.store.update(id, |task| {
            task.description = validate_description(description)?;
            task.updated_at = now;
            Ok(())
        })
    }

    pub fn mark(&mut self, id: RecordId, status: TaskStatus) -> Result<&Task, StoreError> {
        let now = self.clock.time();
        self.store.update(id, |task| {
            task.status = status;
            task.updated_at = now;
            Ok(())
        })
    }

    pub fn delete(&mut self, id: RecordId) -> Result<Task, StoreError> {
        self.store.remove(id)
    }

    /// Tasks in ascending ID order, optionally only those with `status`.
    pub fn list(&self, status: Option<TaskStatus>) -> Vec<&Task> {
        self.store
            .iter()
            .filter(|v| status.map_or(true, |status| v.status == status))
            .collect()
    }
}

fn validate_description(description: &str) -> Result<String, StoreError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(StoreError::validation("Task description can't be empty"));
    }
    Ok(description.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use chrono::{Duration, Local, TimeZone};
    use tempfile::tempdir;

    use crate::{
        store::StoreError,
        task::TaskStatus,
        utils::{clock::MockClock, logging::TEST_LOGGING},
    };

    use super::TaskTracker;

    /// Every call to the clock moves time forward by a minute.
    fn ticking_clock() -> Box<MockClock> {
        let start = Local.with_ymd_and_hms(2024, 8, 15, 9, 0, 0).unwrap();
        let mut ticks = 0;
        let mut clock = MockClock::new();
        clock.expect_time().returning(move || {
            ticks += 1;
            start + Duration::minutes(ticks)
        });
        Box::new(clock)
    }

    #[test]
    fn test_add_then_mark_done() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let mut tracker = TaskTracker::open(dir.path().join("db.json"), ticking_clock())?;

        let id = tracker.add("Buy milk")?;
        assert_eq!(id, 1);
        let task = tracker.list(None)[0].clone();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.created_at, task.updated_at);

        let done = tracker.mark(id, TaskStatus::Done)?;
        assert_eq!(done.status, TaskStatus::Done);
        assert!(done.updated_at > done.created_at);

        assert!(tracker.list(Some(TaskStatus::Todo)).is_empty());
        Ok(())
    }

    #[test]
    fn test_transitions_are_unrestricted() -> Result<()> {
        let dir = tempdir()?;
        let mut tracker = TaskTracker::open(dir.path().join("db.json"), ticking_clock())?;
        let id = tracker.add("Write report")?;

        for status in [
            TaskStatus::Done,
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Todo,
        ] {
            assert_eq!(tracker.mark(id, status)?.status, status);
        }
        Ok(())
    }

    #[test]
    fn test_list_by_status_is_ordered() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("db.json");
        let stamp = "2024-08-15T10:00:00+00:00";
        let document = [3, 1, 2, 4]
            .into_iter()
            .map(|id| {
                let status = if id == 4 { "todo" } else { "done" };
                format!(
                    r#""{id}": {{"id": {id}, "description": "task {id}", "status": "{status}", "createdAt": "{stamp}", "updatedAt": "{stamp}"}}"#
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        fs::write(&path, format!("{{{document}}}"))?;

        let tracker = TaskTracker::open(&path, ticking_clock())?;
        let done = tracker
            .list(Some(TaskStatus::Done))
            .into_iter()
            .map(|v| v.id)
            .collect::<Vec<_>>();

        assert_eq!(done, vec![1, 2, 3]);
        assert_eq!(tracker.list(None).len(), 4);
        Ok(())
    }

    #[test]
    fn test_update_description() -> Result<()> {
        let dir = tempdir()?;
        let mut tracker = TaskTracker::open(dir.path().join("db.json"), ticking_clock())?;
        let id = tracker.add("Buy groceries")?;

        let updated = tracker.update(id, "  Buy groceries and cook dinner ")?;
        assert_eq!(updated.description, "Buy groceries and cook dinner");
        assert_eq!(updated.status, TaskStatus::Todo);

        assert!(matches!(
            tracker.update(id, "   "),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(tracker.list(None)[0].description, "Buy groceries and cook dinner");
        Ok(())
    }

    #[test]
    fn test_missing_ids() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("db.json");
        let mut tracker = TaskTracker::open(&path, ticking_clock())?;
        tracker.add("Only task")?;
        let before = fs::read(&path)?;

        assert!(matches!(tracker.update(9, "x"), Err(StoreError::NotFound(9))));
        assert!(matches!(
            tracker.mark(9, TaskStatus::Done),
            Err(StoreError::NotFound(9))
        ));
        assert!(matches!(tracker.delete(9), Err(StoreError::NotFound(9))));
        assert!(matches!(tracker.add(""), Err(StoreError::Validation(_))));
        assert_eq!(fs::read(&path)?, before);
        Ok(())
    }

    #[test]
    fn test_delete_then_reopen() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("db.json");
        let mut tracker = TaskTracker::open(&path, ticking_clock())?;
        tracker.add("one")?;
        tracker.add("two")?;
        tracker.delete(1)?;
        drop(tracker);

        let mut tracker = TaskTracker::open(&path, ticking_clock())?;
        let remaining = tracker.list(None).into_iter().map(|v| v.id).collect::<Vec<_>>();
        assert_eq!(remaining, vec![2]);
        assert_eq!(tracker.add("three")?, 3);
        Ok(())
    }
}
