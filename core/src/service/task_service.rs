use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::EngineError;
use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::repository::TaskRepository;
use crate::time::parse_due_phrase;

/// Store-side task mutations. Reads "now" from the clock and passes it on.
pub struct TaskService<R: TaskRepository, K: Clock> {
    repo: R,
    clock: K,
}

impl<R: TaskRepository, K: Clock> TaskService<R, K> {
    pub fn new(repo: R, clock: K) -> Self {
        Self { repo, clock }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    /// Creates a task. A date phrase in the title ("call mom friday") takes
    /// precedence over `draft.due_date`.
    pub fn create_task(&self, mut draft: TaskDraft) -> Result<Task> {
        draft.title = draft.title.trim().to_string();
        if draft.title.is_empty() {
            return Err(EngineError::EmptyTitle.into());
        }

        let now = self.clock.now();
        if let Some(due) = parse_due_phrase(&draft.title, &now) {
            debug!(title = %draft.title, %due, "due date taken from title");
            draft.due_date = Some(due);
        }

        self.repo.create(draft, now.with_timezone(&Utc))
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.repo.list()
    }

    pub fn get_task(&self, id: TaskId) -> Result<Task> {
        self.repo.get(id)
    }

    /// Applies `patch`. A new title is re-read for a date phrase, which wins
    /// over `patch.due_date` the same way it does on creation.
    pub fn update_task(&self, id: TaskId, mut patch: TaskPatch) -> Result<Task> {
        if let Some(title) = patch.title.as_mut() {
            *title = title.trim().to_string();
            if title.is_empty() {
                return Err(EngineError::EmptyTitle.into());
            }
            if let Some(due) = parse_due_phrase(title, &self.clock.now()) {
                debug!(id, title = %title, %due, "due date taken from edited title");
                patch.due_date = Some(Some(due));
            }
        }

        let mut task = self.repo.get(id)?;
        task.apply(patch);
        self.repo.update(&task)?;
        Ok(task)
    }

    pub fn set_completion(&self, id: TaskId, completed: bool) -> Result<Task> {
        let mut task = self.repo.get(id)?;
        task.set_completed(completed, self.clock.now().with_timezone(&Utc));
        self.repo.update(&task)?;
        info!(id, completed = task.completed, "completion changed");
        Ok(task)
    }

    pub fn toggle_completion(&self, id: TaskId) -> Result<Task> {
        let task = self.repo.get(id)?;
        self.set_completion(id, !task.completed)
    }

    pub fn delete_task(&self, id: TaskId) -> Result<()> {
        self.repo.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::filter::{filter_tasks, FilterCriteria, StatusFilter};
    use crate::model::task::Priority;
    use crate::repository::InMemoryStore;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn monday() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 10, 9, 0, 0)
            .unwrap()
    }

    fn service<'a>(
        store: &'a InMemoryStore,
        clock: &'a FixedClock,
    ) -> TaskService<&'a InMemoryStore, &'a FixedClock> {
        TaskService::new(store, clock)
    }

    #[test]
    fn test_create_task_infers_due_date_from_title() {
        let store = InMemoryStore::new();
        let clock = FixedClock::new(monday());
        let tasks = service(&store, &clock);

        let created = tasks.create_task(TaskDraft::new("  Call client tomorrow ")).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.title, "Call client tomorrow");
        assert_eq!(created.due_date, NaiveDate::from_ymd_opt(2024, 6, 11));
        assert_eq!(created.created_at, monday().with_timezone(&Utc));
        assert_eq!(created.priority, Priority::Medium);
        assert!(!created.completed);
    }

    #[test]
    fn test_title_phrase_beats_explicit_due_date() {
        let store = InMemoryStore::new();
        let clock = FixedClock::new(monday());
        let tasks = service(&store, &clock);

        let mut draft = TaskDraft::new("Meeting friday");
        draft.due_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        assert_eq!(
            tasks.create_task(draft).unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 6, 14)
        );

        let mut draft = TaskDraft::new("Plain title");
        draft.due_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        assert_eq!(
            tasks.create_task(draft).unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 7, 1)
        );
    }

    #[test]
    fn test_empty_title_rejected() {
        let store = InMemoryStore::new();
        let clock = FixedClock::new(monday());
        let err = service(&store, &clock).create_task(TaskDraft::new("   ")).unwrap_err();
        assert_eq!(err.downcast_ref::<EngineError>(), Some(&EngineError::EmptyTitle));
    }

    #[test]
    fn test_toggle_completion_maintains_completed_at() {
        let store = InMemoryStore::new();
        let clock = FixedClock::new(monday());
        let tasks = service(&store, &clock);
        let created = tasks.create_task(TaskDraft::new("Write docs")).unwrap();

        clock.advance(Duration::hours(2));
        let done = tasks.toggle_completion(created.id).unwrap();
        assert!(done.completed);
        assert_eq!(done.completed_at, Some((monday() + Duration::hours(2)).with_timezone(&Utc)));

        let reopened = tasks.toggle_completion(created.id).unwrap();
        assert!(!reopened.completed);
        assert_eq!(reopened.completed_at, None);
        assert_eq!(tasks.get_task(created.id).unwrap(), reopened);
    }

    #[test]
    fn test_overdue_task_leaves_filter_once_completed() {
        let store = InMemoryStore::new();
        let clock = FixedClock::new(monday());
        let tasks = service(&store, &clock);

        let mut draft = TaskDraft::new("File taxes");
        draft.due_date = NaiveDate::from_ymd_opt(2024, 6, 9);
        let created = tasks.create_task(draft).unwrap();

        let overdue = FilterCriteria::new(StatusFilter::Overdue);
        let all = tasks.list_tasks().unwrap();
        assert_eq!(filter_tasks(&all, &overdue, &clock.now()).len(), 1);

        tasks.set_completion(created.id, true).unwrap();
        let all = tasks.list_tasks().unwrap();
        assert!(filter_tasks(&all, &overdue, &clock.now()).is_empty());
    }

    #[test]
    fn test_update_task() {
        let store = InMemoryStore::new();
        let clock = FixedClock::new(monday());
        let tasks = service(&store, &clock);
        let created = tasks.create_task(TaskDraft::new("Draft plan")).unwrap();

        let updated = tasks
            .update_task(
                created.id,
                TaskPatch {
                    title: Some(" Final plan ".to_string()),
                    priority: Some(Priority::High),
                    category_id: Some(Some(4)),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Final plan");
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.category_id, Some(4));
        assert_eq!(updated.created_at, created.created_at);

        let blank = TaskPatch {
            title: Some(String::new()),
            ..TaskPatch::default()
        };
        assert!(tasks.update_task(created.id, blank).is_err());
    }

    #[test]
    fn test_edited_title_phrase_sets_due_date() {
        let store = InMemoryStore::new();
        let clock = FixedClock::new(monday());
        let tasks = service(&store, &clock);
        let mut draft = TaskDraft::new("Dentist");
        draft.due_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        let created = tasks.create_task(draft).unwrap();

        let renamed = tasks
            .update_task(
                created.id,
                TaskPatch {
                    title: Some("Dentist thursday".to_string()),
                    due_date: Some(NaiveDate::from_ymd_opt(2024, 8, 1)),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.due_date, NaiveDate::from_ymd_opt(2024, 6, 13));

        // no phrase: the explicit date stands, and an untouched title keeps its date
        let plain = tasks
            .update_task(
                created.id,
                TaskPatch {
                    title: Some("Dentist visit".to_string()),
                    due_date: Some(NaiveDate::from_ymd_opt(2024, 8, 1)),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(plain.due_date, NaiveDate::from_ymd_opt(2024, 8, 1));

        let reprioritized = tasks
            .update_task(
                created.id,
                TaskPatch {
                    priority: Some(Priority::Low),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(reprioritized.due_date, NaiveDate::from_ymd_opt(2024, 8, 1));
    }

    #[test]
    fn test_delete_unknown_task() {
        let store = InMemoryStore::new();
        let clock = FixedClock::new(monday());
        let err = service(&store, &clock).delete_task(9).unwrap_err();
        assert_eq!(err.downcast_ref::<EngineError>(), Some(&EngineError::TaskNotFound(9)));
    }
}
