use anyhow::Result;
use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::calendar::WeekStart;
use crate::filter::{filter_tasks, FilterCriteria};
use crate::model::category;
use crate::model::strategy::{sort_tasks, SortKey};
use crate::repository::{CategoryRepository, TaskRepository};
use crate::service::dto::TaskDto;

/// The filtered, sorted task list plus the headings that go with it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TaskBoard {
    pub title: String,
    pub filter_label: &'static str,
    pub sort_label: &'static str,
    pub rows: Vec<TaskDto>,
    /// Set only when `rows` is empty.
    pub empty_state: Option<(&'static str, &'static str)>,
}

pub struct BoardUseCase<'a, R: TaskRepository, C: CategoryRepository> {
    task_repo: &'a R,
    category_repo: &'a C,
    week_start: WeekStart,
}

impl<'a, R: TaskRepository, C: CategoryRepository> BoardUseCase<'a, R, C> {
    pub fn new(task_repo: &'a R, category_repo: &'a C, week_start: WeekStart) -> Self {
        Self {
            task_repo,
            category_repo,
            week_start,
        }
    }

    /// Filter first, then sort; rows are meant to be shown in the returned order.
    pub fn view<Tz: TimeZone>(
        &self,
        criteria: &FilterCriteria,
        sort: SortKey,
        now: &DateTime<Tz>,
    ) -> Result<TaskBoard> {
        let tasks = self.task_repo.list()?;
        let categories = self.category_repo.list()?;

        let selected = filter_tasks(&tasks, criteria, now);
        let rows: Vec<TaskDto> = sort_tasks(&selected, sort)
            .into_iter()
            .map(|task| TaskDto::from_entity(task, &categories, now, self.week_start))
            .collect();

        let title = match category::resolve(&categories, criteria.category_id) {
            Some(category) => format!("{} Tasks", category.name),
            None => "All Tasks".to_string(),
        };
        let empty_state = rows
            .is_empty()
            .then(|| (criteria.status.empty_title(), criteria.status.empty_message()));

        Ok(TaskBoard {
            title,
            filter_label: criteria.status.label(),
            sort_label: sort.label(),
            rows,
            empty_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::StatusFilter;
    use crate::model::category::{Category, CategoryDraft};
    use crate::model::task::{Priority, Task};
    use crate::repository::InMemoryStore;
    use chrono::{Duration, NaiveDate, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn store() -> InMemoryStore {
        let base = now() - Duration::days(2);
        let mut report = Task::new(1, "Report", base);
        report.category_id = Some(1);
        report.priority = Priority::Low;
        let mut deploy = Task::new(2, "Deploy", base + Duration::hours(1));
        deploy.category_id = Some(1);
        deploy.priority = Priority::High;
        deploy.due_date = NaiveDate::from_ymd_opt(2024, 6, 12);
        let mut groceries = Task::new(3, "Groceries", base + Duration::hours(2));
        groceries.category_id = Some(2);
        groceries.set_completed(true, now());

        InMemoryStore::with_seed(
            vec![report, deploy, groceries],
            vec![
                Category::from_draft(1, CategoryDraft::new("Work"), 0),
                Category::from_draft(2, CategoryDraft::new("Home"), 1),
            ],
        )
    }

    #[test]
    fn test_view_filters_then_sorts() {
        let store = store();
        let board = BoardUseCase::new(&store, &store, WeekStart::Sunday);
        let criteria = FilterCriteria::new(StatusFilter::Active).with_category(Some(1));

        let view = board.view(&criteria, SortKey::Priority, &now()).unwrap();
        assert_eq!(view.title, "Work Tasks");
        assert_eq!(view.filter_label, "Active");
        assert_eq!(view.sort_label, "Priority");
        let titles: Vec<&str> = view.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Deploy", "Report"]);
        assert_eq!(view.rows[0].due_label.as_deref(), Some("Wednesday"));
        assert!(view.empty_state.is_none());
    }

    #[test]
    fn test_view_reports_empty_state() {
        let store = store();
        let board = BoardUseCase::new(&store, &store, WeekStart::Sunday);
        let view = board
            .view(&FilterCriteria::new(StatusFilter::Overdue), SortKey::Created, &now())
            .unwrap();
        assert_eq!(view.title, "All Tasks");
        assert!(view.rows.is_empty());
        assert_eq!(
            view.empty_state,
            Some(("No overdue tasks", "Excellent! You're staying on top of your deadlines."))
        );
    }
}
