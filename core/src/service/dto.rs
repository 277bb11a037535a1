use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{DueStatus, WeekStart};
use crate::model::category::{self, Category, CategoryId};
use crate::model::task::{Priority, Task, TaskId};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryTag {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl From<&Category> for CategoryTag {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            icon: category.icon.clone(),
        }
    }
}

/// A task as the presentation layer shows it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskDto {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    // None for uncategorized and for ids with no matching category
    pub category: Option<CategoryTag>,
    pub due_date: Option<NaiveDate>,
    pub due_status: DueStatus,
    pub due_label: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskDto {
    pub fn from_entity<Tz: TimeZone>(
        task: Task,
        categories: &[Category],
        now: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> Self {
        let due_status = DueStatus::of(task.due_date, now, week_start);
        let due_label = due_status.label(task.due_date, now, week_start);
        let category = category::resolve(categories, task.category_id).map(CategoryTag::from);

        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            category,
            due_date: task.due_date,
            due_status,
            due_label,
            completed: task.completed,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}
