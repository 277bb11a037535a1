use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{is_due_today, is_overdue};
use crate::error::EngineError;
use crate::model::category::CategoryId;
use crate::model::task::Task;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
    Overdue,
    Today,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Active,
        StatusFilter::Completed,
        StatusFilter::Overdue,
        StatusFilter::Today,
    ];

    pub fn matches<Tz: TimeZone>(self, task: &Task, now: &DateTime<Tz>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
            StatusFilter::Overdue => !task.completed && is_overdue(task.due_date, now),
            // completion does not matter here
            StatusFilter::Today => is_due_today(task.due_date, now),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
            StatusFilter::Overdue => "overdue",
            StatusFilter::Today => "today",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Tasks",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
            StatusFilter::Overdue => "Overdue",
            StatusFilter::Today => "Due Today",
        }
    }

    pub fn empty_title(self) -> &'static str {
        match self {
            StatusFilter::All => "No tasks yet",
            StatusFilter::Active => "All caught up!",
            StatusFilter::Completed => "No completed tasks yet",
            StatusFilter::Overdue => "No overdue tasks",
            StatusFilter::Today => "Nothing due today",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            StatusFilter::All => "Start by adding your first task to get organized.",
            StatusFilter::Active => "Great job! You have no active tasks right now.",
            StatusFilter::Completed => "Complete some tasks to see them here.",
            StatusFilter::Overdue => "Excellent! You're staying on top of your deadlines.",
            StatusFilter::Today => "No tasks are due today. Enjoy your day!",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            "overdue" => Ok(StatusFilter::Overdue),
            "today" => Ok(StatusFilter::Today),
            _ => Err(EngineError::invalid(
                "filter status",
                s,
                "all, active, completed, overdue, today",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub category_id: Option<CategoryId>,
}

impl FilterCriteria {
    pub fn new(status: StatusFilter) -> Self {
        Self {
            status,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn matches<Tz: TimeZone>(&self, task: &Task, now: &DateTime<Tz>) -> bool {
        if let Some(category_id) = self.category_id {
            if task.category_id != Some(category_id) {
                return false;
            }
        }
        self.status.matches(task, now)
    }
}

/// Tasks matching `criteria`, in input order.
pub fn filter_tasks<Tz: TimeZone>(tasks: &[Task], criteria: &FilterCriteria, now: &DateTime<Tz>) -> Vec<Task> {
    let selected: Vec<Task> = tasks
        .iter()
        .filter(|task| criteria.matches(task, now))
        .cloned()
        .collect();
    debug!(
        status = criteria.status.as_str(),
        category = ?criteria.category_id,
        matched = selected.len(),
        of = tasks.len(),
        "filtered tasks"
    );
    selected
}
