//! Completion statistics for the dashboard.
//!
//! Day and week windows are keyed on `created_at`, never on the due date:
//! the numbers track progress on work that was added in the period.

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use tracing::debug;

use crate::calendar::{TimeWindow, WeekStart};
use crate::model::category::Category;
use crate::model::stats::{CategoryCount, CompletionStats, Dashboard};
use crate::model::task::Task;
use crate::repository::{CategoryRepository, TaskRepository};

pub fn day_stats<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> CompletionStats {
    window_stats(tasks, &TimeWindow::day(now))
}

pub fn week_stats<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>, week_start: WeekStart) -> CompletionStats {
    window_stats(tasks, &TimeWindow::week(now, week_start))
}

pub fn overall_stats(tasks: &[Task]) -> CompletionStats {
    count(tasks.iter())
}

fn window_stats<Tz: TimeZone>(tasks: &[Task], window: &TimeWindow<Tz>) -> CompletionStats {
    let stats = count(tasks.iter().filter(|t| window.contains(&t.created_at)));
    debug!(start = %window.start, end = %window.end, ?stats, "window stats");
    stats
}

fn count<'a>(tasks: impl Iterator<Item = &'a Task>) -> CompletionStats {
    let (completed, total) = tasks.fold((0, 0), |(completed, total), task| {
        (completed + usize::from(task.completed), total + 1)
    });
    CompletionStats::from_counts(completed, total)
}

/// Tasks per known category, in category order. Uncategorized tasks and
/// tasks pointing at a missing category are not counted anywhere.
pub fn category_counts(tasks: &[Task], categories: &[Category]) -> Vec<CategoryCount> {
    categories
        .iter()
        .map(|category| CategoryCount {
            category: category.clone(),
            count: tasks
                .iter()
                .filter(|t| t.category_id == Some(category.id))
                .count(),
        })
        .collect()
}

pub fn dashboard<Tz: TimeZone>(
    tasks: &[Task],
    categories: &[Category],
    now: &DateTime<Tz>,
    week_start: WeekStart,
) -> Dashboard {
    Dashboard {
        today: day_stats(tasks, now),
        this_week: week_stats(tasks, now, week_start),
        overall: overall_stats(tasks),
        categories: category_counts(tasks, categories),
    }
}

pub struct ProgressUseCase<'a, R: TaskRepository, C: CategoryRepository> {
    task_repo: &'a R,
    category_repo: &'a C,
    week_start: WeekStart,
}

impl<'a, R: TaskRepository, C: CategoryRepository> ProgressUseCase<'a, R, C> {
    pub fn new(task_repo: &'a R, category_repo: &'a C, week_start: WeekStart) -> Self {
        Self {
            task_repo,
            category_repo,
            week_start,
        }
    }

    pub fn dashboard<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Dashboard> {
        let tasks = self.task_repo.list()?;
        let categories = self.category_repo.list()?;
        Ok(dashboard(&tasks, &categories, now, self.week_start))
    }
}
