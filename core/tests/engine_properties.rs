//! Property tests for filtering and sorting over arbitrary task lists.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use taskdeck_core::{filter_tasks, sort_tasks, FilterCriteria, Priority, SortKey, StatusFilter, Task};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn arb_status() -> impl Strategy<Value = StatusFilter> {
    prop::sample::select(StatusFilter::ALL.to_vec())
}

/// Strategy for a task list with unique ids. Small value ranges on purpose,
/// so equal keys (and therefore tie-breaking) come up often.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(
        (
            "[a-cA-C]{1,3}",
            arb_priority(),
            prop::option::of(-3i64..4),
            any::<bool>(),
            0i64..5,
            prop::option::of(1u64..4),
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (title, priority, due_offset, completed, age_days, category))| {
                let mut task = Task::new(i as u64 + 1, title, now() - Duration::days(age_days));
                task.priority = priority;
                task.due_date = due_offset.map(|d| now().date_naive() + Duration::days(d));
                task.set_completed(completed, now());
                task.category_id = category;
                task
            })
            .collect()
    })
}

fn ids(tasks: &[Task]) -> Vec<u64> {
    tasks.iter().map(|t| t.id).collect()
}

proptest! {
    #[test]
    fn filter_all_is_identity(tasks in arb_tasks()) {
        let filtered = filter_tasks(&tasks, &FilterCriteria::new(StatusFilter::All), &now());
        prop_assert_eq!(filtered, tasks);
    }

    #[test]
    fn active_and_completed_partition(tasks in arb_tasks()) {
        let active: HashSet<u64> =
            ids(&filter_tasks(&tasks, &FilterCriteria::new(StatusFilter::Active), &now())).into_iter().collect();
        let completed: HashSet<u64> =
            ids(&filter_tasks(&tasks, &FilterCriteria::new(StatusFilter::Completed), &now())).into_iter().collect();
        let all: HashSet<u64> = ids(&tasks).into_iter().collect();

        prop_assert!(active.is_disjoint(&completed));
        prop_assert_eq!(active.union(&completed).cloned().collect::<HashSet<u64>>(), all);
    }

    #[test]
    fn filter_preserves_relative_order(tasks in arb_tasks(), status in arb_status(), category in prop::option::of(1u64..4)) {
        let criteria = FilterCriteria::new(status).with_category(category);
        let filtered = ids(&filter_tasks(&tasks, &criteria, &now()));
        let expected: Vec<u64> = tasks
            .iter()
            .filter(|t| filtered.contains(&t.id))
            .map(|t| t.id)
            .collect();
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn overdue_tasks_are_never_completed(tasks in arb_tasks()) {
        let overdue = filter_tasks(&tasks, &FilterCriteria::new(StatusFilter::Overdue), &now());
        let today = now().date_naive();
        for task in overdue {
            prop_assert!(!task.completed);
            prop_assert!(task.due_date.is_some_and(|d: NaiveDate| d < today));
        }
    }

    #[test]
    fn sort_is_idempotent(tasks in arb_tasks(), key in arb_sort_key()) {
        let once = sort_tasks(&tasks, key);
        let twice = sort_tasks(&once, key);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sort_is_a_permutation(tasks in arb_tasks(), key in arb_sort_key()) {
        let mut sorted = ids(&sort_tasks(&tasks, key));
        let mut input = ids(&tasks);
        sorted.sort_unstable();
        input.sort_unstable();
        prop_assert_eq!(sorted, input);
    }

    #[test]
    fn priority_sort_is_stable(tasks in arb_tasks()) {
        let sorted = sort_tasks(&tasks, SortKey::Priority);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].priority.weight() >= pair[1].priority.weight());
        }
        for priority in [Priority::High, Priority::Medium, Priority::Low] {
            let before: Vec<u64> = tasks.iter().filter(|t| t.priority == priority).map(|t| t.id).collect();
            let after: Vec<u64> = sorted.iter().filter(|t| t.priority == priority).map(|t| t.id).collect();
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn due_sort_puts_undated_last_in_input_order(tasks in arb_tasks()) {
        let sorted = sort_tasks(&tasks, SortKey::DueDate);
        let first_undated = sorted.iter().position(|t| t.due_date.is_none()).unwrap_or(sorted.len());
        prop_assert!(sorted[first_undated..].iter().all(|t| t.due_date.is_none()));

        let undated_before: Vec<u64> = tasks.iter().filter(|t| t.due_date.is_none()).map(|t| t.id).collect();
        prop_assert_eq!(ids(&sorted[first_undated..]), undated_before);
    }
}
