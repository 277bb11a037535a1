use serde::{Deserialize, Serialize};

use crate::model::category::Category;

/// Completion counts over some set of tasks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

impl CompletionStats {
    /// `percentage` is `completed / total * 100` rounded half up, and 0 for an empty set.
    pub fn from_counts(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            // floor(100c/t + 1/2) without going through f64
            ((200 * completed + total) / (2 * total)) as u32
        };
        Self {
            total,
            completed,
            percentage,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub today: CompletionStats,
    pub this_week: CompletionStats,
    pub overall: CompletionStats,
    pub categories: Vec<CategoryCount>,
}
