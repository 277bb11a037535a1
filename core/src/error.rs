use thiserror::Error;

use crate::model::category::CategoryId;
use crate::model::task::TaskId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid {kind}: '{value}' (expected one of: {expected})")]
    InvalidArgument {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("category name must not be empty")]
    EmptyName,
}

impl EngineError {
    pub(crate) fn invalid(kind: &'static str, value: &str, expected: &'static str) -> Self {
        EngineError::InvalidArgument {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
