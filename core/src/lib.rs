pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use calendar::{format_due_date, is_due_this_week, is_due_today, is_overdue, DueStatus, TimeWindow, WeekStart};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, Settings};
pub use error::EngineError;
pub use filter::{filter_tasks, FilterCriteria, StatusFilter};
pub use input::{expand_key, parse_args, ParsedInput};
pub use model::category::{Category, CategoryDraft, CategoryId};
pub use model::stats::{CategoryCount, CompletionStats, Dashboard};
pub use model::strategy::{sort_tasks, SortKey};
pub use model::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
pub use repository::{CategoryRepository, FileStore, InMemoryStore, TaskRepository};
pub use service::category_service::{CategoryPatch, CategoryService};
pub use service::dto::TaskDto;
pub use service::task_service::TaskService;
pub use time::{parse_due_input, parse_due_phrase};
pub use usecase::board::{BoardUseCase, TaskBoard};
pub use usecase::progress::{category_counts, day_stats, overall_stats, week_stats, ProgressUseCase};
