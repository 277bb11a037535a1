mod render;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use taskdeck_core::{
    category_counts, parse_args, parse_due_input, BoardUseCase, CategoryDraft, CategoryId,
    CategoryPatch, CategoryService, FileStore, FilterCriteria, Priority, ProgressUseCase,
    Settings, SortKey, StatusFilter, SystemClock, Task, TaskDto, TaskId, TaskPatch, TaskService,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Organize tasks by category, due date and priority", long_about = None)]
struct Cli {
    /// Directory holding taskdeck.json (defaults to ~/.taskdeck)
    #[arg(long, global = true, env = "TASKDECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Settings file (defaults to ~/.taskdeck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task (usage: add Call client tomorrow pri:h cat:2)
    Add {
        /// Title words plus key:value metadata (due, category, priority, description)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List tasks
    List {
        /// all, active, completed, overdue or today
        #[arg(long, short)]
        status: Option<String>,
        /// created, dueDate, priority or title
        #[arg(long)]
        sort: Option<String>,
        /// Only tasks in this category
        #[arg(long, short)]
        category: Option<CategoryId>,
    },
    /// Toggle a task between done and not done
    Done { id: TaskId },
    /// Change fields of a task
    Edit {
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// A date (YYYY-MM-DD or a phrase like "friday"), or "none" to clear
        #[arg(long)]
        due: Option<String>,
        /// A category id, or "none" to clear
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task
    Rm { id: TaskId },
    /// Completion progress for today, this week and overall
    Stats,
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Create a category
    Add {
        name: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List categories with their task counts
    List,
    /// Change a category
    Edit {
        id: CategoryId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a category; its tasks become uncategorized
    Rm { id: CategoryId },
}

fn init_logging(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Treats "none" as an explicit clear, anything else as a new value.
fn clearable(raw: Option<String>) -> Option<Option<String>> {
    raw.map(|value| {
        if value.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(value)
        }
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?.with_data_dir(cli.data_dir);
    init_logging(&settings.log_level);
    debug!(?settings, "settings resolved");

    let store = FileStore::new(settings.data_dir.clone())?;
    let tasks = TaskService::new(&store, SystemClock);
    let categories = CategoryService::new(&store);

    let show = |task: Task| -> Result<()> {
        let now = tasks.now();
        let dto = TaskDto::from_entity(task, &categories.list_categories()?, &now, settings.week_start);
        render::show_task(&dto);
        Ok(())
    };

    match cli.command {
        Some(Commands::Add { args }) => {
            let parsed = parse_args(&args);
            if parsed.title.trim().is_empty() {
                bail!("Task title is required.");
            }
            let (draft, warnings) = parsed.into_draft(&tasks.now())?;
            for warning in warnings {
                eprintln!("Warning: {}", warning);
            }
            if let Some(id) = draft.category_id {
                categories.get_category(id)?;
            }

            let task = tasks.create_task(draft)?;
            println!("Task added (ID: {})", task.id);
            show(task)?;
        }
        Some(Commands::List {
            status,
            sort,
            category,
        }) => {
            let status: StatusFilter = match status {
                Some(raw) => raw.parse()?,
                None => StatusFilter::default(),
            };
            let sort: SortKey = match sort {
                Some(raw) => raw.parse()?,
                None => settings.default_sort,
            };
            let criteria = FilterCriteria::new(status).with_category(category);

            let board = BoardUseCase::new(&store, &store, settings.week_start).view(
                &criteria,
                sort,
                &tasks.now(),
            )?;
            render::show_board(&board);
        }
        Some(Commands::Done { id }) => {
            let task = tasks.toggle_completion(id)?;
            let state = if task.completed { "done" } else { "not done" };
            println!("Task {} marked {}.", task.id, state);
        }
        Some(Commands::Edit {
            id,
            title,
            priority,
            due,
            category,
            description,
        }) => {
            let now = tasks.now();
            let due_date = match clearable(due) {
                Some(Some(raw)) => match parse_due_input(&raw, &now) {
                    Some(date) => Some(Some(date)),
                    None => bail!("Invalid due date '{}'", raw),
                },
                Some(None) => Some(None),
                None => None,
            };
            let category_id = match clearable(category) {
                Some(Some(raw)) => {
                    let id: CategoryId = raw.parse()?;
                    categories.get_category(id)?;
                    Some(Some(id))
                }
                Some(None) => Some(None),
                None => None,
            };
            let patch = TaskPatch {
                title,
                description,
                category_id,
                priority: priority.map(|p| p.parse::<Priority>()).transpose()?,
                due_date,
            };
            if patch.is_empty() {
                println!("Nothing to change.");
                show(tasks.get_task(id)?)?;
                return Ok(());
            }

            let task = tasks.update_task(id, patch)?;
            println!("Task {} updated.", task.id);
            show(task)?;
        }
        Some(Commands::Rm { id }) => {
            tasks.delete_task(id)?;
            println!("Task {} deleted.", id);
        }
        Some(Commands::Stats) => {
            let dashboard = ProgressUseCase::new(&store, &store, settings.week_start)
                .dashboard(&tasks.now())?;
            render::show_dashboard(&dashboard);
        }
        Some(Commands::Category { command }) => match command {
            CategoryCommands::Add { name, color, icon } => {
                let category = categories.create_category(CategoryDraft { name, color, icon })?;
                println!("Category added: {} (ID: {})", category.name, category.id);
            }
            CategoryCommands::List => {
                let counts = category_counts(&tasks.list_tasks()?, &categories.list_categories()?);
                render::show_categories(&counts);
            }
            CategoryCommands::Edit {
                id,
                name,
                color,
                icon,
            } => {
                let category =
                    categories.update_category(id, CategoryPatch { name, color, icon })?;
                println!("Category {} updated: {}", category.id, category.name);
            }
            CategoryCommands::Rm { id } => {
                categories.delete_category(id)?;
                println!("Category {} deleted.", id);
            }
        },
        None => {
            let board = BoardUseCase::new(&store, &store, settings.week_start).view(
                &FilterCriteria::new(StatusFilter::Active),
                settings.default_sort,
                &tasks.now(),
            )?;
            render::show_board(&board);
        }
    }
    Ok(())
}
