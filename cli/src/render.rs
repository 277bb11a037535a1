use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskdeck_core::{CategoryCount, CompletionStats, Dashboard, TaskBoard, TaskDto};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "")]
    done: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: &'static str,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&TaskDto> for TaskRow {
    fn from(dto: &TaskDto) -> Self {
        Self {
            id: dto.id,
            done: if dto.completed { "x" } else { " " },
            title: dto.title.clone(),
            priority: dto.priority.as_str(),
            due: dto.due_label.clone().unwrap_or_else(|| "-".to_string()),
            category: dto
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Tasks")]
    tasks: usize,
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn show_board(board: &TaskBoard) {
    println!(
        "\x1b[1;36m{}\x1b[0m  [{}] sorted by {}",
        board.title, board.filter_label, board.sort_label
    );

    if let Some((title, message)) = board.empty_state {
        println!("{}\n{}", title, message);
        return;
    }

    let rows: Vec<TaskRow> = board.rows.iter().map(TaskRow::from).collect();
    println!("{}", styled(Table::new(rows)));
}

pub fn show_task(dto: &TaskDto) {
    println!("{}", styled(Table::new([TaskRow::from(dto)])));
    if !dto.description.is_empty() {
        println!("  {}", dto.description);
    }
}

pub fn show_categories(counts: &[CategoryCount]) {
    if counts.is_empty() {
        println!("No categories yet.");
        return;
    }
    let rows: Vec<CategoryRow> = counts
        .iter()
        .map(|c| CategoryRow {
            id: c.category.id,
            name: c.category.name.clone(),
            color: c.category.color.clone(),
            icon: c.category.icon.clone(),
            tasks: c.count,
        })
        .collect();
    println!("{}", styled(Table::new(rows)));
}

fn progress_line(label: &str, stats: &CompletionStats) -> String {
    format!(
        "{:<10} {:>3}%  ({}/{} done)",
        label, stats.percentage, stats.completed, stats.total
    )
}

pub fn show_dashboard(dashboard: &Dashboard) {
    println!("\x1b[1mProgress\x1b[0m");
    println!("{}", progress_line("Today:", &dashboard.today));
    println!("{}", progress_line("This week:", &dashboard.this_week));
    println!("{}", progress_line("Overall:", &dashboard.overall));

    if !dashboard.categories.is_empty() {
        println!();
        show_categories(&dashboard.categories);
    }
}
