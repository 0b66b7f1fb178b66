use clap::{Parser, Subcommand, ValueEnum};
use habita_core::models::Priority;

/// A daily task and habit tracker built on recurring templates
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// Show today's tasks
    List(ListCommand),
    /// Show tasks scheduled on a specific date
    Calendar(CalendarCommand),
    /// Mark a task as completed
    Do(DoCommand),
    /// Clear a task's completion
    Undo(UndoCommand),
    /// Reschedule a task
    Move(MoveCommand),
    /// Edit a task or template
    Edit(EditCommand),
    /// Delete a task (occurrences included for templates)
    Delete(DeleteCommand),
    /// Show today's completion statistics
    Stats,
    /// Manage categories
    Category(CategoryCommand),
    /// Show tasks whose time is coming up
    Remind,
    /// Generate today's occurrences without listing
    Generate,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// The category ID of the task
    #[clap(short, long)]
    pub category: Option<i64>,
    /// The priority of the task
    #[clap(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Estimated effort in minutes
    #[clap(short = 't', long)]
    pub time: Option<u32>,
    /// The date the task is for (YYYY-MM-DD, today, tomorrow)
    #[clap(long)]
    pub date: Option<String>,
    /// Wall-clock time of day (HH:MM)
    #[clap(long)]
    pub at: Option<String>,
    /// Recurrence frequency
    #[clap(long, value_enum)]
    pub every: Option<FrequencyArg>,
    /// Days of week for weekly recurrence (0=Mon .. 6=Sun, e.g. "1,3")
    #[clap(long, requires = "every")]
    pub on: Option<String>,
    /// Last date the recurrence fires on (YYYY-MM-DD)
    #[clap(long, requires = "every")]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Also show tasks scheduled on other days
    #[clap(short, long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CalendarCommand {
    /// The date to show (YYYY-MM-DD, today, tomorrow)
    pub date: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DoCommand {
    /// The ID of the task to mark as completed
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct UndoCommand {
    /// The ID of the task to clear
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct MoveCommand {
    /// The ID of the task to reschedule
    pub id: i64,
    /// The requested date (YYYY-MM-DD, today, tomorrow)
    pub date: String,
    /// New wall-clock time of day (HH:MM)
    #[clap(long)]
    pub at: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long, conflicts_with = "category")]
    pub category_clear: bool,

    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Estimated effort in minutes
    #[arg(long)]
    pub time: Option<u32>,

    /// Recurrence frequency (templates only)
    #[arg(long, value_enum)]
    pub every: Option<FrequencyArg>,
    #[arg(long, conflicts_with = "every", help = "Remove recurrence")]
    pub every_clear: bool,

    /// Days of week for weekly recurrence (0=Mon .. 6=Sun)
    #[arg(long)]
    pub on: Option<String>,

    /// Last date the recurrence fires on (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,
    #[arg(long, conflicts_with = "until")]
    pub until_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategorySubcommand {
    /// Add a new category
    Add(CategoryAddCommand),
    /// List categories
    List,
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryAddCommand {
    /// The name of the category
    pub name: String,
    /// Hex display color
    #[clap(long)]
    pub color: Option<String>,
    /// Display icon
    #[clap(long)]
    pub icon: Option<String>,
}
