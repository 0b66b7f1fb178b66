use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type TaskId = i64;
pub type CategoryId = i64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

impl Priority {
    /// Boundary parse that fails closed to the source default.
    pub fn lenient(s: &str) -> Self {
        s.parse().unwrap_or(Priority::Medium)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence frequency: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Frequency::None),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

impl Frequency {
    /// Boundary parse: an unknown frequency degrades to `None` rather
    /// than rejecting the record.
    pub fn lenient(s: &str) -> Self {
        s.parse().unwrap_or(Frequency::None)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::None => write!(f, "none"),
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

/// Set of weekdays a weekly rule fires on, numbered 0 (Monday) through
/// 6 (Sunday). Stored on the wire as a comma-separated list ("1,3").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Weekdays(u8);

impl Weekdays {
    pub fn empty() -> Self {
        Weekdays(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, day: u8) {
        if day <= 6 {
            self.0 |= 1 << day;
        }
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }

    /// Fail-closed parse: any malformed entry empties the whole set, so
    /// a weekly rule with garbage weekdays never fires.
    pub fn lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid weekday list: {0}")]
pub struct ParseWeekdaysError(String);

impl FromStr for Weekdays {
    type Err = ParseWeekdaysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut days = Weekdays::empty();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let day: u8 = part
                .parse()
                .map_err(|_| ParseWeekdaysError(s.to_string()))?;
            if day > 6 {
                return Err(ParseWeekdaysError(s.to_string()));
            }
            days.insert(day);
        }
        Ok(days)
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in 0..7u8 {
            if self.0 & (1 << day) != 0 {
                if !first {
                    write!(f, ",")?;
                }
                write!(f, "{}", day)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl Serialize for Weekdays {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Weekdays {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.map(|s| Weekdays::lenient(&s)).unwrap_or_default())
    }
}

/// A recurrence rule: frequency plus its weekly day set and the optional
/// inclusive end date after which no further occurrences are generated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Recurrence {
    #[serde(default)]
    pub freq: Frequency,
    #[serde(default)]
    pub weekdays: Weekdays,
    #[serde(default)]
    pub until: Option<NaiveDate>,
}

impl Recurrence {
    pub fn none() -> Self {
        Recurrence::default()
    }

    pub fn daily() -> Self {
        Recurrence {
            freq: Frequency::Daily,
            ..Default::default()
        }
    }

    pub fn weekly(weekdays: Weekdays) -> Self {
        Recurrence {
            freq: Frequency::Weekly,
            weekdays,
            ..Default::default()
        }
    }

    pub fn monthly() -> Self {
        Recurrence {
            freq: Frequency::Monthly,
            ..Default::default()
        }
    }

    pub fn is_none(&self) -> bool {
        self.freq == Frequency::None
    }
}

/// Explicit record role, replacing the source's duck-typing on
/// `original_task_id` nullness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum TaskRole {
    /// A user-created record: a plain one-off task when `recurrence` is
    /// none, a generating template otherwise.
    Source { recurrence: Recurrence },
    /// A record generated from a template for a specific date. Once
    /// `is_exception` is set the occurrence is permanently detached from
    /// template-driven regeneration.
    Occurrence {
        template_id: TaskId,
        is_exception: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub priority: Priority,
    /// Estimated effort in minutes.
    #[serde(default)]
    pub estimated_time: u32,
    /// The date the task is intended for; falls back to `created_at`.
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    /// Optional HH:MM wall-clock time, used for sorting and reminders.
    #[serde(default, with = "hhmm")]
    pub time_of_day: Option<NaiveTime>,
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDate,
    #[serde(flatten)]
    pub role: TaskRole,
}

impl Task {
    /// The date classification runs against: the scheduled date when
    /// set, the creation date otherwise.
    pub fn effective_date(&self) -> NaiveDate {
        self.scheduled_date.unwrap_or(self.created_at)
    }

    /// True for a source record with an active recurrence; templates
    /// never display directly, they only produce occurrences.
    pub fn is_template(&self) -> bool {
        matches!(&self.role, TaskRole::Source { recurrence } if !recurrence.is_none())
    }

    pub fn recurrence(&self) -> Option<&Recurrence> {
        match &self.role {
            TaskRole::Source { recurrence } => Some(recurrence),
            TaskRole::Occurrence { .. } => None,
        }
    }

    pub fn template_id(&self) -> Option<TaskId> {
        match &self.role {
            TaskRole::Occurrence { template_id, .. } => Some(*template_id),
            TaskRole::Source { .. } => None,
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(
            &self.role,
            TaskRole::Occurrence {
                is_exception: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// Category set seeded on first read when the store is empty.
pub fn default_categories() -> Vec<Category> {
    let seed = [
        ("Work", "#3B82F6", "💼"),
        ("Personal", "#10B981", "🏠"),
        ("Health", "#EF4444", "💊"),
        ("Learning", "#8B5CF6", "📚"),
        ("Leisure", "#F59E0B", "🎮"),
        ("Sport", "#470027", "🏃"),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (name, color, icon))| Category {
            id: i as CategoryId + 1,
            name: (*name).to_string(),
            color: (*color).to_string(),
            icon: (*icon).to_string(),
        })
        .collect()
}

/// The full durable record set the store loads and saves atomically.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DataSet {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl DataSet {
    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn find_category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub priority: Option<Priority>,
    pub estimated_time: u32,
    pub scheduled_date: Option<NaiveDate>,
    pub time_of_day: Option<NaiveTime>,
    pub recurrence: Recurrence,
}

/// Full-replace template update, mirroring the source's PUT semantics.
/// Date and time changes go through the move operation instead.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: String,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub priority: Priority,
    pub estimated_time: u32,
    pub recurrence: Recurrence,
}

#[derive(Debug, Clone)]
pub struct NewCategoryData {
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl Default for NewCategoryData {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: "#3B82F6".to_string(),
            icon: "📁".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoveData {
    pub date: NaiveDate,
    pub time_of_day: Option<NaiveTime>,
}

#[derive(Debug)]
pub enum CompletionResult {
    Single(Task),
    Recurring {
        completed: Task,
        /// The freshly materialized next occurrence, when one was due
        /// and not already present.
        next: Option<Task>,
    },
}

impl CompletionResult {
    pub fn completed(&self) -> &Task {
        match self {
            CompletionResult::Single(task) => task,
            CompletionResult::Recurring { completed, .. } => completed,
        }
    }
}

/// A task enriched with display metadata for the read path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub category: Option<Category>,
    pub overdue: bool,
}

/// The three-way partition of the record set for a given day.
#[derive(Debug, Clone, Serialize, Default)]
pub struct DayView {
    pub today_active: Vec<TaskView>,
    pub today_completed: Vec<TaskView>,
    pub other_days: Vec<TaskView>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Percentage of today's tasks completed; 0 when there are none.
    pub completion_rate: f64,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    pub total_time_minutes: u64,
    pub completed_time_minutes: u64,
    /// Time-weighted completion percentage over `estimated_time` sums.
    pub time_completion_rate: f64,
}

/// A pending task whose wall-clock time is about to come up.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reminder {
    pub task_id: TaskId,
    pub title: String,
    #[serde(with = "hhmm")]
    pub time_of_day: Option<NaiveTime>,
    pub description: String,
    pub noted_at: NaiveDateTime,
}

/// Serde adapter for optional HH:MM wall-clock times. Deserialization is
/// fail-soft: an unparseable time degrades to no time at all.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_some(&t.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| NaiveTime::parse_from_str(&s, FORMAT).ok()))
    }
}
