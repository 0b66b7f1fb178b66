use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use habita_core::models::{Category, DayStats, DayView, Priority, Reminder, TaskView};
use owo_colors::OwoColorize;

pub fn display_day(day: &DayView, today: NaiveDate, show_other_days: bool) {
    println!("{} {}", "Today".bold(), today.format("%Y-%m-%d"));

    if day.today_active.is_empty() && day.today_completed.is_empty() {
        println!("Nothing scheduled for today.");
    } else {
        display_tasks(&day.today_active);
        if !day.today_completed.is_empty() {
            println!("\n{}", "Completed today".bold());
            display_tasks(&day.today_completed);
        }
    }

    if show_other_days && !day.other_days.is_empty() {
        println!("\n{}", "Other days".bold());
        display_tasks(&day.other_days);
    }
}

pub fn display_tasks(tasks: &[TaskView]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Time", "Title", "Priority", "Category", "Est."]);

    for view in tasks {
        let task = &view.task;
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(Cell::new(
            task.time_of_day
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ));

        let mut title = String::new();
        if task.template_id().is_some() || task.is_template() {
            title.push('↻');
            title.push(' ');
        }
        title.push_str(&task.title);
        if task.is_template() {
            title.push_str(" (template)");
        }
        if task.is_exception() {
            title.push_str(" ⚠");
        }

        let mut title_cell = Cell::new(title);
        if task.completed {
            title_cell = title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        } else if view.overdue {
            title_cell = title_cell.fg(Color::Red).add_attribute(Attribute::Bold);
        } else {
            title_cell = match task.priority {
                Priority::High => title_cell.fg(Color::Red),
                Priority::Medium => title_cell.fg(Color::Yellow),
                Priority::Low => title_cell.fg(Color::Green),
            };
        }
        row.add_cell(title_cell);

        row.add_cell(Cell::new(task.priority.to_string()));
        row.add_cell(Cell::new(
            view.category
                .as_ref()
                .map(|c| format!("{} {}", c.icon, c.name))
                .unwrap_or_else(|| "-".to_string()),
        ));
        row.add_cell(Cell::new(if task.estimated_time > 0 {
            format!("{}m", task.estimated_time)
        } else {
            "-".to_string()
        }));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_stats(stats: &DayStats, today: NaiveDate) {
    println!("{} {}", "Stats for".bold(), today.format("%Y-%m-%d"));

    let mut table = Table::new();
    table.add_row(vec![
        Cell::new("Tasks"),
        Cell::new(format!(
            "{} / {} completed ({:.0}%)",
            stats.completed_tasks, stats.total_tasks, stats.completion_rate
        )),
    ]);
    table.add_row(vec![
        Cell::new("Time"),
        Cell::new(format!(
            "{}m / {}m completed ({:.0}%)",
            stats.completed_time_minutes, stats.total_time_minutes, stats.time_completion_rate
        )),
    ]);
    table.add_row(vec![
        Cell::new("Priorities"),
        Cell::new(format!(
            "{} high, {} medium, {} low",
            stats.high_priority, stats.medium_priority, stats.low_priority
        )),
    ]);
    println!("{table}");
}

pub fn display_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Color"]);
    for category in categories {
        table.add_row(vec![
            Cell::new(category.id),
            Cell::new(format!("{} {}", category.icon, category.name)),
            Cell::new(&category.color),
        ]);
    }
    println!("{table}");
}

pub fn display_reminders(reminders: &[Reminder]) {
    if reminders.is_empty() {
        println!("Nothing coming up.");
        return;
    }

    for reminder in reminders {
        let time = reminder
            .time_of_day
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{} {} at {}",
            "⏰".yellow(),
            reminder.title.bold(),
            time.cyan()
        );
        if !reminder.description.is_empty() {
            println!("   {}", reminder.description);
        }
    }
}
