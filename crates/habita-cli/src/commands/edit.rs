use anyhow::Result;
use chrono::NaiveDate;
use habita_core::engine::Engine;
use habita_core::models::{Recurrence, UpdateTaskData};
use habita_core::store::TaskStore;
use owo_colors::{OwoColorize, Style};

use crate::cli::EditCommand;
use crate::commands::add::build_recurrence;
use crate::parser::parse_date;

/// Merges the flags over the task's current fields and submits the
/// full-replace update. Omitted flags keep their current values.
pub async fn edit_task(
    engine: &Engine<impl TaskStore>,
    command: EditCommand,
    today: NaiveDate,
) -> Result<()> {
    let current = engine.get_task(command.id).await?;
    let current_rule = current.recurrence().copied().unwrap_or_default();

    let recurrence = if command.every_clear {
        Recurrence::none()
    } else if command.every.is_some() {
        build_recurrence(
            command.every,
            command.on.as_deref(),
            command.until.as_deref(),
            today,
        )?
    } else {
        let mut rule = current_rule;
        if let Some(on) = command.on.as_deref() {
            rule.weekdays = on.parse().map_err(|e| anyhow::anyhow!("{e}"))?;
        }
        if command.until_clear {
            rule.until = None;
        } else if let Some(until) = command.until.as_deref() {
            rule.until = Some(parse_date(until, today)?);
        }
        rule
    };

    let data = UpdateTaskData {
        title: command.title.unwrap_or(current.title),
        description: if command.description_clear {
            String::new()
        } else {
            command.description.unwrap_or(current.description)
        },
        category_id: if command.category_clear {
            None
        } else {
            command.category.or(current.category_id)
        },
        priority: command.priority.map(Into::into).unwrap_or(current.priority),
        estimated_time: command.time.unwrap_or(current.estimated_time),
        recurrence,
    };

    let task = engine.update_template(command.id, data).await?;
    let success_style = Style::new().green().bold();
    println!(
        "{} Updated: {}",
        "✓".style(success_style),
        task.title.bold()
    );
    Ok(())
}
