use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use habita_core::engine::Engine;
use habita_core::models::{NewTaskData, Recurrence, Weekdays};
use habita_core::store::TaskStore;
use owo_colors::{OwoColorize, Style};

use crate::cli::{AddCommand, FrequencyArg};
use crate::parser::{parse_date, parse_time};

pub async fn add_task(
    engine: &Engine<impl TaskStore>,
    command: AddCommand,
    today: NaiveDate,
) -> Result<()> {
    let scheduled_date = command
        .date
        .as_deref()
        .map(|d| parse_date(d, today))
        .transpose()?;
    let time_of_day = command.at.as_deref().map(parse_time).transpose()?;
    let recurrence = build_recurrence(
        command.every,
        command.on.as_deref(),
        command.until.as_deref(),
        today,
    )?;

    let data = NewTaskData {
        title: command.title,
        description: command.description.unwrap_or_default(),
        category_id: command.category,
        priority: command.priority.map(Into::into),
        estimated_time: command.time.unwrap_or(0),
        scheduled_date,
        time_of_day,
        recurrence,
    };

    let is_recurring = !data.recurrence.is_none();
    let task = engine.create_task(data, today).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    if is_recurring {
        println!(
            "{} Created recurring task: {}",
            "✓".style(success_style),
            task.title.bold()
        );
        println!(
            "  {} Occurrences will appear on eligible days (ID: {})",
            "→".style(info_style),
            task.id.yellow()
        );
    } else {
        println!(
            "{} Created task: {} (ID: {})",
            "✓".style(success_style),
            task.title.bold(),
            task.id.yellow()
        );
    }
    Ok(())
}

pub fn build_recurrence(
    every: Option<FrequencyArg>,
    on: Option<&str>,
    until: Option<&str>,
    today: NaiveDate,
) -> Result<Recurrence> {
    let Some(every) = every else {
        return Ok(Recurrence::none());
    };

    let mut rule = match every {
        FrequencyArg::Daily => Recurrence::daily(),
        FrequencyArg::Weekly => {
            let days = on
                .ok_or_else(|| anyhow!("Weekly recurrence needs --on (e.g. --on 1,3)"))?
                .parse::<Weekdays>()
                .map_err(|e| anyhow!("{e}"))?;
            if days.is_empty() {
                return Err(anyhow!("Weekly recurrence needs at least one weekday"));
            }
            Recurrence::weekly(days)
        }
        FrequencyArg::Monthly => Recurrence::monthly(),
    };
    rule.until = until.map(|u| parse_date(u, today)).transpose()?;
    Ok(rule)
}
