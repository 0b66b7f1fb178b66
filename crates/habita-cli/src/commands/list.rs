use anyhow::Result;
use chrono::NaiveDate;
use habita_core::engine::Engine;
use habita_core::store::TaskStore;
use owo_colors::OwoColorize;

use crate::cli::{CalendarCommand, ListCommand};
use crate::parser::parse_date;
use crate::views::table;

pub async fn list_day(
    engine: &Engine<impl TaskStore>,
    command: ListCommand,
    today: NaiveDate,
) -> Result<()> {
    let day = engine.list_day(today).await?;
    table::display_day(&day, today, command.all);
    Ok(())
}

pub async fn calendar(
    engine: &Engine<impl TaskStore>,
    command: CalendarCommand,
    today: NaiveDate,
) -> Result<()> {
    let date = parse_date(&command.date, today)?;
    let views = engine.calendar_for(date, today).await?;
    println!("{} {}", "Tasks on".bold(), date.format("%Y-%m-%d"));
    table::display_tasks(&views);
    Ok(())
}
