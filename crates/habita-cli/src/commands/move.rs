use anyhow::Result;
use chrono::NaiveDate;
use habita_core::engine::Engine;
use habita_core::models::MoveData;
use habita_core::store::TaskStore;
use owo_colors::{OwoColorize, Style};

use crate::cli::MoveCommand;
use crate::parser::{parse_date, parse_time};

pub async fn move_task(
    engine: &Engine<impl TaskStore>,
    command: MoveCommand,
    today: NaiveDate,
) -> Result<()> {
    let date = parse_date(&command.date, today)?;
    let time_of_day = command.at.as_deref().map(parse_time).transpose()?;

    let task = engine
        .move_task(
            command.id,
            MoveData {
                date,
                time_of_day,
            },
        )
        .await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Moved: {} now lands on {}",
        "✓".style(success_style),
        task.title.bold(),
        task.effective_date().format("%Y-%m-%d").to_string().cyan()
    );
    if task.is_exception() {
        println!(
            "  {} Detached from its template; it will no longer regenerate",
            "→".blue()
        );
    }
    Ok(())
}
