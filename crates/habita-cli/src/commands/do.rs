use anyhow::Result;
use chrono::NaiveDateTime;
use habita_core::engine::Engine;
use habita_core::models::CompletionResult;
use habita_core::store::TaskStore;
use owo_colors::{OwoColorize, Style};

use crate::cli::{DoCommand, UndoCommand};

pub async fn do_task(
    engine: &Engine<impl TaskStore>,
    command: DoCommand,
    now: NaiveDateTime,
) -> Result<()> {
    let result = engine.complete(command.id, now).await?;
    let success_style = Style::new().green().bold();
    println!(
        "{} Completed: {}",
        "✓".style(success_style),
        result.completed().title.bold()
    );
    if let CompletionResult::Recurring {
        next: Some(next), ..
    } = &result
    {
        println!(
            "  {} Next up on {}",
            "→".blue(),
            next.effective_date().format("%Y-%m-%d").to_string().cyan()
        );
    }
    Ok(())
}

pub async fn undo_task(
    engine: &Engine<impl TaskStore>,
    command: UndoCommand,
    now: NaiveDateTime,
) -> Result<()> {
    let task = engine.uncomplete(command.id, now.date()).await?;
    println!("{} Back to pending: {}", "↺".yellow(), task.title.bold());
    Ok(())
}
