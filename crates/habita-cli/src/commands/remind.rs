use anyhow::Result;
use chrono::NaiveDateTime;
use habita_core::engine::Engine;
use habita_core::store::TaskStore;
use owo_colors::OwoColorize;

use crate::views::table;

pub async fn show_reminders(
    engine: &Engine<impl TaskStore>,
    now: NaiveDateTime,
) -> Result<()> {
    let reminders = engine.upcoming_reminders(now).await?;
    table::display_reminders(&reminders);
    Ok(())
}

pub async fn generate(engine: &Engine<impl TaskStore>, now: NaiveDateTime) -> Result<()> {
    let generated = engine.materialize_today(now.date()).await?;
    if generated == 0 {
        println!("Nothing to generate; today is already up to date.");
    } else {
        println!(
            "{} Generated {} occurrence(s) for today",
            "✓".green().bold(),
            generated.yellow()
        );
    }
    Ok(())
}
