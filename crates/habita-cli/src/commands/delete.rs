use anyhow::Result;
use habita_core::engine::Engine;
use habita_core::store::TaskStore;
use owo_colors::{OwoColorize, Style};

pub async fn delete_task(engine: &Engine<impl TaskStore>, id: i64) -> Result<()> {
    engine.delete(id).await?;
    let success_style = Style::new().green().bold();
    println!("{} Deleted task {}", "✓".style(success_style), id.yellow());
    Ok(())
}
