use anyhow::Result;
use chrono::NaiveDate;
use habita_core::engine::Engine;
use habita_core::store::TaskStore;

use crate::views::table;

pub async fn show_stats(engine: &Engine<impl TaskStore>, today: NaiveDate) -> Result<()> {
    let stats = engine.stats_for(today).await?;
    table::display_stats(&stats, today);
    Ok(())
}
