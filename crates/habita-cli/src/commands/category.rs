use anyhow::Result;
use habita_core::engine::Engine;
use habita_core::models::NewCategoryData;
use habita_core::store::TaskStore;
use owo_colors::{OwoColorize, Style};

use crate::cli::{CategoryCommand, CategorySubcommand};
use crate::views::table;

pub async fn category_command(
    engine: &Engine<impl TaskStore>,
    command: CategoryCommand,
) -> Result<()> {
    match command.command {
        CategorySubcommand::List => {
            let categories = engine.list_categories().await?;
            table::display_categories(&categories);
        }
        CategorySubcommand::Add(add) => {
            let defaults = NewCategoryData::default();
            let category = engine
                .create_category(NewCategoryData {
                    name: add.name,
                    color: add.color.unwrap_or(defaults.color),
                    icon: add.icon.unwrap_or(defaults.icon),
                })
                .await?;
            let success_style = Style::new().green().bold();
            println!(
                "{} Created category: {} {} (ID: {})",
                "✓".style(success_style),
                category.icon,
                category.name.bold(),
                category.id.yellow()
            );
        }
    }
    Ok(())
}
