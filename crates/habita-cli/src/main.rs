use clap::Parser;
use dialoguer::Confirm;
use habita_core::engine::Engine;
use habita_core::error::CoreError;
use habita_core::store::JsonFileStore;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod parser;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_default();
    let engine = Engine::new(JsonFileStore::new(config.data_file));

    let cli = cli::Cli::parse();
    let now = chrono::Local::now().naive_local();
    let today = now.date();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&engine, command, today).await,
        cli::Commands::List(command) => commands::list::list_day(&engine, command, today).await,
        cli::Commands::Calendar(command) => {
            commands::list::calendar(&engine, command, today).await
        }
        cli::Commands::Do(command) => commands::r#do::do_task(&engine, command, now).await,
        cli::Commands::Undo(command) => commands::r#do::undo_task(&engine, command, now).await,
        cli::Commands::Move(command) => {
            commands::r#move::move_task(&engine, command, today).await
        }
        cli::Commands::Edit(command) => commands::edit::edit_task(&engine, command, today).await,
        cli::Commands::Delete(command) => {
            let task = match engine.get_task(command.id).await {
                Ok(task) => task,
                Err(e) => {
                    handle_error(e.into());
                    return;
                }
            };

            if !command.force {
                let prompt = if task.is_template() {
                    format!(
                        "Delete '{}' and all of its generated occurrences?",
                        task.title
                    )
                } else {
                    format!("Delete task '{}'?", task.title)
                };
                let confirmation = Confirm::new()
                    .with_prompt(prompt)
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return;
                }
            }
            commands::delete::delete_task(&engine, command.id).await
        }
        cli::Commands::Stats => commands::stats::show_stats(&engine, today).await,
        cli::Commands::Category(command) => {
            commands::category::category_command(&engine, command).await
        }
        cli::Commands::Remind => commands::remind::show_reminders(&engine, now).await,
        cli::Commands::Generate => commands::remind::generate(&engine, now).await,
    };

    if let Err(e) = result {
        handle_error(e);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(id) => {
                eprintln!(
                    "{} Task with ID '{}' not found.",
                    "Error:".style(error_style),
                    id.yellow()
                );
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
    std::process::exit(1);
}
