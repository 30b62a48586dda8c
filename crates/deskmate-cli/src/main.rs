use anyhow::Result;
use clap::{Parser, Subcommand};
use deskmate_core::Config;

mod commands;
mod logging;
mod tui;

/// deskmate - stopwatch, notes and to-dos in the terminal
#[derive(Parser)]
#[command(name = "deskmate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive TUI mode (default when no command given)
    #[arg(short, long, global = true)]
    interactive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the stopwatch screen
    Stopwatch,

    /// Manage notes
    Notes {
        #[command(subcommand)]
        command: commands::notes::NotesCommand,
    },

    /// Manage to-dos and their subtasks
    Todos {
        #[command(subcommand)]
        command: commands::todos::TodosCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        None => run_interactive(config, tui::Screen::Home).await,
        Some(_) if cli.interactive => run_interactive(config, tui::Screen::Home).await,
        Some(Commands::Stopwatch) => run_interactive(config, tui::Screen::Stopwatch).await,
        Some(Commands::Notes { command }) => {
            logging::init_stderr(&config);
            commands::notes::run(&config, command).await
        }
        Some(Commands::Todos { command }) => {
            logging::init_stderr(&config);
            commands::todos::run(&config, command).await
        }
    }
}

/// Run the interactive TUI
async fn run_interactive(config: Config, screen: tui::Screen) -> Result<()> {
    logging::init_file(&config)?;

    // Initialize application state
    let mut app = tui::App::new(config).await?;
    app.enter_screen(screen).await;

    // Initialize terminal
    let mut terminal = tui::Tui::new()?;

    // Create event handler
    let events = tui::EventHandler::new(250);

    // Main loop
    while app.running {
        // Render UI
        terminal.draw(|frame| tui::ui::render(&app, frame))?;

        // Handle events
        match events.next()? {
            tui::Event::Tick => {
                // Redraw picks up stopwatch progress
            }
            tui::Event::Key(key) => {
                tui::handle_key_event(&mut app, key).await?;
            }
            tui::Event::Resize(_, _) => {
                // Terminal handles resize automatically
            }
        }
    }

    Ok(())
}
