use anyhow::Result;
use clap::Subcommand;
use deskmate_core::{Config, NotesBook};
use tracing::debug;

use super::{open_store, resolve_id, short_id};

#[derive(Subcommand)]
pub enum NotesCommand {
    /// Add a note
    Add {
        /// Note title
        title: String,
        /// Note body
        #[arg(required = true)]
        content: Vec<String>,
    },

    /// List notes
    List {
        /// Print the stored JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a note in full
    Show {
        /// Note ID (or prefix)
        id: String,
    },

    /// Edit a note's title and/or body
    Edit {
        /// Note ID (or prefix)
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID (or prefix)
        id: String,
    },
}

pub async fn run(config: &Config, command: NotesCommand) -> Result<()> {
    let store = open_store(config).await?;
    let mut book = NotesBook::load(store).await;

    match command {
        NotesCommand::Add { title, content } => {
            let note = book.add(title, content.join(" ")).await?;
            println!("\u{2713} Created: {}", note.title);
            println!("  ID: {}", short_id(&note.id));
        }
        NotesCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(book.list())?);
            } else if book.is_empty() {
                println!("No notes yet. Add one with: deskmate notes add <title> <content>");
            } else {
                for note in book.list() {
                    println!("{}  {}", short_id(&note.id), note.title);
                    println!("          {}", first_line(&note.content, 60));
                }
            }
        }
        NotesCommand::Show { id } => {
            let id = resolve_id(book.list().iter().map(|n| n.id.as_str()), &id)?;
            if let Some(note) = book.get(&id) {
                println!("{}", note.title);
                println!("{}", "\u{2500}".repeat(note.title.chars().count().max(8)));
                println!("{}", note.content);
                println!();
                println!("ID: {}", note.id);
            }
        }
        NotesCommand::Edit { id, title, content } => {
            let id = resolve_id(book.list().iter().map(|n| n.id.as_str()), &id)?;
            debug!("notes edit: id={}", id);
            let Some(current) = book.get(&id).cloned() else {
                anyhow::bail!("Note not found");
            };
            if title.is_none() && content.is_none() {
                anyhow::bail!("Nothing to change - pass --title and/or --content");
            }
            let note = book
                .update(
                    &id,
                    title.unwrap_or(current.title),
                    content.unwrap_or(current.content),
                )
                .await?;
            println!("\u{2713} Updated: {}", note.title);
        }
        NotesCommand::Delete { id } => {
            let id = resolve_id(book.list().iter().map(|n| n.id.as_str()), &id)?;
            let note = book.delete(&id).await?;
            println!("\u{2717} Deleted: {}", note.title);
        }
    }

    Ok(())
}

/// First line of `text`, cut to `max` characters.
fn first_line(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= max {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
