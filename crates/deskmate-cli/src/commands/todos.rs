use anyhow::Result;
use clap::Subcommand;
use deskmate_core::{Config, Todo, TodoDraft, TodoList};

use super::{open_store, resolve_id, short_id};

#[derive(Subcommand)]
pub enum TodosCommand {
    /// Add a to-do with one or more subtasks
    Add {
        /// To-do title
        title: String,
        /// Subtask text (repeat for several subtasks)
        #[arg(short, long = "sub", required = true)]
        sub: Vec<String>,
    },

    /// List to-dos
    List {
        /// Show completed to-dos instead of active ones
        #[arg(short, long)]
        completed: bool,
        /// Print the stored JSON for every to-do
        #[arg(long)]
        json: bool,
    },

    /// Show a to-do with its subtasks
    Show {
        /// To-do ID (or prefix)
        id: String,
    },

    /// Toggle a to-do's completion (and all of its subtasks)
    Done {
        /// To-do ID (or prefix)
        id: String,
    },

    /// Delete a to-do
    Delete {
        /// To-do ID (or prefix)
        id: String,
    },
}

pub async fn run(config: &Config, command: TodosCommand) -> Result<()> {
    let store = open_store(config).await?;
    let mut list = TodoList::load(store).await;

    match command {
        TodosCommand::Add { title, sub } => {
            let mut draft = TodoDraft::new(title);
            for text in sub {
                draft.add_subtask(text);
            }
            let todo = list.add(draft).await?;
            println!("\u{2713} Created: {}", todo.title);
            println!("  Subtasks: {}", todo.sub_tasks.len());
            println!("  ID: {}", short_id(&todo.id));
        }
        TodosCommand::List { completed, json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(list.list())?);
                return Ok(());
            }
            let shown = if completed { list.completed() } else { list.active() };
            if shown.is_empty() {
                if completed {
                    println!("No completed tasks yet.");
                } else {
                    println!("No active tasks. Add one with: deskmate todos add <title> --sub <text>");
                }
            }
            for todo in shown {
                print_todo(todo);
            }
        }
        TodosCommand::Show { id } => {
            let id = resolve_id(list.list().iter().map(|t| t.id.as_str()), &id)?;
            if let Some(todo) = list.get(&id) {
                print_todo(todo);
                println!("  ID: {}", todo.id);
            }
        }
        TodosCommand::Done { id } => {
            let id = resolve_id(list.list().iter().map(|t| t.id.as_str()), &id)?;
            let todo = list.toggle_complete(&id).await?;
            if todo.completed {
                println!("\u{2713} Completed: {}", todo.title);
            } else {
                println!("Reopened: {}", todo.title);
            }
        }
        TodosCommand::Delete { id } => {
            let id = resolve_id(list.list().iter().map(|t| t.id.as_str()), &id)?;
            let todo = list.delete(&id).await?;
            println!("\u{2717} Deleted: {}", todo.title);
        }
    }

    Ok(())
}

fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

fn print_todo(todo: &Todo) {
    println!(
        "{} {}  {} ({}/{})",
        checkbox(todo.completed),
        short_id(&todo.id),
        todo.title,
        todo.completed_count(),
        todo.sub_tasks.len()
    );
    for st in &todo.sub_tasks {
        println!("      {} {}", checkbox(st.completed), st.text);
    }
}
