//! `pomofocus tasks` subcommands implementation

use anyhow::{bail, Result};
use chrono::{DateTime, Local, TimeZone};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::task::{JsonTaskStore, Task, TaskManager};

const TABLE_COL_ID: usize = 14;
const TABLE_COL_DONE: usize = 5;
const TABLE_COL_CREATED: usize = 17;

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks in order
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a new task
    Add {
        /// Task text (surrounding whitespace is trimmed)
        text: String,
    },

    /// Flip a task between open and done
    Toggle {
        /// Task id as shown by `tasks list`
        id: i64,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Remove {
        /// Task id as shown by `tasks list`
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TaskJson<'a> {
    id: i64,
    text: &'a str,
    completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Local>>,
}

pub fn run(command: TaskCommands) -> Result<()> {
    let store = JsonTaskStore::new()?;
    let mut manager = TaskManager::new(Box::new(store));

    match command {
        TaskCommands::List(args) => list(&manager, args.json),
        TaskCommands::Add { text } => add(&mut manager, &text),
        TaskCommands::Toggle { id } => toggle(&mut manager, id),
        TaskCommands::Remove { id } => remove(&mut manager, id),
    }
}

/// Ids are creation timestamps; anything that is not a valid one has no date.
fn created_at(task: &Task) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(task.id).single()
}

fn list(manager: &TaskManager, json: bool) -> Result<()> {
    if json {
        let tasks: Vec<TaskJson> = manager
            .tasks()
            .iter()
            .map(|task| TaskJson {
                id: task.id,
                text: &task.text,
                completed: task.completed,
                created_at: created_at(task),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if manager.is_empty() {
        println!("No tasks yet. Add one with: pomofocus tasks add \"<text>\"");
        return Ok(());
    }

    println!(
        "{:<width_id$} {:<width_done$} {:<width_created$} TEXT",
        "ID",
        "DONE",
        "CREATED",
        width_id = TABLE_COL_ID,
        width_done = TABLE_COL_DONE,
        width_created = TABLE_COL_CREATED
    );
    println!(
        "{}",
        "-".repeat(TABLE_COL_ID + TABLE_COL_DONE + TABLE_COL_CREATED + 3 + 20)
    );
    for task in manager.tasks() {
        let created = created_at(task)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<width_id$} {:<width_done$} {:<width_created$} {}",
            task.id,
            task.checkbox(),
            created,
            task.text,
            width_id = TABLE_COL_ID,
            width_done = TABLE_COL_DONE,
            width_created = TABLE_COL_CREATED
        );
    }

    println!("\n{} of {} done", manager.completed_count(), manager.len());
    Ok(())
}

fn add(manager: &mut TaskManager, text: &str) -> Result<()> {
    match manager.add(text)? {
        Some(id) => {
            println!("✓ Added task {}", id);
            Ok(())
        }
        None => bail!("Task text cannot be empty"),
    }
}

fn toggle(manager: &mut TaskManager, id: i64) -> Result<()> {
    if manager.get(id).is_none() {
        bail!("Task not found: {}", id);
    }
    manager.toggle(id)?;

    let state = match manager.get(id) {
        Some(task) if task.completed => "done",
        _ => "open",
    };
    println!("✓ Task {} is now {}", id, state);
    Ok(())
}

fn remove(manager: &mut TaskManager, id: i64) -> Result<()> {
    if !manager.delete(id)? {
        bail!("Task not found: {}", id);
    }
    println!("✓ Removed task {}", id);
    Ok(())
}
