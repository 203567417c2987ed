// task.rs - Task subcommands: add, toggle, delete.

use clap::Subcommand;
use dreams_goal::TrackerConfig;

use super::{open_store, resolve_goal, resolve_task};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a dream.
    Add {
        /// Dream ID (or unique prefix).
        goal: String,
        /// Task text (e.g., "Book flights").
        text: String,
    },
    /// Mark a task done, or undone if it already is.
    Toggle {
        /// Dream ID (or unique prefix).
        goal: String,
        /// Task ID (or unique prefix).
        task: String,
    },
    /// Remove a task from a dream.
    Delete {
        /// Dream ID (or unique prefix).
        goal: String,
        /// Task ID (or unique prefix).
        task: String,
    },
}

/// Run a task subcommand.
pub fn execute(cmd: &TaskCommands, config: &TrackerConfig) -> anyhow::Result<()> {
    match cmd {
        TaskCommands::Add { goal, text } => add_task(config, goal, text),
        TaskCommands::Toggle { goal, task } => toggle_task(config, goal, task),
        TaskCommands::Delete { goal, task } => delete_task(config, goal, task),
    }
}

fn add_task(config: &TrackerConfig, goal: &str, text: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let goal_id = resolve_goal(&store, goal)?;

    match store.add_task(&goal_id, text) {
        Some(task_id) => println!("Added task {}: {}", task_id, text),
        None => anyhow::bail!("task text must not be empty"),
    }
    Ok(())
}

fn toggle_task(config: &TrackerConfig, goal: &str, task: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let goal_id = resolve_goal(&store, goal)?;
    let task_id = match store.goal(&goal_id) {
        Some(g) => resolve_task(g, task)?,
        None => return Ok(()),
    };

    if let Some(completed) = store.toggle_task(&goal_id, &task_id) {
        let progress = store.goal(&goal_id).map(|g| g.progress()).unwrap_or_default();
        let state = if completed { "done" } else { "not done" };
        println!("Task {} marked {}, {}% complete", task_id, state, progress);
    }
    Ok(())
}

fn delete_task(config: &TrackerConfig, goal: &str, task: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let goal_id = resolve_goal(&store, goal)?;
    let task_id = match store.goal(&goal_id) {
        Some(g) => resolve_task(g, task)?,
        None => return Ok(()),
    };

    if store.delete_task(&goal_id, &task_id) {
        println!("Deleted task {}", task_id);
    }
    Ok(())
}
