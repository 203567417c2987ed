// mod.rs - Shared helpers for the CLI subcommands.

pub mod goal;
pub mod task;

use anyhow::bail;
use dreams_goal::{
    ActivityLog, Goal, GoalId, GoalStore, JsonFileAdapter, TaskId, TrackerConfig, TrackerError,
};

/// Open the configured store, attaching the activity log when enabled.
pub fn open_store(config: &TrackerConfig) -> anyhow::Result<GoalStore<JsonFileAdapter>> {
    let adapter = JsonFileAdapter::new(&config.data_dir, &config.storage_key)?;
    let mut store = GoalStore::open(adapter).with_default_icon(config.default_icon.clone());
    if let Some(path) = &config.activity_log {
        store.add_observer(Box::new(ActivityLog::new(path)));
    }
    Ok(store)
}

/// Resolve a full id or a unique id prefix against `ids`.
fn resolve<'a>(
    kind: &str,
    reference: &str,
    ids: impl Iterator<Item = &'a str> + Clone,
) -> anyhow::Result<String> {
    if let Some(exact) = ids.clone().find(|id| *id == reference) {
        return Ok(exact.to_string());
    }
    let matches: Vec<&str> = ids.filter(|id| id.starts_with(reference)).collect();
    match matches.as_slice() {
        [] => Err(TrackerError::NotFound(format!("{} {}", kind, reference)).into()),
        [only] => Ok(only.to_string()),
        _ => bail!(
            "{} prefix '{}' is ambiguous ({} matches)",
            kind,
            reference,
            matches.len()
        ),
    }
}

/// Resolve a dream reference (id or unique prefix) to its id.
pub fn resolve_goal<A: dreams_goal::PersistenceAdapter>(
    store: &GoalStore<A>,
    reference: &str,
) -> anyhow::Result<GoalId> {
    let goals = store.goals();
    resolve("dream", reference, goals.iter().map(|g| g.id.as_str()))
}

/// Resolve a task reference within `goal`.
pub fn resolve_task(goal: &Goal, reference: &str) -> anyhow::Result<TaskId> {
    resolve("task", reference, goal.tasks.iter().map(|t| t.id.as_str()))
}

/// Text progress bar, e.g. `[#####---------------]`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Short form of an id for table display.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Cut `s` to at most `max` characters, ending in "..." when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
