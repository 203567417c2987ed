// goal.rs - Dream subcommands: list, show, add, delete, colors.

use dreams_goal::{ColorTheme, Goal, TrackerConfig};

use super::{open_store, progress_bar, resolve_goal, short_id, truncate};

/// Print every dream with its progress.
pub fn list(config: &TrackerConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let goals = store.goals();

    if goals.is_empty() {
        println!("No dreams yet!");
        println!("Run `dreams add <title>` to start tracking your goals.");
        return Ok(());
    }

    println!(
        "{:<10} {:<4} {:<32} {:<8} {}",
        "ID", "", "TITLE", "COLOR", "PROGRESS"
    );
    println!("{}", "-".repeat(86));
    for g in goals.iter() {
        println!(
            "{:<10} {:<4} {:<32} {:<8} {} {:>3}% ({}/{})",
            short_id(&g.id),
            g.icon,
            truncate(&g.title, 30),
            g.color_theme.to_string(),
            progress_bar(g.progress(), 20),
            g.progress(),
            g.completed_count(),
            g.tasks.len(),
        );
    }
    println!("\n{} dream(s) total.", goals.len());

    Ok(())
}

/// Print one dream and its checklist.
pub fn show(config: &TrackerConfig, reference: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let goal_id = resolve_goal(&store, reference)?;
    if let Some(goal) = store.goal(&goal_id) {
        print!("{}", render_goal(goal));
    }
    Ok(())
}

/// Create a dream. An omitted color uses the configured default.
pub fn add(
    config: &TrackerConfig,
    title: &str,
    icon: &str,
    color: Option<&str>,
) -> anyhow::Result<()> {
    let color = match color {
        Some(c) => c.parse::<ColorTheme>()?,
        None => config.default_color.clone(),
    };

    let mut store = open_store(config)?;
    match store.create_goal(title, icon, color) {
        Some(id) => {
            let icon = store.goal(&id).map(|g| g.icon.as_str()).unwrap_or_default();
            println!("Created dream: {} {} ({})", icon, title, id);
        }
        None => anyhow::bail!("dream title must not be empty"),
    }
    Ok(())
}

/// Delete a dream and its tasks. Without `confirmed` only describes what would go.
pub fn delete(config: &TrackerConfig, reference: &str, confirmed: bool) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let goal_id = resolve_goal(&store, reference)?;
    let Some(goal) = store.goal(&goal_id).cloned() else {
        return Ok(());
    };

    if !confirmed {
        println!(
            "This will delete \"{}\" and its {} task(s). This cannot be undone.",
            goal.title,
            goal.tasks.len()
        );
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }

    store.delete_goal(&goal_id);
    println!("Deleted dream: {} ({})", goal.title, goal_id);
    Ok(())
}

/// Print the swatches the picker offers.
pub fn colors() -> anyhow::Result<()> {
    for theme in ColorTheme::ALL {
        println!("{:<8} {}", theme.to_string(), theme.css_classes());
    }
    Ok(())
}

/// Card-style rendering of one dream and its checklist.
pub fn render_goal(goal: &Goal) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", goal.icon, goal.title));
    out.push_str(&format!("ID:       {}\n", goal.id));
    out.push_str(&format!("Color:    {}\n", goal.color_theme.name()));
    out.push_str(&format!(
        "Progress: {} {}% complete\n",
        progress_bar(goal.progress(), 20),
        goal.progress()
    ));
    if goal.tasks.is_empty() {
        out.push_str("  (no tasks yet)\n");
    }
    for task in &goal.tasks {
        let mark = if task.completed { "x" } else { " " };
        out.push_str(&format!("  [{}] {:<10} {}\n", mark, short_id(&task.id), task.text));
    }
    out
}
