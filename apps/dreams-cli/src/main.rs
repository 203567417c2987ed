//! # dreams-cli
//!
//! Command-line front end for the Dreams tracker.
//!
//! - `dreams list/show` - render dreams with their progress and tasks
//! - `dreams add/delete` - create or remove a dream
//! - `dreams task add/toggle/delete` - manage a dream's checklist
//! - `dreams colors` - list available color themes

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dreams_goal::TrackerConfig;
use tracing_subscriber::EnvFilter;

/// Dreams & Goals Tracker - turn dreams into achievable goals.
#[derive(Parser)]
#[command(name = "dreams", version, about)]
struct Cli {
    /// Directory whose `.dreams/` folder holds the tracker data.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all dreams with progress.
    List,
    /// Show one dream in detail.
    Show {
        /// Dream ID (or unique prefix).
        goal: String,
    },
    /// Create a new dream.
    Add {
        /// Dream title (e.g., "Learn Guitar").
        title: String,
        /// Icon or emoji (defaults to the configured icon).
        #[arg(long, default_value = "")]
        icon: String,
        /// Color theme (pink, blue, green, purple, yellow, red, indigo, orange).
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a dream and all of its tasks.
    Delete {
        /// Dream ID (or unique prefix).
        goal: String,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Manage a dream's tasks.
    Task {
        #[command(subcommand)]
        command: commands::task::TaskCommands,
    },
    /// List available color themes.
    Colors,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with rendered output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dreams_goal=warn,dreams=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = TrackerConfig::load_or_default(&cli.root);
    tracing::debug!(data_dir = %config.data_dir.display(), "using tracker data");

    match &cli.command {
        Commands::List => commands::goal::list(&config),
        Commands::Show { goal } => commands::goal::show(&config, goal),
        Commands::Add { title, icon, color } => {
            commands::goal::add(&config, title, icon, color.as_deref())
        }
        Commands::Delete { goal, yes } => commands::goal::delete(&config, goal, *yes),
        Commands::Task { command } => commands::task::execute(command, &config),
        Commands::Colors => commands::goal::colors(),
    }
}
