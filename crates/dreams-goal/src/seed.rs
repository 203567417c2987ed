// seed.rs - Default dataset shown when nothing usable is stored.

use crate::goal::{ColorTheme, Goal, Task};

const SEED_TASKS: [(&str, bool); 8] = [
    ("Save money for the trip", true),
    ("Apply for passport", true),
    ("Book flights", false),
    ("Visit Tokyo Skytree", false),
    ("Try authentic ramen", false),
    ("Visit Fushimi Inari Shrine", false),
    ("Experience cherry blossom season", false),
    ("Stay in a traditional ryokan", false),
];

/// One example goal with a partly completed checklist (2 of 8 done).
pub fn seed_goals() -> Vec<Goal> {
    let tasks = SEED_TASKS
        .iter()
        .enumerate()
        .map(|(i, (text, completed))| Task {
            id: (i + 1).to_string(),
            text: text.to_string(),
            completed: *completed,
        })
        .collect();

    vec![Goal {
        id: "1".to_string(),
        title: "Trip to Japan".to_string(),
        icon: "🇯🇵".to_string(),
        color_theme: ColorTheme::Blue,
        tasks,
    }]
}
