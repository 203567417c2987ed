// goal.rs - Goal ("dream") and Task records plus the progress calculation.
//
// A Goal owns an ordered list of Tasks. Tasks never outlive their goal:
// deleting a goal drops its task list in the same state transition.
//
// Field names on disk are camelCase (`colorTheme`). The browser build wrote
// `color` as a CSS class string; both forms are accepted on read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identifier of a goal, unique within the store.
pub type GoalId = String;

/// Identifier of a task, unique within its parent goal.
pub type TaskId = String;

/// Glyph used when a goal is created without an icon.
pub const PLACEHOLDER_ICON: &str = "🎯";

/// Generate a fresh collision-resistant identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Color swatch a goal card is drawn with.
///
/// Serializes as the lowercase name (`"blue"`). Reading also accepts any
/// casing and the CSS class form (`"bg-blue-50 border-blue-200"`). A stored
/// value that matches no swatch is kept verbatim as [`ColorTheme::Custom`]
/// and written back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum ColorTheme {
    #[default]
    Pink,
    Blue,
    Green,
    Purple,
    Yellow,
    Red,
    Indigo,
    Orange,
    /// A stored color outside the picker's palette.
    Custom(String),
}

impl ColorTheme {
    /// Every swatch, in the order the picker offers them.
    pub const ALL: [ColorTheme; 8] = [
        ColorTheme::Pink,
        ColorTheme::Blue,
        ColorTheme::Green,
        ColorTheme::Purple,
        ColorTheme::Yellow,
        ColorTheme::Red,
        ColorTheme::Indigo,
        ColorTheme::Orange,
    ];

    /// Display name, e.g. "Indigo". A custom color shows its stored value.
    pub fn name(&self) -> &str {
        match self {
            ColorTheme::Pink => "Pink",
            ColorTheme::Blue => "Blue",
            ColorTheme::Green => "Green",
            ColorTheme::Purple => "Purple",
            ColorTheme::Yellow => "Yellow",
            ColorTheme::Red => "Red",
            ColorTheme::Indigo => "Indigo",
            ColorTheme::Orange => "Orange",
            ColorTheme::Custom(raw) => raw.as_str(),
        }
    }

    /// Background and border classes used by the web front end.
    pub fn css_classes(&self) -> String {
        match self {
            ColorTheme::Custom(raw) if raw.starts_with("bg-") => raw.clone(),
            _ => {
                let key = self.to_string();
                format!("bg-{key}-50 border-{key}-200")
            }
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTheme::Custom(raw) => write!(f, "{}", raw),
            named => write!(f, "{}", named.name().to_ascii_lowercase()),
        }
    }
}

/// A color string that matches no swatch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown color theme: {0}")]
pub struct UnknownColor(pub String);

/// Parses one of the eight swatches; anything else is an error.
impl FromStr for ColorTheme {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // "bg-blue-50 border-blue-200" → "blue"
        let key = trimmed
            .strip_prefix("bg-")
            .and_then(|rest| rest.split('-').next())
            .unwrap_or(trimmed);

        ColorTheme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl From<String> for ColorTheme {
    fn from(value: String) -> Self {
        match value.parse::<ColorTheme>() {
            Ok(theme) => theme,
            Err(_) => ColorTheme::Custom(value),
        }
    }
}

impl From<ColorTheme> for String {
    fn from(theme: ColorTheme) -> Self {
        match theme {
            ColorTheme::Custom(raw) => raw,
            named => named.to_string(),
        }
    }
}

/// A single checklist item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            completed: false,
        }
    }
}

/// A dream: a titled goal with an icon, a color and an ordered task list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub icon: String,
    #[serde(alias = "color")]
    pub color_theme: ColorTheme,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Goal {
    /// Create a goal with a fresh id and no tasks.
    /// An empty icon is replaced by [`PLACEHOLDER_ICON`].
    pub fn new(title: impl Into<String>, icon: impl Into<String>, color_theme: ColorTheme) -> Self {
        let icon = icon.into();
        Self {
            id: new_id(),
            title: title.into(),
            icon: if icon.is_empty() {
                PLACEHOLDER_ICON.to_string()
            } else {
                icon
            },
            color_theme,
            tasks: Vec::new(),
        }
    }

    /// Completion percentage of this goal's tasks.
    pub fn progress(&self) -> u8 {
        compute_progress(&self.tasks)
    }

    /// Number of completed tasks.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Look up one of this goal's tasks by id.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

/// Percentage of completed tasks, rounded to the nearest whole percent
/// (halves round up). An empty list is 0%.
pub fn compute_progress(tasks: &[Task]) -> u8 {
    let total = tasks.len();
    if total == 0 {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    // round(100 * c / n) == floor((200 * c + n) / (2 * n)) for non-negative c, n.
    ((200 * completed + total) / (2 * total)) as u8
}
