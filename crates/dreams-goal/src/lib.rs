//! # dreams-goal
//!
//! Dream (goal) and task tracking with write-through persistence.
//!
//! A [`Goal`] is a titled dream with an icon, a color theme and an ordered
//! checklist of [`Task`]s. The [`GoalStore`] owns the ordered goal list,
//! applies immutable updates, and writes the full list to a
//! [`PersistenceAdapter`] after every change.
//!
//! ## Key components
//!
//! - [`GoalStore`] - create/delete goals, add/toggle/delete tasks, progress
//! - [`PersistenceAdapter`] - blob load/save boundary ([`JsonFileAdapter`],
//!   [`MemoryAdapter`])
//! - [`StoreEvent`] / [`StoreObserver`] - change notifications for front ends
//! - [`TrackerConfig`] - storage location and defaults from `.dreams/config.toml`
//! - [`seed_goals`] - the example dataset used when nothing is stored

pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod persistence;
pub mod seed;
pub mod store;

pub use config::TrackerConfig;
pub use error::TrackerError;
pub use events::{ActivityLog, EventDispatcher, StoreEvent, StoreObserver};
pub use goal::{compute_progress, ColorTheme, Goal, GoalId, Task, TaskId, PLACEHOLDER_ICON};
pub use persistence::{
    decode_goals, encode_goals, JsonFileAdapter, MemoryAdapter, PersistenceAdapter,
    DEFAULT_STORAGE_KEY,
};
pub use seed::seed_goals;
pub use store::{GoalStore, LoadOrigin};
