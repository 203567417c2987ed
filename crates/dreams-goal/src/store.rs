// store.rs - GoalStore: the authoritative goal list with write-through persistence.
//
// The store owns an immutable snapshot of the ordered goal list. Every
// mutation builds a fresh list, swaps it in, hands the full serialized list
// to the persistence adapter, then notifies observers. Snapshots handed out
// earlier are never modified.
//
// Bad input (blank title or task text, unknown ids) is a silent no-op: no
// state change, no save, no event. Save failures are logged and the
// in-memory state stays authoritative for the session.

use std::iter;
use std::sync::Arc;

use crate::events::{EventDispatcher, StoreEvent, StoreObserver};
use crate::goal::{ColorTheme, Goal, GoalId, Task, TaskId, PLACEHOLDER_ICON};
use crate::persistence::{decode_goals, encode_goals, PersistenceAdapter};
use crate::seed::seed_goals;

/// Where the initial state came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from the adapter's stored blob.
    Stored,
    /// Nothing usable was stored; the seed dataset was substituted.
    Seeded { reason: String },
}

/// In-memory goal list mirrored to a [`PersistenceAdapter`].
pub struct GoalStore<A: PersistenceAdapter> {
    goals: Arc<Vec<Goal>>,
    adapter: A,
    dispatcher: EventDispatcher,
    default_icon: String,
    origin: LoadOrigin,
}

impl<A: PersistenceAdapter> GoalStore<A> {
    /// Open a store over `adapter`.
    ///
    /// A stored, well-formed blob becomes the initial state. An absent or
    /// empty blob, a read error, or a parse failure falls back to the seed
    /// dataset. Opening never fails and never writes.
    pub fn open(adapter: A) -> Self {
        let (goals, origin) = match adapter.load() {
            Ok(Some(blob)) if !blob.trim().is_empty() => match decode_goals(&blob) {
                Ok(goals) => (goals, LoadOrigin::Stored),
                Err(e) => {
                    tracing::warn!("stored goals are malformed, using seed data: {}", e);
                    (
                        seed_goals(),
                        LoadOrigin::Seeded {
                            reason: format!("malformed: {}", e),
                        },
                    )
                }
            },
            Ok(_) => (
                seed_goals(),
                LoadOrigin::Seeded {
                    reason: "nothing stored".to_string(),
                },
            ),
            Err(e) => {
                tracing::warn!("failed to load goals, using seed data: {}", e);
                (
                    seed_goals(),
                    LoadOrigin::Seeded {
                        reason: format!("load failed: {}", e),
                    },
                )
            }
        };

        tracing::debug!(goals = goals.len(), origin = ?origin, "goal store opened");
        Self {
            goals: Arc::new(goals),
            adapter,
            dispatcher: EventDispatcher::new(),
            default_icon: PLACEHOLDER_ICON.to_string(),
            origin,
        }
    }

    /// Icon assigned to goals created without one.
    pub fn with_default_icon(mut self, icon: impl Into<String>) -> Self {
        let icon = icon.into();
        if !icon.is_empty() {
            self.default_icon = icon;
        }
        self
    }

    /// Register an observer for store events.
    pub fn add_observer(&mut self, observer: Box<dyn StoreObserver>) {
        self.dispatcher.add_observer(observer);
    }

    /// Where the initial state came from.
    pub fn origin(&self) -> &LoadOrigin {
        &self.origin
    }

    /// Snapshot of the current goal list, in display order.
    pub fn goals(&self) -> Arc<Vec<Goal>> {
        Arc::clone(&self.goals)
    }

    /// Look up a goal by id.
    pub fn goal(&self, goal_id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    /// Number of goals in the store.
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// True when the store holds no goals.
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// The persistence adapter backing this store.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Completion percentage of a goal.
    pub fn compute_progress(goal: &Goal) -> u8 {
        goal.progress()
    }

    /// Append a new goal. Returns `None` (and changes nothing) when the
    /// title is blank.
    pub fn create_goal(&mut self, title: &str, icon: &str, color: ColorTheme) -> Option<GoalId> {
        if title.trim().is_empty() {
            tracing::debug!("ignoring goal with blank title");
            return None;
        }

        let icon = if icon.is_empty() {
            self.default_icon.as_str()
        } else {
            icon
        };
        let goal = Goal::new(title, icon, color);
        let goal_id = goal.id.clone();
        let event = StoreEvent::goal_created(&goal_id, title);

        let next = self.goals.iter().cloned().chain(iter::once(goal)).collect();
        self.commit(next, event);
        Some(goal_id)
    }

    /// Remove a goal together with its tasks. Returns whether it existed.
    pub fn delete_goal(&mut self, goal_id: &str) -> bool {
        let Some(goal) = self.goal(goal_id) else {
            tracing::debug!(goal_id, "delete of unknown goal ignored");
            return false;
        };
        let event = StoreEvent::goal_deleted(goal_id, goal.tasks.len());

        let next = self
            .goals
            .iter()
            .filter(|g| g.id != goal_id)
            .cloned()
            .collect();
        self.commit(next, event);
        true
    }

    /// Append an incomplete task to a goal. Returns `None` when the text is
    /// blank or the goal is unknown.
    pub fn add_task(&mut self, goal_id: &str, text: &str) -> Option<TaskId> {
        if text.trim().is_empty() {
            tracing::debug!(goal_id, "ignoring task with blank text");
            return None;
        }
        self.goal(goal_id)?;

        let task = Task::new(text);
        let task_id = task.id.clone();
        let event = StoreEvent::task_added(goal_id, &task_id, text);

        let next = self
            .goals
            .iter()
            .map(|g| {
                if g.id == goal_id {
                    let mut g = g.clone();
                    g.tasks.push(task.clone());
                    g
                } else {
                    g.clone()
                }
            })
            .collect();
        self.commit(next, event);
        Some(task_id)
    }

    /// Flip a task's completion flag. Returns the new flag, or `None` when
    /// either id is unknown.
    pub fn toggle_task(&mut self, goal_id: &str, task_id: &str) -> Option<bool> {
        let goal = self.goal(goal_id)?;
        let completed = !goal.task(task_id)?.completed;

        let next: Vec<Goal> = self
            .goals
            .iter()
            .map(|g| {
                if g.id != goal_id {
                    return g.clone();
                }
                let tasks = g
                    .tasks
                    .iter()
                    .map(|t| {
                        if t.id == task_id {
                            Task {
                                completed,
                                ..t.clone()
                            }
                        } else {
                            t.clone()
                        }
                    })
                    .collect();
                Goal {
                    tasks,
                    ..g.clone()
                }
            })
            .collect();

        let progress = next
            .iter()
            .find(|g| g.id == goal_id)
            .map(Goal::progress)
            .unwrap_or_default();
        let event = StoreEvent::task_toggled(goal_id, task_id, completed, progress);
        self.commit(next, event);
        Some(completed)
    }

    /// Remove a task from a goal. Returns whether it existed.
    pub fn delete_task(&mut self, goal_id: &str, task_id: &str) -> bool {
        let found = self
            .goal(goal_id)
            .is_some_and(|g| g.task(task_id).is_some());
        if !found {
            tracing::debug!(goal_id, task_id, "delete of unknown task ignored");
            return false;
        }
        let event = StoreEvent::task_deleted(goal_id, task_id);

        let next = self
            .goals
            .iter()
            .map(|g| {
                if g.id == goal_id {
                    Goal {
                        tasks: g.tasks.iter().filter(|t| t.id != task_id).cloned().collect(),
                        ..g.clone()
                    }
                } else {
                    g.clone()
                }
            })
            .collect();
        self.commit(next, event);
        true
    }

    /// Swap in the new state, write it through, then notify observers.
    fn commit(&mut self, next: Vec<Goal>, event: StoreEvent) {
        self.goals = Arc::new(next);
        tracing::debug!(event = event.event_type(), goal_id = event.goal_id(), "goal store updated");
        self.persist();
        self.dispatcher.dispatch(&event);
    }

    fn persist(&mut self) {
        let result = encode_goals(&self.goals).and_then(|blob| self.adapter.save(&blob));
        if let Err(e) = result {
            tracing::warn!("failed to save goals, keeping in-memory state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::persistence::MemoryAdapter;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Adapter whose saves always fail.
    struct BrokenAdapter;

    impl PersistenceAdapter for BrokenAdapter {
        fn load(&self) -> Result<Option<String>, TrackerError> {
            Ok(Some("[]".to_string()))
        }

        fn save(&mut self, _blob: &str) -> Result<(), TrackerError> {
            Err(TrackerError::IoError {
                path: "quota".to_string(),
                source: std::io::Error::other("storage full"),
            })
        }
    }

    /// Adapter whose reads always fail.
    struct UnreadableAdapter;

    impl PersistenceAdapter for UnreadableAdapter {
        fn load(&self) -> Result<Option<String>, TrackerError> {
            Err(TrackerError::NotFound("storage".to_string()))
        }

        fn save(&mut self, _blob: &str) -> Result<(), TrackerError> {
            Ok(())
        }
    }

    struct Recorder(Rc<RefCell<Vec<StoreEvent>>>);

    impl StoreObserver for Recorder {
        fn notify(&self, event: &StoreEvent) -> Result<(), TrackerError> {
            self.0.borrow_mut().push(event.clone());
            Ok(())
        }
    }

    fn empty_store() -> GoalStore<MemoryAdapter> {
        GoalStore::open(MemoryAdapter::with_blob("[]"))
    }

    fn stored_goals(store: &GoalStore<MemoryAdapter>) -> Vec<Goal> {
        decode_goals(store.adapter().blob().unwrap()).unwrap()
    }

    #[test]
    fn open_without_stored_data_uses_seed() {
        let store = GoalStore::open(MemoryAdapter::new());
        assert_eq!(store.len(), 1);
        assert_eq!(store.goals()[0].title, "Trip to Japan");
        assert!(matches!(store.origin(), LoadOrigin::Seeded { .. }));
        // Opening never writes.
        assert_eq!(store.adapter().save_count(), 0);
    }

    #[test]
    fn open_with_blank_blob_uses_seed() {
        let store = GoalStore::open(MemoryAdapter::with_blob("   "));
        assert_eq!(store.len(), 1);
        assert!(matches!(store.origin(), LoadOrigin::Seeded { .. }));
    }

    #[test]
    fn open_with_malformed_blob_uses_seed() {
        let store = GoalStore::open(MemoryAdapter::with_blob("{\"broken\": tru"));
        assert_eq!(store.goals()[0].id, "1");
        match store.origin() {
            LoadOrigin::Seeded { reason } => assert!(reason.starts_with("malformed")),
            other => panic!("unexpected origin {:?}", other),
        }
    }

    #[test]
    fn open_with_unreadable_storage_uses_seed() {
        let store = GoalStore::open(UnreadableAdapter);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn open_with_stored_empty_list_stays_empty() {
        let store = empty_store();
        assert!(store.is_empty());
        assert_eq!(*store.origin(), LoadOrigin::Stored);
    }

    #[test]
    fn unknown_color_keeps_stored_goals() {
        let blob = r#"[
            {"id":"a","title":"Read more","icon":"📚","colorTheme":"blue","tasks":[]},
            {"id":"b","title":"Paint","icon":"🎨","colorTheme":"teal","tasks":[]}
        ]"#;
        let mut store = GoalStore::open(MemoryAdapter::with_blob(blob));
        assert_eq!(*store.origin(), LoadOrigin::Stored);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.goal("b").unwrap().color_theme,
            ColorTheme::Custom("teal".to_string())
        );

        store.add_task("a", "Finish Dune").unwrap();

        let stored = stored_goals(&store);
        let titles: Vec<&str> = stored.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Read more", "Paint"]);
        assert_eq!(stored[0].tasks.len(), 1);
        assert!(store.adapter().blob().unwrap().contains("\"colorTheme\":\"teal\""));
    }

    #[test]
    fn create_goal_appends_and_persists() {
        let mut store = empty_store();
        let first = store.create_goal("Learn Guitar", "", ColorTheme::Blue).unwrap();
        let second = store.create_goal("Run a marathon", "🏃", ColorTheme::Green).unwrap();

        let goals = store.goals();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].id, first);
        assert_eq!(goals[1].id, second);
        assert_eq!(goals[0].icon, PLACEHOLDER_ICON);
        assert_eq!(goals[1].icon, "🏃");
        assert!(goals[0].tasks.is_empty());
        assert_eq!(GoalStore::<MemoryAdapter>::compute_progress(&goals[0]), 0);

        assert_eq!(store.adapter().save_count(), 2);
        assert_eq!(stored_goals(&store), *goals);
    }

    #[test]
    fn rapid_creations_get_distinct_ids() {
        let mut store = empty_store();
        let a = store.create_goal("A", "", ColorTheme::Pink).unwrap();
        let b = store.create_goal("A", "", ColorTheme::Pink).unwrap();
        assert_ne!(a, b);

        let t1 = store.add_task(&a, "x").unwrap();
        let t2 = store.add_task(&a, "x").unwrap();
        assert_ne!(t1, t2);
    }

    #[test]
    fn blank_title_is_a_no_op() {
        let mut store = empty_store();
        assert!(store.create_goal("", "🎸", ColorTheme::Red).is_none());
        assert!(store.create_goal("   \t", "🎸", ColorTheme::Red).is_none());
        assert!(store.is_empty());
        assert_eq!(store.adapter().save_count(), 0);
    }

    #[test]
    fn custom_default_icon_applies_to_new_goals() {
        let mut store = empty_store().with_default_icon("⭐");
        let id = store.create_goal("Stars", "", ColorTheme::Yellow).unwrap();
        assert_eq!(store.goal(&id).unwrap().icon, "⭐");
    }

    #[test]
    fn only_an_empty_icon_gets_the_default() {
        let mut store = empty_store();
        let id = store.create_goal("Breathe", " ", ColorTheme::Green).unwrap();
        assert_eq!(store.goal(&id).unwrap().icon, " ");
        assert_eq!(stored_goals(&store)[0].icon, " ");
    }

    #[test]
    fn delete_goal_removes_goal_and_tasks() {
        let mut store = GoalStore::open(MemoryAdapter::new());
        assert!(store.delete_goal("1"));
        assert!(store.is_empty());
        assert_eq!(stored_goals(&store), Vec::<Goal>::new());
    }

    #[test]
    fn delete_unknown_goal_is_a_no_op() {
        let mut store = GoalStore::open(MemoryAdapter::new());
        assert!(!store.delete_goal("nope"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.adapter().save_count(), 0);
    }

    #[test]
    fn add_task_appends_incomplete_task() {
        let mut store = GoalStore::open(MemoryAdapter::new());
        let task_id = store.add_task("1", "Learn some Japanese").unwrap();

        let goal = store.goal("1").unwrap();
        assert_eq!(goal.tasks.len(), 9);
        let last = goal.tasks.last().unwrap();
        assert_eq!(last.id, task_id);
        assert_eq!(last.text, "Learn some Japanese");
        assert!(!last.completed);
        // 2 of 9 → 22.2 → 22
        assert_eq!(goal.progress(), 22);
    }

    #[test]
    fn add_blank_task_or_to_unknown_goal_is_a_no_op() {
        let mut store = GoalStore::open(MemoryAdapter::new());
        assert!(store.add_task("1", "  ").is_none());
        assert!(store.add_task("missing", "Real text").is_none());
        assert_eq!(store.goal("1").unwrap().tasks.len(), 8);
        assert_eq!(store.adapter().save_count(), 0);
    }

    #[test]
    fn toggle_task_flips_and_reports_flag() {
        let mut store = GoalStore::open(MemoryAdapter::new());
        assert_eq!(store.toggle_task("1", "3"), Some(true));
        assert_eq!(store.goal("1").unwrap().progress(), 38);
        assert_eq!(store.toggle_task("1", "3"), Some(false));
        assert_eq!(store.goal("1").unwrap().progress(), 25);
        assert_eq!(store.adapter().save_count(), 2);
    }

    #[test]
    fn toggle_unknown_ids_is_a_no_op() {
        let mut store = GoalStore::open(MemoryAdapter::new());
        assert_eq!(store.toggle_task("1", "99"), None);
        assert_eq!(store.toggle_task("99", "1"), None);
        assert_eq!(store.adapter().save_count(), 0);
    }

    #[test]
    fn delete_task_removes_only_that_task() {
        let mut store = GoalStore::open(MemoryAdapter::new());
        assert!(store.delete_task("1", "1"));
        let goal = store.goal("1").unwrap();
        assert_eq!(goal.tasks.len(), 7);
        assert!(goal.task("1").is_none());
        assert_eq!(goal.tasks[0].id, "2");
        // 1 of 7 → 14.3 → 14
        assert_eq!(goal.progress(), 14);

        assert!(!store.delete_task("1", "1"));
        assert!(!store.delete_task("nope", "2"));
    }

    #[test]
    fn earlier_snapshots_are_not_mutated() {
        let mut store = GoalStore::open(MemoryAdapter::new());
        let before = store.goals();
        store.toggle_task("1", "3");
        store.add_task("1", "Pack bags");

        assert_eq!(before[0].tasks.len(), 8);
        assert!(!before[0].task("3").unwrap().completed);
        assert_eq!(store.goals()[0].tasks.len(), 9);
    }

    #[test]
    fn save_failure_keeps_in_memory_state() {
        let mut store = GoalStore::open(BrokenAdapter);
        let id = store.create_goal("Still here", "", ColorTheme::Orange).unwrap();
        store.add_task(&id, "and this").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.goal(&id).unwrap().tasks.len(), 1);
    }

    #[test]
    fn observers_receive_one_event_per_mutation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = GoalStore::open(MemoryAdapter::new());
        store.add_observer(Box::new(Recorder(seen.clone())));

        store.toggle_task("1", "3");
        store.toggle_task("1", "missing");
        store.delete_goal("1");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(matches!(
            &seen[0],
            StoreEvent::TaskToggled { completed: true, progress: 38, .. }
        ));
        assert!(matches!(
            &seen[1],
            StoreEvent::GoalDeleted { tasks_removed: 8, .. }
        ));
    }
}
