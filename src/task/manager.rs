//! Ordered to-do list with write-through persistence

use anyhow::Result;
use tracing::{debug, warn};

use super::model::now_millis;
use super::{Task, TaskStore};

pub struct TaskManager {
    store: Box<dyn TaskStore>,
    tasks: Vec<Task>,
}

impl TaskManager {
    pub fn new(store: Box<dyn TaskStore>) -> Self {
        let tasks = store.load();
        debug!("Loaded {} tasks", tasks.len());
        Self { store, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Appends a task and persists. Blank text is ignored and returns `None`.
    pub fn add(&mut self, text: &str) -> Result<Option<i64>> {
        self.add_at(text, now_millis())
    }

    fn add_at(&mut self, text: &str, now: i64) -> Result<Option<i64>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let id = self.next_id(now);
        let mut tasks = self.tasks.clone();
        tasks.push(Task::new(id, text));
        self.commit(tasks)?;
        Ok(Some(id))
    }

    /// Flips `completed` for the matching task. Returns whether it existed.
    pub fn toggle(&mut self, id: i64) -> Result<bool> {
        let found = self.get(id).is_some();
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    Task {
                        completed: !task.completed,
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();
        self.commit(tasks)?;
        Ok(found)
    }

    /// Removes the matching task. Returns whether it existed.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        let found = tasks.len() != self.tasks.len();
        self.commit(tasks)?;
        Ok(found)
    }

    // Ids are creation timestamps; two adds in the same millisecond would collide.
    fn next_id(&self, now: i64) -> i64 {
        if self.tasks.iter().any(|t| t.id == now) {
            self.tasks.iter().map(|t| t.id).max().unwrap_or(now) + 1
        } else {
            now
        }
    }

    /// Saves `tasks` and only then replaces the in-memory list, so a failed
    /// save leaves both sides as they were.
    fn commit(&mut self, tasks: Vec<Task>) -> Result<()> {
        self.store.save(&tasks).inspect_err(|e| {
            warn!("Failed to save tasks: {}", e);
        })?;
        self.tasks = tasks;
        Ok(())
    }
}
