//! Task storage - JSON file persistence

use anyhow::Result;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::warn;

use super::Task;
use crate::config::get_app_dir;

/// Durable backing for the task list.
///
/// `load` never fails: a missing or unreadable entry is an empty list.
pub trait TaskStore {
    fn load(&self) -> Vec<Task>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    /// Store at `tasks.json` in the application directory
    pub fn new() -> Result<Self> {
        Ok(Self::at(get_app_dir()?.join("tasks.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        Ok(tasks)
    }
}

impl TaskStore for JsonTaskStore {
    fn load(&self) -> Vec<Task> {
        match self.read() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(
                    "Ignoring unreadable task list at {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        if self.path.exists() {
            let backup_path = self.path.with_extension("json.bak");
            if let Err(e) = fs::copy(&self.path, &backup_path) {
                warn!("Failed to create backup: {}", e);
            }
        } else if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(tasks)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Store that keeps the last saved list in memory. Used by tests and by
/// callers that must not touch the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskStore {
    tasks: Rc<RefCell<Vec<Task>>>,
}

impl MemoryTaskStore {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Rc::new(RefCell::new(tasks)),
        }
    }

    /// Snapshot of what was last saved; clones share it
    pub fn saved(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }
}

impl TaskStore for MemoryTaskStore {
    fn load(&self) -> Vec<Task> {
        self.saved()
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        *self.tasks.borrow_mut() = tasks.to_vec();
        Ok(())
    }
}
