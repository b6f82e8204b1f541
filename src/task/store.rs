//! In-memory task store

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::error::{Result, TaskError};
use super::model::{Task, TaskEdit, TaskId, TaskPriority, TaskStatus};

/// Ordering for [`TaskStore::sort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending numeric ID
    Id,
    /// Ascending priority rank; unknown priorities first
    Priority,
}

/// All tasks of a session, keyed by ID in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: IndexMap<TaskId, Task>,
    strict: bool,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects statuses and priorities outside the known sets
    pub fn strict() -> Self {
        Self {
            tasks: IndexMap::new(),
            strict: true,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Max existing ID + 1, or 1 for an empty store
    pub fn next_id(&self) -> Result<TaskId> {
        match self.tasks.keys().max() {
            Some(max) => max.next().ok_or(TaskError::IdExhausted(*max)),
            None => Ok(TaskId(1)),
        }
    }

    pub fn add(
        &mut self,
        description: impl Into<String>,
        status: impl Into<String>,
        priority: impl Into<String>,
    ) -> Result<TaskId> {
        let task = Task::new(description, status, priority);
        self.validate(&task.status, &task.priority)?;

        let id = self.next_id()?;
        debug!("Adding task {}", id);
        self.tasks.insert(id, task);
        Ok(id)
    }

    /// Apply the non-empty fields of `edit` to an existing task.
    pub fn edit(&mut self, id: TaskId, edit: TaskEdit) -> Result<()> {
        let Some(task) = self.tasks.get(&id) else {
            return Err(TaskError::NotFound(id));
        };

        let description = non_blank(edit.description);
        let status = non_blank(edit.status);
        let priority = non_blank(edit.priority);

        self.validate(
            status.as_deref().unwrap_or(&task.status),
            priority.as_deref().unwrap_or(&task.priority),
        )?;

        let task = self.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        if let Some(description) = description {
            task.description = description;
        }
        if let Some(status) = status {
            task.status = status;
        }
        if let Some(priority) = priority {
            task.priority = priority;
        }
        debug!("Edited task {}", id);
        Ok(())
    }

    pub fn delete(&mut self, id: TaskId) -> Result<Task> {
        let task = self.tasks.shift_remove(&id).ok_or(TaskError::NotFound(id))?;
        debug!("Deleted task {}", id);
        Ok(task)
    }

    /// Insert or overwrite a task under a fixed ID. Existing IDs keep their
    /// position. Values are stored as given, regardless of strictness.
    pub fn upsert(&mut self, id: TaskId, task: Task) {
        self.tasks.insert(id, task);
    }

    pub fn list(&self) -> Vec<(TaskId, &Task)> {
        self.tasks.iter().map(|(id, task)| (*id, task)).collect()
    }

    /// Tasks whose status equals `status` exactly
    pub fn filter_by_status(&self, status: &str) -> Vec<(TaskId, &Task)> {
        self.tasks
            .iter()
            .filter(|(_, task)| task.status == status)
            .map(|(id, task)| (*id, task))
            .collect()
    }

    pub fn sort(&self, key: SortKey) -> Vec<(TaskId, &Task)> {
        let mut tasks = self.list();
        match key {
            SortKey::Id => tasks.sort_by_key(|(id, _)| *id),
            SortKey::Priority => tasks.sort_by_key(|(_, task)| task.priority_rank()),
        }
        tasks
    }

    fn validate(&self, status: &str, priority: &str) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        if TaskStatus::parse(status).is_none() {
            return Err(TaskError::InvalidStatus(status.to_string()));
        }
        if TaskPriority::parse(priority).is_none() {
            return Err(TaskError::InvalidPriority(priority.to_string()));
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Serializes as a map of stringified ID to task, in insertion order.
impl Serialize for TaskStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tasks.len()))?;
        for (id, task) in &self.tasks {
            map.serialize_entry(&id.to_string(), task)?;
        }
        map.end()
    }
}
