use crate::models::{Task, TaskSort, TaskStats, TaskStatus};

/// Task list as last fetched from the backend, plus the task open for editing.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    sort: TaskSort,
    editing: Option<i64>,
}

impl TaskBoard {
    pub fn new(sort: TaskSort) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Swaps in a fresh task list. An edit in progress is dropped if its task is gone.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        if let Some(id) = self.editing {
            if self.find(id).is_none() {
                self.editing = None;
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn sort(&self) -> TaskSort {
        self.sort
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn stats(&self) -> TaskStats {
        let completed = self
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count();
        TaskStats {
            total: self.tasks.len(),
            pending: self.tasks.len() - completed,
            completed,
        }
    }

    pub fn begin_edit(&mut self, id: i64) -> Option<&Task> {
        let position = self.tasks.iter().position(|task| task.id == id)?;
        self.editing = Some(id);
        self.tasks.get(position)
    }

    pub fn editing_task(&self) -> Option<&Task> {
        self.editing.and_then(|id| self.find(id))
    }
}
