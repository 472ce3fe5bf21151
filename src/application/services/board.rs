//! Task board service
//!
//! Owns the task hierarchy together with its companions: an undo history,
//! a scheduling queue and an archive of removed tasks.
//!
//! Task ids on a board are unique. History entries refer to tasks by id, so
//! every undo step lands on exactly the task it recorded.

use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::collections::{ActionStack, ScheduledQueue, TaskList};
use crate::domain::{DomainError, InsertOutcome, MoveOutcome, Task, TaskId, TaskTree};

/// A reversible change to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Added { id: TaskId },
    /// Removed subtree in pre-order, each task with the parent it had.
    Removed { tasks: Vec<(Task, Option<TaskId>)> },
    Moved {
        id: TaskId,
        previous_parent: Option<TaskId>,
    },
}

#[derive(Debug, Default)]
pub struct TaskBoard {
    tree: TaskTree<Task>,
    history: ActionStack<Action>,
    schedule: ScheduledQueue<TaskId>,
    archive: TaskList<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing tree; fails if two tasks share an id.
    pub fn from_tree(tree: TaskTree<Task>) -> ApplicationResult<Self> {
        if let Some(id) = tree.payloads().map(|t| t.id).duplicates().next() {
            return Err(DomainError::TaskExists(id).into());
        }
        Ok(Self {
            tree,
            ..Self::default()
        })
    }

    pub fn tree(&self) -> &TaskTree<Task> {
        &self.tree
    }

    #[instrument(level = "debug", skip(self, task), fields(id = task.id))]
    pub fn add(
        &mut self,
        task: Task,
        parent: Option<TaskId>,
    ) -> ApplicationResult<InsertOutcome<TaskId>> {
        let id = task.id;
        if self.tree.find_node(&id).is_some() {
            return Err(DomainError::TaskExists(id).into());
        }
        let outcome = self.tree.insert(task, parent);
        self.history.push(Action::Added { id });
        Ok(outcome)
    }

    /// Removes a task and its subtasks; returns how many tasks were archived.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: TaskId) -> ApplicationResult<usize> {
        let node = self
            .tree
            .find_node(&id)
            .ok_or(DomainError::UnknownTask(id))?;

        let tasks: Vec<(Task, Option<TaskId>)> = self
            .tree
            .descendants(node)
            .map(|(n, task)| {
                let parent = self.tree.parent(n).and_then(|p| self.tree.identifier_of(p));
                (task.clone(), parent)
            })
            .collect();

        self.tree.delete(&id);
        for (task, _) in &tasks {
            self.archive.append(task.clone());
        }
        let removed = tasks.len();
        self.history.push(Action::Removed { tasks });
        info!(removed, "tasks archived");
        Ok(removed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn move_task(
        &mut self,
        id: TaskId,
        new_parent: Option<TaskId>,
    ) -> ApplicationResult<MoveOutcome<TaskId>> {
        let previous_parent = self
            .tree
            .find_node(&id)
            .and_then(|n| self.tree.parent(n))
            .and_then(|p| self.tree.identifier_of(p));

        let outcome = self
            .tree
            .try_move(&id, new_parent.as_ref())
            .map_err(DomainError::from)?;
        self.history.push(Action::Moved {
            id,
            previous_parent,
        });
        Ok(outcome)
    }

    /// Reverts the most recent action. Returns it, or `None` if history is empty.
    ///
    /// Restored subtasks are appended to their parents, so sibling order is
    /// not preserved.
    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> Option<Action> {
        let action = self.history.pop()?;
        match &action {
            Action::Added { id } => {
                self.tree.delete(id);
            }
            Action::Removed { tasks } => {
                for (task, parent) in tasks {
                    self.archive.remove(task);
                    self.tree.insert(task.clone(), *parent);
                }
            }
            Action::Moved {
                id,
                previous_parent,
            } => {
                // cannot fail: ids are unique and the previous parent was
                // outside the moved subtree
                let _ = self.tree.try_move(id, previous_parent.as_ref());
            }
        }
        debug!(?action, "undone");
        Some(action)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn schedule(&mut self, id: TaskId) -> ApplicationResult<()> {
        if self.tree.find_node(&id).is_none() {
            return Err(DomainError::UnknownTask(id).into());
        }
        self.schedule.enqueue(id);
        Ok(())
    }

    /// Next scheduled task still on the board; stale entries are dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn next_scheduled(&mut self) -> Option<Task> {
        while let Some(id) = self.schedule.dequeue() {
            if let Some(task) = self.tree.find(&id) {
                return Some(task.clone());
            }
            debug!(id, "scheduled task no longer on board, skipped");
        }
        None
    }

    pub fn archived(&self) -> impl Iterator<Item = &Task> {
        self.archive.iter()
    }
}
