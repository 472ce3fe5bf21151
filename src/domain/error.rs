//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::TaskId;
use crate::domain::outcome::MoveError;

/// Domain errors represent task hierarchy violations.
/// Routine absence (missing parent, nothing to delete) is not an error; see
/// the outcome types on [`TaskTree`](crate::domain::TaskTree).
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    #[error("task {0} already exists")]
    TaskExists(TaskId),

    #[error("move rejected: {0}")]
    Move(#[from] MoveError<TaskId>),

    #[error("invalid task plan {path}: {message}")]
    InvalidPlan { path: PathBuf, message: String },

    #[error("duplicate task id {id} in plan {path}")]
    DuplicateTask { path: PathBuf, id: TaskId },
}
