//! Task plans: TOML descriptions of a task hierarchy
//!
//! ```toml
//! [[task]]
//! id = 1
//! title = "Release 1.0"
//!
//! [[task]]
//! id = 2
//! title = "Write changelog"
//! parent = 1
//! status = "in-progress"
//! ```
//!
//! Entries are inserted in file order, so a parent must appear before its
//! children. A parent that never appears falls back to the root, exactly
//! like [`TaskTree::insert`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{DomainError, InsertOutcome, Task, TaskId, TaskTree};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default)]
    pub parent: Option<TaskId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPlan {
    #[serde(rename = "task", default)]
    pub entries: Vec<PlanEntry>,
}

impl TaskPlan {
    /// Parse plan content. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, DomainError> {
        let plan: TaskPlan = toml::from_str(content).map_err(|e| DomainError::InvalidPlan {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut seen = HashSet::new();
        for entry in &plan.entries {
            if !seen.insert(entry.task.id) {
                return Err(DomainError::DuplicateTask {
                    path: path.to_path_buf(),
                    id: entry.task.id,
                });
            }
        }
        Ok(plan)
    }

    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> ApplicationResult<Self> {
        let content = std::fs::read_to_string(path).with_path_context("read plan", path)?;
        let plan = Self::parse(&content, path)?;
        debug!(entries = plan.entries.len(), "plan loaded");
        Ok(plan)
    }

    /// Replay the plan into a fresh tree.
    ///
    /// Returns the tree plus the ids of tasks whose parent could not be found.
    #[instrument(level = "debug", skip(self))]
    pub fn build_tree(&self) -> (TaskTree<Task>, Vec<TaskId>) {
        let mut tree = TaskTree::new();
        let mut orphans = Vec::new();
        for entry in &self.entries {
            let outcome = tree.insert(entry.task.clone(), entry.parent);
            if let InsertOutcome::ParentNotFoundAttachedToRoot(parent) = outcome {
                warn!(task = entry.task.id, parent, "parent missing from plan");
                orphans.push(entry.task.id);
            }
        }
        (tree, orphans)
    }
}

/// Resolve the plan path: explicit argument wins over the configured default.
pub fn resolve_plan_path(explicit: Option<&Path>, configured: &Path) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| configured.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;

    const PLAN: &str = r#"
[[task]]
id = 1
title = "Release"

[[task]]
id = 2
title = "Changelog"
parent = 1
status = "in-progress"

[[task]]
id = 3
title = "Stray"
parent = 42
"#;

    #[test]
    fn given_plan_when_parsing_then_reads_entries_in_order() {
        let plan = TaskPlan::parse(PLAN, Path::new("plan.toml")).unwrap();
        assert_eq!(plan.entries.len(), 3);
        assert_eq!(plan.entries[1].parent, Some(1));
        assert_eq!(plan.entries[1].task.status, TaskStatus::InProgress);
        assert_eq!(plan.entries[0].parent, None);
    }

    #[test]
    fn given_missing_parent_when_building_then_reports_orphan() {
        let plan = TaskPlan::parse(PLAN, Path::new("plan.toml")).unwrap();
        let (tree, orphans) = plan.build_tree();
        assert_eq!(orphans, vec![3]);
        let ids: Vec<TaskId> = tree.payloads().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn given_duplicate_ids_when_parsing_then_fails() {
        let content = "[[task]]\nid = 1\ntitle = \"a\"\n[[task]]\nid = 1\ntitle = \"b\"\n";
        let err = TaskPlan::parse(content, Path::new("dup.toml")).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateTask { id: 1, .. }));
    }

    #[test]
    fn given_malformed_toml_when_parsing_then_invalid_plan() {
        let err = TaskPlan::parse("[[task]\nid = ", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn given_explicit_path_when_resolving_then_overrides_config() {
        let configured = Path::new("tasks.toml");
        assert_eq!(
            resolve_plan_path(Some(Path::new("other.toml")), configured),
            PathBuf::from("other.toml")
        );
        assert_eq!(resolve_plan_path(None, configured), configured);
    }
}
