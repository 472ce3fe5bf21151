//! Command dispatch
//!
//! Every tree command loads the plan into a fresh board, applies at most one
//! change and prints the result. Nothing is written back.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{resolve_plan_path, TaskBoard, TaskPlan};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{DomainError, MoveOutcome, NodeId, Task, TaskId, TaskTree};
use crate::tree_traits::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".into()));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    match command {
        Commands::Config { command } => _config(command, &settings),
        Commands::Show => _show(&load_board(cli, &settings)?, &settings),
        Commands::List => _list(&load_board(cli, &settings)?),
        Commands::Find { id } => _find(&load_board(cli, &settings)?, *id),
        Commands::Leaves => _leaves(&load_board(cli, &settings)?),
        Commands::Delete { id } => _delete(&mut load_board(cli, &settings)?, *id, &settings),
        Commands::Move { id, to } => _move(&mut load_board(cli, &settings)?, *id, *to, &settings),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(level = "debug", skip(settings))]
fn load_board(cli: &Cli, settings: &Settings) -> CliResult<TaskBoard> {
    let path = resolve_plan_path(cli.plan.as_deref(), &settings.plan_file);
    debug!("plan: {}", path.display());
    let plan = TaskPlan::load(&path)?;
    let (tree, orphans) = plan.build_tree();
    for id in orphans {
        output::warning(&format!("task {} has an unknown parent, placed below the root", id));
    }
    Ok(TaskBoard::from_tree(tree)?)
}

/// Tree label for a task according to the display settings.
pub fn task_label(task: &Task, settings: &Settings) -> String {
    let mut label = task.title.clone();
    if settings.show_ids {
        label.push_str(&format!(" [#{}]", task.id));
    }
    if settings.show_status {
        label.push_str(&format!(" ({})", task.status));
    }
    label
}

fn render(board: &TaskBoard, settings: &Settings) -> Tree<String> {
    board
        .tree()
        .to_tree_string_with(|task| task_label(task, settings))
}

fn _show(board: &TaskBoard, settings: &Settings) -> CliResult<()> {
    output::info(&render(board, settings));
    Ok(())
}

fn _list(board: &TaskBoard) -> CliResult<()> {
    for task in board.tree().list_payloads() {
        output::info(&format!("{}\t{}\t{}", task.id, task.status, task.title));
    }
    Ok(())
}

/// Titles from the root down to the parent of `node`, joined with `>`.
///
/// `None` for the root.
pub fn ancestor_path(tree: &TaskTree<Task>, node: NodeId) -> Option<String> {
    let mut ancestors = Vec::new();
    let mut current = tree.parent(node);
    while let Some(n) = current {
        if let Some(task) = tree.get(n) {
            ancestors.push(task.title.as_str());
        }
        current = tree.parent(n);
    }
    if ancestors.is_empty() {
        return None;
    }
    Some(ancestors.iter().rev().join(" > "))
}

pub fn move_message(id: TaskId, outcome: &MoveOutcome<TaskId>) -> String {
    match outcome {
        MoveOutcome::Root => format!("task {} is the root, nothing moved", id),
        MoveOutcome::AttachedToRoot => format!("task {} moved below the root", id),
        MoveOutcome::AttachedTo(parent) => format!("task {} moved below task {}", id, parent),
    }
}

fn _find(board: &TaskBoard, id: TaskId) -> CliResult<()> {
    let tree = board.tree();
    let node = tree.find_node(&id).ok_or(DomainError::UnknownTask(id))?;

    if let Some(task) = tree.get(node) {
        output::header(&task.title);
        output::detail(&format!("id:       {}", task.id));
        output::detail(&format!("status:   {}", task.status));
        output::detail(&format!("priority: {:?}", task.priority));
        if let Some(description) = &task.description {
            output::detail(description);
        }
        if let Some(path) = ancestor_path(tree, node) {
            output::detail(&format!("path:     {}", path));
        }
        output::detail(&format!("subtasks: {}", tree.children(node).len()));
    }
    Ok(())
}

fn _leaves(board: &TaskBoard) -> CliResult<()> {
    for task in board.tree().leaves() {
        output::info(&format!("{}\t{}", task.id, task.title));
    }
    Ok(())
}

fn _delete(board: &mut TaskBoard, id: TaskId, settings: &Settings) -> CliResult<()> {
    let removed = board.remove(id)?;
    output::success(&format!("deleted task {} ({} tasks removed)", id, removed));
    output::info(&render(board, settings));
    Ok(())
}

fn _move(
    board: &mut TaskBoard,
    id: TaskId,
    to: Option<TaskId>,
    settings: &Settings,
) -> CliResult<()> {
    let outcome = board.move_task(id, to)?;
    output::success(&move_message(id, &outcome));
    output::info(&render(board, settings));
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::action("global", &path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}
