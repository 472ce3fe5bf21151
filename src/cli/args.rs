//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::TaskId;

/// Hierarchical task tree: inspect and reshape task plans
#[derive(Parser, Debug)]
#[command(name = "tasktree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Task plan (default: plan_file setting)
    #[arg(short, long, global = true, env = "TASKTREE_PLAN", value_hint = ValueHint::FilePath)]
    pub plan: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the task hierarchy
    Show,

    /// List tasks in depth-first order
    List,

    /// Show a single task
    Find {
        /// Task id
        id: TaskId,
    },

    /// List tasks without subtasks
    Leaves,

    /// Delete a task with all its subtasks and show the result
    Delete {
        /// Task id
        id: TaskId,
    },

    /// Move a task with its subtasks and show the result
    Move {
        /// Task id
        id: TaskId,
        /// New parent id (default: top level, i.e. below the root)
        #[arg(short, long)]
        to: Option<TaskId>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
