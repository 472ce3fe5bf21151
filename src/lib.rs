//! Hierarchical task tree with re-parenting and cascading delete.
//!
//! The core is [`domain::TaskTree`]: an arena-backed tree addressed by payload
//! identifiers. [`collections`] holds the linear companions (list, stack,
//! queue) and [`application::TaskBoard`] ties them together.

pub mod application;
pub mod cli;
pub mod collections;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{HasIdentifier, InsertOutcome, MoveError, MoveOutcome, NodeId, TaskTree};
