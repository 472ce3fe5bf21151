//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod board;

pub use board::{Action, TaskBoard};
