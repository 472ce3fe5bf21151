//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and owns file-based input (task plans).

pub mod error;
pub mod error_ext;
pub mod plan;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use plan::{resolve_plan_path, PlanEntry, TaskPlan};
pub use services::{Action, TaskBoard};
