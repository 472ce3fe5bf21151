//! Domain layer: task entities and the task hierarchy
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod identifier;
pub mod outcome;

pub use arena::{NodeId, PostOrderIterator, PreOrderIterator, TaskTree};
pub use entities::*;
pub use error::DomainError;
pub use identifier::{ByTrait, Extractor, HasIdentifier, IdentifierOf};
pub use outcome::{InsertOutcome, MoveError, MoveOutcome};
