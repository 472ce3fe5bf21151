//! Reported results of structural tree operations.

use std::fmt;

use thiserror::Error;

/// Where an inserted payload ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<K> {
    /// The tree was empty; the requested parent (if any) was ignored.
    BecameRoot,
    /// No parent was requested; attached as the last child of the root.
    AttachedToRoot,
    /// Attached as the last child of the node with this identifier.
    AttachedTo(K),
    /// The requested parent does not exist; attached to the root instead.
    ParentNotFoundAttachedToRoot(K),
}

impl<K> InsertOutcome<K> {
    /// True when the payload landed exactly where the caller asked.
    pub fn is_exact(&self) -> bool {
        !matches!(self, InsertOutcome::ParentNotFoundAttachedToRoot(_))
    }
}

impl<K: fmt::Debug> fmt::Display for InsertOutcome<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertOutcome::BecameRoot => write!(f, "became root"),
            InsertOutcome::AttachedToRoot => write!(f, "attached to root"),
            InsertOutcome::AttachedTo(id) => write!(f, "attached to {:?}", id),
            InsertOutcome::ParentNotFoundAttachedToRoot(id) => {
                write!(f, "parent {:?} not found, attached to root", id)
            }
        }
    }
}

/// Where a successfully moved subtree ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome<K> {
    /// The moved node is (still) the root.
    Root,
    /// Attached as the last child of the root.
    AttachedToRoot,
    /// Attached as the last child of the node with this identifier.
    AttachedTo(K),
}

/// Why a move was rejected. The tree is unchanged in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError<K: fmt::Debug> {
    #[error("node to move not found: {0:?}")]
    SourceNotFound(K),

    #[error("destination not found: {0:?}")]
    DestinationNotFound(K),

    #[error("destination {destination:?} lies inside the subtree of {moved:?}")]
    CycleDetected { moved: K, destination: K },
}
