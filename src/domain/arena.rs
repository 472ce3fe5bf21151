use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, info, instrument, trace, warn};

use crate::domain::identifier::{ByTrait, HasIdentifier, IdentifierOf};
use crate::domain::outcome::{InsertOutcome, MoveError, MoveOutcome};

/// Handle to a node inside a [`TaskTree`].
///
/// Handles are generational: once the node is deleted the handle resolves to
/// nothing, even if the slot is reused by a later insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "NodeId({}v{})", slot, generation)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
struct TreeNode<T> {
    payload: T,
    /// None only for the root
    parent: Option<NodeId>,
    /// Insertion order
    children: Vec<NodeId>,
}

/// Rooted multi-child tree of payloads addressed by identifier.
///
/// All nodes live in one arena owned by the tree. Every node except the root
/// has exactly one parent, and structure is only ever changed through the
/// methods below, so no cycles or shared subtrees can arise.
///
/// Lookups by identifier are depth-first pre-order and the first match wins
/// when identifiers are duplicated.
#[derive(Debug, Clone)]
pub struct TaskTree<T, X = ByTrait> {
    arena: Arena<TreeNode<T>>,
    root: Option<NodeId>,
    extractor: X,
}

impl<T: HasIdentifier> Default for TaskTree<T, ByTrait> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HasIdentifier> TaskTree<T, ByTrait> {
    pub fn new() -> Self {
        Self::with_extractor(ByTrait)
    }
}

impl<T, X: IdentifierOf<T>> TaskTree<T, X> {
    pub fn with_extractor(extractor: X) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            extractor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, node: NodeId) -> Option<&T> {
        self.arena.get(node.0).map(|n| &n.payload)
    }

    /// Children of `node` in insertion order; empty for leaves and stale handles.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.arena
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Direct parent of this specific node instance.
    ///
    /// Compares node identity, not identifiers, so it stays exact when several
    /// nodes share an identifier.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node.0).and_then(|n| n.parent)
    }

    pub fn identifier_of(&self, node: NodeId) -> Option<X::Id> {
        self.get(node).and_then(|p| self.extractor.identifier_of(p))
    }

    /// Inserts `payload` below the node identified by `parent_id`.
    ///
    /// Never drops the payload: an empty tree makes it the root, and a missing
    /// or absent parent attaches it to the root.
    #[instrument(level = "debug", skip(self, payload))]
    pub fn insert(&mut self, payload: T, parent_id: Option<X::Id>) -> InsertOutcome<X::Id> {
        let Some(root) = self.root else {
            let node = self.alloc(payload, None);
            self.root = Some(node);
            info!("payload inserted as root");
            return InsertOutcome::BecameRoot;
        };

        match parent_id {
            None => {
                let node = self.alloc(payload, Some(root));
                self.arena[root.0].children.push(node);
                warn!("tree already has a root, payload attached to it");
                InsertOutcome::AttachedToRoot
            }
            Some(parent_id) => match self.first_match(&parent_id, None) {
                Some(parent) => {
                    let node = self.alloc(payload, Some(parent));
                    self.arena[parent.0].children.push(node);
                    info!(?parent_id, "payload attached to parent");
                    InsertOutcome::AttachedTo(parent_id)
                }
                None => {
                    let node = self.alloc(payload, Some(root));
                    self.arena[root.0].children.push(node);
                    warn!(?parent_id, "parent not found, payload attached to root");
                    InsertOutcome::ParentNotFoundAttachedToRoot(parent_id)
                }
            },
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, id: &X::Id) -> Option<&T> {
        self.find_node(id).and_then(|node| self.get(node))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn find_node(&self, id: &X::Id) -> Option<NodeId> {
        if self.is_empty() {
            debug!("tree is empty");
            return None;
        }
        self.first_match(id, None)
    }

    /// Removes the first node matching `id` together with its whole subtree.
    ///
    /// Deleting the root empties the tree. Children are never promoted.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, id: &X::Id) -> bool {
        if self.is_empty() {
            warn!("tree is empty, nothing to delete");
            return false;
        }
        let Some(node) = self.first_match(id, None) else {
            debug!("no node matches");
            return false;
        };

        if Some(node) == self.root {
            self.clear();
            info!("root deleted, tree is empty");
            return true;
        }

        self.detach(node);
        let removed: Vec<NodeId> = self.descendants(node).map(|(n, _)| n).collect();
        for n in &removed {
            self.arena.remove(n.0);
        }
        info!(removed = removed.len(), "subtree deleted");
        true
    }

    /// Re-parents the first node matching `id` together with its subtree.
    ///
    /// With `new_parent` absent the node goes to the top level, which means
    /// "last child of the root" unless the node already is the root. The
    /// destination is resolved before anything is detached, so a failed move
    /// leaves the tree untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn try_move(
        &mut self,
        id: &X::Id,
        new_parent: Option<&X::Id>,
    ) -> Result<MoveOutcome<X::Id>, MoveError<X::Id>> {
        let node = self
            .first_match(id, None)
            .ok_or_else(|| MoveError::SourceNotFound(id.clone()))?;
        let root = self.root.unwrap_or_else(|| unreachable!("matched node in empty tree"));

        let Some(dest_id) = new_parent else {
            if node == root {
                debug!("root moved to top level, nothing to do");
                return Ok(MoveOutcome::Root);
            }
            self.detach(node);
            self.attach(root, node);
            info!("subtree moved under root");
            return Ok(MoveOutcome::AttachedToRoot);
        };

        match self.first_match(dest_id, Some(node)) {
            Some(dest) => {
                self.detach(node);
                self.attach(dest, node);
                info!(?dest_id, "subtree moved");
                Ok(MoveOutcome::AttachedTo(dest_id.clone()))
            }
            None if self.first_match(dest_id, None).is_some() => {
                warn!(?dest_id, "destination inside moved subtree, move rejected");
                Err(MoveError::CycleDetected {
                    moved: id.clone(),
                    destination: dest_id.clone(),
                })
            }
            None => {
                warn!(?dest_id, "destination not found, move rejected");
                Err(MoveError::DestinationNotFound(dest_id.clone()))
            }
        }
    }

    /// Boolean form of [`TaskTree::try_move`].
    pub fn move_node(&mut self, id: &X::Id, new_parent: Option<&X::Id>) -> bool {
        self.try_move(id, new_parent).is_ok()
    }

    /// Every payload, root first, each subtree fully before the next sibling.
    pub fn list_payloads(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.payloads().cloned().collect()
    }

    pub fn payloads(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, payload)| payload)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> PreOrderIterator<'_, T> {
        PreOrderIterator::new(&self.arena, self.root)
    }

    /// Pre-order walk of the subtree rooted at `node`, `node` included.
    #[instrument(level = "trace", skip(self))]
    pub fn descendants(&self, node: NodeId) -> PreOrderIterator<'_, T> {
        PreOrderIterator::new(&self.arena, self.arena.contains(node.0).then_some(node))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(&self.arena, self.root)
    }

    /// Number of levels; 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node: NodeId) -> usize {
        1 + self.arena[node.0]
            .children
            .iter()
            .map(|&child| self.calculate_depth(child))
            .max()
            .unwrap_or(0)
    }

    /// Payloads of nodes without children, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<&T> {
        self.iter()
            .filter(|(node, _)| self.children(*node).is_empty())
            .map(|(_, payload)| payload)
            .collect()
    }

    fn alloc(&mut self, payload: T, parent: Option<NodeId>) -> NodeId {
        NodeId(self.arena.insert(TreeNode {
            payload,
            parent,
            children: Vec::new(),
        }))
    }

    /// First pre-order node whose identifier equals `id`, never descending into
    /// `skip`. Payloads without an identifier are non-matches.
    fn first_match(&self, id: &X::Id, skip: Option<NodeId>) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(current) = stack.pop() {
            if Some(current) == skip {
                continue;
            }
            let node = &self.arena[current.0];
            if self.extractor.identifier_of(&node.payload).as_ref() == Some(id) {
                trace!(%current, "match");
                return Some(current);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.arena[node.0].parent.take() else {
            return;
        };
        let siblings = &mut self.arena[parent.0].children;
        let Some(pos) = siblings.iter().position(|&c| c == node) else {
            unreachable!("{} missing from children of its parent {}", node, parent);
        };
        siblings.remove(pos);
    }

    fn attach(&mut self, parent: NodeId, node: NodeId) {
        self.arena[parent.0].children.push(node);
        self.arena[node.0].parent = Some(parent);
    }
}

pub struct PreOrderIterator<'a, T> {
    arena: &'a Arena<TreeNode<T>>,
    stack: Vec<NodeId>,
}

impl<'a, T> PreOrderIterator<'a, T> {
    fn new(arena: &'a Arena<TreeNode<T>>, start: Option<NodeId>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrderIterator<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let node = self.arena.get(current.0)?;
        // reversed so the first child is popped first
        self.stack.extend(node.children.iter().rev());
        Some((current, &node.payload))
    }
}

pub struct PostOrderIterator<'a, T> {
    arena: &'a Arena<TreeNode<T>>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(arena: &'a Arena<TreeNode<T>>, start: Option<NodeId>) -> Self {
        Self {
            arena,
            stack: start.map(|n| (n, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get(current.0) {
                if visited {
                    return Some((current, &node.payload));
                }
                self.stack.push((current, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
