/*
Rendering lives in a trait so the domain layer stays free of terminal concerns.
termtree does the box drawing; we only translate nodes into labelled leaves.
 */
use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{IdentifierOf, NodeId, TaskTree};

pub trait TreeRender<T> {
    fn to_tree_string(&self) -> Tree<String>
    where
        T: Display,
    {
        self.to_tree_string_with(|payload| payload.to_string())
    }

    fn to_tree_string_with<F>(&self, label: F) -> Tree<String>
    where
        F: Fn(&T) -> String;
}

impl<T, X: IdentifierOf<T>> TreeRender<T> for TaskTree<T, X> {
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string_with<F>(&self, label: F) -> Tree<String>
    where
        F: Fn(&T) -> String,
    {
        fn build_tree<T, X, F>(tree: &TaskTree<T, X>, node: NodeId, label: &F) -> Tree<String>
        where
            X: IdentifierOf<T>,
            F: Fn(&T) -> String,
        {
            let text = tree.get(node).map(label).unwrap_or_default();
            let leaves: Vec<_> = tree
                .children(node)
                .iter()
                .map(|&child| build_tree(tree, child, label))
                .collect();
            Tree::new(text).with_leaves(leaves)
        }

        match self.root() {
            Some(root) => build_tree(self, root, &label),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_tree() {
        let mut tree: TaskTree<u64> = TaskTree::new();
        tree.insert(1, None);
        tree.insert(2, Some(1));
        tree.insert(3, Some(2));
        tree.insert(4, Some(1));

        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "1");
        assert!(lines[1].ends_with("2"));
        assert!(lines[2].ends_with("3"));
        assert!(lines[3].ends_with("4"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_render_empty_tree() {
        let tree: TaskTree<u64> = TaskTree::new();
        assert_eq!(tree.to_tree_string().root, "Empty tree");
    }

    #[test]
    fn test_render_with_custom_label() {
        let mut tree: TaskTree<u64> = TaskTree::new();
        tree.insert(7, None);
        assert_eq!(tree.to_tree_string_with(|p| format!("#{}", p)).root, "#7");
    }
}
