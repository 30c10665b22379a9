//! Lazy traversal iterators over [`Tree`]s.
//!
//! Every traversal yields node handles (`&Node<T>`), so collecting values
//! and running a side effect per node are both just iterator consumption:
//!
//! ```
//! use balanced_bst::Tree;
//!
//! let tree = Tree::build(vec![2, 1, 3]);
//!
//! let values: Vec<i32> = tree.pre_order().map(|n| *n.value()).collect();
//! assert_eq!(values, vec![2, 1, 3]);
//!
//! let mut sum = 0;
//! for node in tree.in_order() {
//!     sum += *node.value();
//! }
//! assert_eq!(sum, 6);
//! ```
//!
//! All traversals use explicit stacks (or a queue) rather than recursion, so
//! iterating a badly skewed tree cannot exhaust the call stack.

use std::collections::VecDeque;

use crate::tree::{Link, Node, Tree};

/// Breadth-first traversal: the root, then each deeper level left to right.
///
/// Created by [`Tree::level_order`].
pub struct LevelOrder<'a, T> {
    queue: VecDeque<&'a Node<T>>,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node)
    }
}

/// Depth-first traversal yielding nodes in ascending value order.
///
/// Created by [`Tree::in_order`].
pub struct InOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
    current: Option<&'a Node<T>>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: Vec::new(),
            current: root,
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        // Walk down the left spine of the pending subtree, then emit the
        // deepest node and move to its right subtree.
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left();
        }
        let node = self.stack.pop()?;
        self.current = node.right();
        Some(node)
    }
}

/// Depth-first traversal yielding each node before its subtrees.
///
/// Created by [`Tree::pre_order`].
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree pops (and is visited) first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

/// Depth-first traversal yielding both subtrees before their node.
///
/// Created by [`Tree::post_order`].
pub struct PostOrder<'a, T> {
    /// Nodes still to process, each flagged with whether its children have
    /// already been pushed.
    stack: Vec<(&'a Node<T>, bool)>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.map(|node| (node, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(node);
            }
            self.stack.push((node, true));
            self.stack.extend(node.right().map(|right| (right, false)));
            self.stack.extend(node.left().map(|left| (left, false)));
        }
    }
}

/// Owning in-order iterator, consuming the tree and yielding its values in
/// ascending order.
///
/// Created by [`IntoIterator`] for [`Tree`].
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    current: Link<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(node);
        }
        let mut node = self.stack.pop()?;
        self.current = node.right.take();
        Some(node.value)
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            stack: Vec::new(),
            current: self.root.take(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a Node<T>;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(iter: impl Iterator<Item = &'a Node<i32>>) -> Vec<i32> {
        iter.map(|n| *n.value()).collect()
    }

    /// A perfect three-level tree:
    ///
    /// ```text
    ///       4
    ///     /   \
    ///    2     6
    ///   / \   / \
    ///  1   3 5   7
    /// ```
    fn perfect_tree() -> Tree<i32> {
        Tree::build(1..=7)
    }

    #[test]
    fn level_order_visits_levels_left_to_right() {
        let tree = perfect_tree();

        assert_eq!(values(tree.level_order()), vec![4, 2, 6, 1, 3, 5, 7]);
    }

    #[test]
    fn in_order_is_ascending() {
        let tree = perfect_tree();

        assert_eq!(values(tree.in_order()), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn pre_order_visits_node_before_subtrees() {
        let tree = perfect_tree();

        assert_eq!(values(tree.pre_order()), vec![4, 2, 1, 3, 6, 5, 7]);
    }

    #[test]
    fn post_order_visits_subtrees_before_node() {
        let tree = perfect_tree();

        assert_eq!(values(tree.post_order()), vec![1, 3, 2, 5, 7, 6, 4]);
    }

    #[test]
    fn traversals_of_empty_tree_are_empty() {
        let tree = Tree::<i32>::new();

        assert!(tree.level_order().next().is_none());
        assert!(tree.in_order().next().is_none());
        assert!(tree.pre_order().next().is_none());
        assert!(tree.post_order().next().is_none());
        assert!(tree.into_iter().next().is_none());
    }

    #[test]
    fn all_traversals_cover_the_same_values() {
        let tree = Tree::build(vec![8, 3, 10, 1, 6, 14, 4, 7, 13]);
        let mut expected = values(tree.in_order());
        expected.sort_unstable();

        for traversal in [
            values(tree.level_order()),
            values(tree.pre_order()),
            values(tree.post_order()),
        ] {
            let mut sorted = traversal;
            sorted.sort_unstable();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn skewed_chains_do_not_recurse() {
        let mut left_skewed = Tree::new();
        let mut right_skewed = Tree::new();
        for value in 0..50_000 {
            right_skewed.insert(value);
            left_skewed.insert(-value);
        }

        assert_eq!(right_skewed.in_order().count(), 50_000);
        assert_eq!(left_skewed.in_order().count(), 50_000);
        assert_eq!(right_skewed.post_order().count(), 50_000);
        assert_eq!(right_skewed.into_iter().count(), 50_000);
    }

    #[test]
    fn into_iter_yields_owned_sorted_values() {
        let tree = Tree::build(vec![5, 3, 8, 1, 4, 7, 9]);
        let collected: Vec<i32> = tree.into_iter().collect();

        assert_eq!(collected, vec![1, 3, 4, 5, 7, 8, 9]);
    }
}
