//! The tree engine: an ordered set of unique values stored as a BST.
//!
//! Mutation is in place and never rebalances on its own. [`Tree::build`]
//! produces a height-minimal tree from any input sequence and
//! [`Tree::rebalance`] restores that shape on demand.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::Tree;
//!
//! let mut tree = Tree::build(vec![5, 3, 8, 1, 4, 7, 9]);
//!
//! assert!(tree.contains(&7));
//! assert_eq!(tree.delete(&7), Some(7));
//! assert!(!tree.contains(&7));
//!
//! let in_order: Vec<i32> = tree.in_order().map(|n| *n.value()).collect();
//! assert_eq!(in_order, vec![1, 3, 4, 5, 8, 9]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ptr;

use crate::iter::{InOrder, LevelOrder, PostOrder, PreOrder};

/// A child slot: either empty or an exclusively owned subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// One vertex of a [`Tree`]. The stored value is also the search key.
///
/// A `Node` owns its subtrees outright. It carries no parent pointer and no
/// cached height; both are recomputed on demand.
#[derive(Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of this node's left subtree, if any.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// The root of this node's right subtree, if any.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// The height of the subtree rooted at this node: the number of edges on
    /// the longest downward path. A leaf has height 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::build(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&2).unwrap().height(), 1);
    /// assert_eq!(tree.find(&3).unwrap().height(), 0);
    /// ```
    pub fn height(&self) -> usize {
        height_of(Some(self)) as usize
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

/// Height in edges of a possibly-empty subtree. An empty subtree has height
/// -1 so that a single leaf comes out at 0.
fn height_of<T>(link: Option<&Node<T>>) -> isize {
    match link {
        None => -1,
        Some(node) => 1 + height_of(node.left()).max(height_of(node.right())),
    }
}

/// A Binary Search Tree storing a set of unique values. This can be used for
/// inserting, finding, and deleting values, iterating in four traversal
/// orders, and inspecting or restoring balance.
#[derive(Clone)]
pub struct Tree<T> {
    pub(crate) root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        // Iterative teardown: the derived recursive drop would use call-stack
        // depth proportional to the tree height, which an adversarially
        // skewed tree can make linear in the number of nodes.
        let mut stack = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a height-minimal tree from an arbitrary sequence of values.
    ///
    /// The input may be unsorted and may contain duplicates; it is sorted and
    /// deduplicated first, then the middle element of each sorted sub-slice
    /// (index `len / 2`) becomes the root of the corresponding subtree. The
    /// resulting tree has height `floor(lg n)` for `n` unique values and
    /// satisfies [`is_balanced`][Tree::is_balanced]. An empty input yields an
    /// empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::build(vec![5, 3, 8, 1, 4, 7, 9]);
    ///
    /// assert_eq!(tree.height(), 2);
    /// assert!(tree.is_balanced());
    /// ```
    pub fn build<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        Self {
            root: Self::build_sorted(values),
        }
    }

    /// Builds a height-minimal subtree from a sorted, deduplicated vector.
    fn build_sorted(mut values: Vec<T>) -> Link<T> {
        if values.is_empty() {
            return None;
        }
        let mid = values.len() / 2;
        let right = Self::build_sorted(values.split_off(mid + 1));
        let value = values.pop().expect("mid is within bounds");
        let left = Self::build_sorted(values);
        Some(Box::new(Node { value, left, right }))
    }

    /// Inserts a value, returning whether it was newly added. Inserting a
    /// value that is already present leaves the tree untouched and returns
    /// `false`.
    ///
    /// The new value is attached as a leaf at the first empty slot reached by
    /// ordered descent; no rebalancing happens, so repeated inserts can grow
    /// the height past the balanced minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return false,
                Ordering::Greater => &mut node.right,
            };
        }
        *link = Some(Box::new(Node::new(value)));
        true
    }

    /// Deletes a value and returns it, or `None` (leaving the tree
    /// untouched) if it was not present.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children takes the value of its in-order successor (the minimum of
    /// its right subtree), whose own node is then spliced out. No rebalancing
    /// happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let mut tree = Tree::build(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert!(!tree.contains(&2));
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        Self::delete_from(&mut self.root, value)
    }

    fn delete_from(link: &mut Link<T>, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let node = link.as_deref_mut()?;
        match value.cmp(&node.value) {
            Ordering::Less => Self::delete_from(&mut node.left, value),
            Ordering::Greater => Self::delete_from(&mut node.right, value),
            Ordering::Equal => {
                let removed = if node.left.is_none() {
                    let mut gone = link.take().expect("matched the target above");
                    *link = gone.right.take();
                    gone.value
                } else if node.right.is_none() {
                    let mut gone = link.take().expect("matched the target above");
                    *link = gone.left.take();
                    gone.value
                } else {
                    // Two children: the in-order successor replaces this
                    // node's value and its old node is spliced out of the
                    // right subtree.
                    let successor = Self::detach_min(&mut node.right);
                    mem::replace(&mut node.value, successor.value)
                };
                Some(removed)
            }
        }
    }

    /// Detaches the minimum node of a non-empty subtree, splicing its right
    /// child (it cannot have a left one) into its place.
    fn detach_min(link: &mut Link<T>) -> Box<Node<T>> {
        let node = link
            .as_deref_mut()
            .expect("detach_min requires a non-empty subtree");
        if node.left.is_some() {
            Self::detach_min(&mut node.left)
        } else {
            let mut min = link.take().expect("observed a node above");
            *link = min.right.take();
            min
        }
    }

    /// Finds the node holding the given value, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::build(vec![5, 3, 8]);
    ///
    /// assert_eq!(tree.find(&3).map(|n| *n.value()), Some(3));
    /// assert_eq!(tree.find(&42).map(|n| *n.value()), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => current = node.right(),
            }
        }
        None
    }

    /// Returns whether the given value is present.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find(value).is_some()
    }

    /// The root node, if the tree is non-empty. Together with
    /// [`Node::left`]/[`Node::right`]/[`Node::value`] this gives read-only
    /// access to the whole hierarchy.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// The number of values stored. This is counted by traversal, `O(n)`.
    pub fn len(&self) -> usize {
        self.in_order().count()
    }

    /// Returns whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree in edges: -1 for an empty tree, 0 for a single
    /// node, and in general the longest root-to-leaf path.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// assert_eq!(Tree::<i32>::new().height(), -1);
    /// assert_eq!(Tree::build(vec![7]).height(), 0);
    /// assert_eq!(Tree::build(1..=15).height(), 3);
    /// ```
    pub fn height(&self) -> isize {
        height_of(self.root())
    }

    /// The depth of the given node: the number of edges between it and the
    /// root. Returns `None` if the node does not belong to this tree.
    ///
    /// The position is re-derived by ordered descent from the root rather
    /// than read from a parent chain, and the descent must end at the very
    /// node passed in. A node from another tree that merely shares a value
    /// therefore reports `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::build(vec![1, 2, 3]);
    /// let root = tree.find(&2).unwrap();
    /// let leaf = tree.find(&3).unwrap();
    ///
    /// assert_eq!(tree.depth(root), Some(0));
    /// assert_eq!(tree.depth(leaf), Some(1));
    /// ```
    pub fn depth(&self, node: &Node<T>) -> Option<usize>
    where
        T: Ord,
    {
        let mut depth = 0;
        let mut current = self.root();
        while let Some(candidate) = current {
            if ptr::eq(candidate, node) {
                return Some(depth);
            }
            current = match node.value.cmp(&candidate.value) {
                Ordering::Less => candidate.left(),
                Ordering::Greater => candidate.right(),
                // Same value but a different allocation: the handle belongs
                // to some other tree.
                Ordering::Equal => None,
            };
            depth += 1;
        }
        None
    }

    /// Returns whether every node's left and right subtree heights differ by
    /// at most 1.
    ///
    /// This is checked over the whole structure, not just at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for value in 1..=6 {
    ///     tree.insert(value);
    /// }
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        Self::balanced_height(self.root()).is_some()
    }

    /// The height of the subtree if every node in it is balanced, `None` as
    /// soon as one is not. Folding the two walks together keeps the check
    /// `O(n)` instead of recomputing heights per node.
    fn balanced_height(link: Option<&Node<T>>) -> Option<isize> {
        let node = match link {
            None => return Some(-1),
            Some(node) => node,
        };
        let left = Self::balanced_height(node.left())?;
        let right = Self::balanced_height(node.right())?;
        if (left - right).abs() <= 1 {
            Some(left.max(right) + 1)
        } else {
            None
        }
    }

    /// Rebuilds the tree to minimal height, keeping exactly the same values.
    ///
    /// The values are drained by in-order traversal, which yields them
    /// already sorted, and the hierarchy is rebuilt with the
    /// [`build`][Tree::build] algorithm. [`is_balanced`][Tree::is_balanced]
    /// holds immediately afterwards, and calling `rebalance` again is a
    /// no-op shape-wise.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for value in 1..=6 {
    ///     tree.insert(value);
    /// }
    /// assert_eq!(tree.height(), 5);
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn rebalance(&mut self)
    where
        T: Ord,
    {
        // In-order over a valid BST is ascending and `delete` never admits
        // duplicates, so the drained vector is already sorted and unique.
        let sorted: Vec<T> = mem::take(self).into_iter().collect();
        self.root = Self::build_sorted(sorted);
    }

    /// Iterates over node handles breadth-first from the root, visiting each
    /// level left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::build(vec![1, 2, 3]);
    /// let order: Vec<i32> = tree.level_order().map(|n| *n.value()).collect();
    ///
    /// assert_eq!(order, vec![2, 1, 3]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self.root())
    }

    /// Iterates over node handles in ascending value order (left subtree,
    /// node, right subtree).
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self.root())
    }

    /// Iterates over node handles visiting each node before its subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(self.root())
    }

    /// Iterates over node handles visiting both subtrees before their node.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(self.root())
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::build(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tree: &Tree<i32>) -> Vec<i32> {
        tree.in_order().map(|n| *n.value()).collect()
    }

    #[test]
    fn build_sorts_and_dedups() {
        let tree = Tree::build(vec![5, 3, 8, 3, 1, 4, 7, 9, 5]);

        assert_eq!(values(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn build_roots_the_middle_element() {
        // Sorted input is [1, 3, 4, 5, 7, 8, 9]; index 7 / 2 = 3 holds 5.
        let tree = Tree::build(vec![5, 3, 8, 1, 4, 7, 9]);

        assert_eq!(tree.root().map(|n| *n.value()), Some(5));
    }

    #[test]
    fn build_empty_input() {
        let tree = Tree::<i32>::build(Vec::new());

        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.in_order().count(), 0);
        assert_eq!(tree.level_order().count(), 0);
    }

    #[test]
    fn build_single_value() {
        let tree = Tree::build(vec![7]);

        assert_eq!(tree.height(), 0);
        let root = tree.root().expect("one node");
        assert!(root.left().is_none());
        assert!(root.right().is_none());
    }

    #[test]
    fn build_is_height_minimal() {
        for n in 1..=64 {
            let tree = Tree::build(1..=n);
            let expected = (n as f64).log2().floor() as isize;

            assert_eq!(tree.height(), expected, "height for n = {}", n);
            assert!(tree.is_balanced(), "balance for n = {}", n);
        }
    }

    #[test]
    fn insert_existing_value_is_a_noop() {
        let mut tree = Tree::build(vec![1, 2, 3]);

        assert!(!tree.insert(2));
        assert_eq!(values(&tree), vec![1, 2, 3]);
    }

    #[test]
    fn insert_keeps_ordering() {
        let mut tree = Tree::new();
        for value in [8, 3, 10, 1, 6, 14, 4, 7, 13] {
            assert!(tree.insert(value));
        }

        assert_eq!(values(&tree), vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
    }

    #[test]
    fn delete_missing_value_is_a_noop() {
        let mut tree = Tree::build(vec![1, 2, 3]);

        assert_eq!(tree.delete(&42), None);
        assert_eq!(values(&tree), vec![1, 2, 3]);
    }

    #[test]
    fn delete_leaf() {
        let mut tree = Tree::build(vec![1, 2, 3]);

        assert_eq!(tree.delete(&1), Some(1));
        assert_eq!(values(&tree), vec![2, 3]);
    }

    #[test]
    fn delete_node_with_one_child() {
        let mut tree = Tree::new();
        for value in [2, 1, 3, 4] {
            tree.insert(value);
        }

        // 3 has only a right child, 4, which takes its place.
        assert_eq!(tree.delete(&3), Some(3));
        assert_eq!(values(&tree), vec![1, 2, 4]);
        assert_eq!(tree.find(&2).unwrap().height(), 1);
    }

    #[test]
    fn delete_node_with_two_children_promotes_successor() {
        let tree_values = vec![1, 3, 4, 5, 7, 8, 9];
        let mut tree = Tree::build(tree_values.clone());

        // The root (5) has two children; its in-order successor (7) takes
        // over the root position and 7's old node disappears.
        assert_eq!(tree.delete(&5), Some(5));
        assert_eq!(tree.root().map(|n| *n.value()), Some(7));

        let expected: Vec<i32> = tree_values.into_iter().filter(|v| *v != 5).collect();
        assert_eq!(values(&tree), expected);
    }

    #[test]
    fn delete_root_until_empty() {
        let mut tree = Tree::build(vec![1, 2, 3, 4, 5]);

        while let Some(root) = tree.root().map(|n| *n.value()) {
            assert_eq!(tree.delete(&root), Some(root));
        }

        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn find_round_trips_with_insert_and_delete() {
        let mut tree = Tree::new();

        assert!(tree.find(&10).is_none());
        tree.insert(10);
        assert_eq!(tree.find(&10).map(|n| *n.value()), Some(10));

        tree.delete(&10);
        assert!(tree.find(&10).is_none());
    }

    #[test]
    fn depth_follows_the_search_path() {
        let tree = Tree::build(1..=7);

        for value in 1..=7 {
            let node = tree.find(&value).expect("value was built in");
            let depth = tree.depth(node).expect("node is in the tree");
            // In a perfect 7-node tree: root at depth 0, then 1, then 2.
            let expected = match value {
                4 => 0,
                2 | 6 => 1,
                _ => 2,
            };
            assert_eq!(depth, expected, "depth of {}", value);
        }
    }

    #[test]
    fn depth_of_foreign_node_is_none() {
        let tree = Tree::build(1..=7);
        let other = Tree::build(1..=7);

        let foreign = other.find(&4).expect("value was built in");
        assert_eq!(tree.depth(foreign), None);
    }

    #[test]
    fn skewed_growth_unbalances_and_rebalance_repairs() {
        let mut tree = Tree::build(1..=15);
        assert!(tree.is_balanced());

        for value in 16..=25 {
            tree.insert(value);
        }
        assert!(!tree.is_balanced());

        tree.rebalance();
        assert!(tree.is_balanced());
        assert_eq!(values(&tree), (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn rebalance_is_idempotent() {
        let mut tree = Tree::new();
        for value in 1..=20 {
            tree.insert(value);
        }

        tree.rebalance();
        let once = values(&tree);
        let height_once = tree.height();

        tree.rebalance();
        assert_eq!(values(&tree), once);
        assert_eq!(tree.height(), height_once);
        assert!(tree.is_balanced());
    }

    #[test]
    fn rebalance_empty_tree() {
        let mut tree = Tree::<i32>::new();
        tree.rebalance();

        assert!(tree.is_empty());
        assert!(tree.is_balanced());
    }

    #[test]
    fn imbalance_below_the_root_is_detected() {
        // The root's subtrees differ by a single level, which is allowed,
        // but the chain 5 -> 6 -> 7 -> 8 leaves node 5 with an empty left
        // subtree and a right subtree two levels deep.
        let mut tree = Tree::new();
        for value in [4, 3, 5, 2, 1, 6, 7, 8] {
            tree.insert(value);
        }

        assert!(!tree.is_balanced());
    }

    #[test]
    fn from_iterator_builds() {
        let tree: Tree<i32> = (1..=7).collect();

        assert!(tree.is_balanced());
        assert_eq!(values(&tree), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn drop_survives_a_deep_skewed_tree() {
        let mut tree = Tree::new();
        for value in 0..100_000 {
            tree.insert(value);
        }
        drop(tree);
    }
}
