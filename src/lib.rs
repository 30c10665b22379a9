//! A Binary Search Tree (BST) over a set of unique ordered values, with
//! explicit rebalancing.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one value and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). With clever construction the
//! height of a BST can be limited to `O(lg N)` where `N` is the number of nodes
//! in the tree. BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.
//!
//! ## Balance
//!
//! This crate keeps plain BST mutation cheap: [`Tree::insert`] and
//! [`Tree::delete`] do no rebalancing, so a pathological insertion order can
//! degrade the height to `O(N)`. Balance is instead restored on demand:
//! [`Tree::build`] always produces a height-minimal tree from its input, and
//! [`Tree::rebalance`] rebuilds an existing tree to minimal height in `O(N)`.
//! [`Tree::is_balanced`] reports whether every node's child subtrees are
//! within one level of each other, so callers can decide when a rebuild is
//! worth it.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::Tree;
//!
//! let mut tree = Tree::build(vec![5, 3, 8, 1, 4, 7, 9]);
//! assert!(tree.is_balanced());
//!
//! for value in 10..=20 {
//!     tree.insert(value);
//! }
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//!
//! let sorted: Vec<i32> = tree.into_iter().collect();
//! assert_eq!(sorted[..4], [1, 3, 4, 5]);
//! ```

#![deny(missing_docs)]

pub mod iter;
mod print;
pub mod tree;

pub use tree::{Node, Tree};
