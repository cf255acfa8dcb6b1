//! An ordered container of items backed by an unbalanced, linked Binary Search Tree (BST), for
//! membership tests, range queries, neighbour lookups, and rebuilding at minimum height on
//! demand.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of this BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value. Removing a node can leave copies of a duplicated value
//!    on the left of an equal one, so strictly speaking this is "less than or equal".
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value. Equal values are kept, not merged.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is roughly the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted iteration by
//! visiting the left subtree, then the subtree root, then the right subtree.
//!
//! The [`Tree`] here never balances itself. Adding already sorted items produces a chain that is
//! no better than a linked list, which is what [`Tree::rebalance`] is for.
//!
//! A tree has no internal synchronization. Share one across threads behind a lock.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
pub mod linked;

pub use error::{Error, Result};
pub use linked::Tree;

#[cfg(test)]
mod test;
