//! This crate exposes a self-balancing Binary Search Tree (an AVL tree) holding a set of
//! distinct, ordered values.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`).
//!
//! ## AVL Tree
//!
//! An AVL tree additionally keeps, for every `Node`, the heights of its left and right subtrees
//! within one of each other. The difference (right minus left) is called the balance factor.
//! Whenever an insertion or removal pushes a balance factor to ±2 the tree performs a rotation
//! (left, right, left-right or right-left) to bring it back. This bounds the height of the tree
//! by roughly `1.44 * lg(N + 2)` so searching, inserting and removing are all `O(lg N)`.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree: Tree<_> = [37, 23, 41, -20, 11].into_iter().collect();
//!
//! assert!(tree.search(&23));
//! assert!(tree.remove(&23));
//! assert!(!tree.search(&23));
//!
//! assert_eq!(tree.min(), Ok(-20));
//! assert_eq!(tree.max(), Ok(41));
//! assert_eq!(tree.sorted(false), vec![41, 37, 11, -20]);
//! ```

#![deny(missing_docs)]

pub mod error;
mod traversal;
pub mod tree;

#[cfg(test)]
mod test;

pub use error::TreeError;
pub use tree::Tree;
