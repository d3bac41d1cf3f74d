//! Errors returned by [`Tree`][crate::Tree] operations that have preconditions.
//!
//! Expected outcomes like inserting a duplicate or removing a missing value are not errors. They
//! are reported through the `bool` returned by the operation.

/// An error signalling that a [`Tree`][crate::Tree] operation was called in a state where it has
/// no meaningful answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The operation needs at least one value but the tree is empty.
    #[error("the tree is empty")]
    Empty,
}
