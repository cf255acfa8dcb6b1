//! Errors reported by [`Tree`][crate::linked::Tree] operations.

use thiserror::Error;

/// Things that can go wrong when mutating a tree.
///
/// Lookups never fail: [`find`][crate::linked::Tree::find] and
/// [`replace`][crate::linked::Tree::replace] report a missing item with `None` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The item asked to be removed isn't stored in the tree.
    #[error("item not in tree")]
    NotFound,
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
