//! Construction-time failures for option indexes and controllers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Two options in the same list share a key. `key` is its debug rendering.
    #[error("duplicate option key {key} at positions {first} and {duplicate}")]
    DuplicateKey {
        key: String,
        first: usize,
        duplicate: usize,
    },

    /// A default value was requested that no option carries.
    #[error("no option with key {0}")]
    UnknownKey(String),
}
