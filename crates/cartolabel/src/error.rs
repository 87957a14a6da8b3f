//! Error types for placement iteration and symbolizers.

use crate::placement::IterationState;

/// Result type alias for label engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the label engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The current alternative was read while the iterator was not on one.
    ///
    /// This is a caller bug: `next()` must return `true` before the current
    /// alternative can be read.
    #[error("No current placement alternative: iterator is {state}")]
    IteratorNotPositioned { state: IterationState },

    /// A placement property carries an unusable value.
    #[error("Invalid value for placement property '{property}': {message}")]
    InvalidProperty { property: &'static str, message: String },

    /// Style or formatting tree error.
    #[error(transparent)]
    Text(#[from] cartolabel_text::Error),

    /// Error from the core primitives.
    #[error(transparent)]
    Core(#[from] cartolabel_core::Error),
}

impl Error {
    /// Create a property error.
    pub fn invalid_property(property: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidProperty {
            property,
            message: message.into(),
        }
    }
}
