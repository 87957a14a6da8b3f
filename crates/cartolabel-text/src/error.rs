//! Error types for styles and the formatting tree.

use cartolabel_core::ExpressionEvalError;

/// Result type alias for style and tree construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time errors.
///
/// Everything here is raised while a tree or style is being assembled, so
/// the evaluator only ever sees valid structures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A style override carries a value that is not usable.
    #[error("Malformed override for '{field}': {message}")]
    MalformedOverride { field: &'static str, message: String },

    /// A fully resolved style carries a value that is not usable.
    #[error("Invalid glyph style field '{field}': {message}")]
    InvalidStyle { field: &'static str, message: String },

    /// Error from the core primitives (expression parsing, value parsing).
    #[error(transparent)]
    Core(#[from] cartolabel_core::Error),
}

/// A recoverable expression failure, tagged with the text node that hit it.
///
/// `run_index` is the position of the (empty) run the node emitted in its
/// [`ProcessedText`](crate::ProcessedText).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Text run {run_index} ({expression}) failed: {source}")]
pub struct NodeEvalError {
    pub run_index: usize,
    pub expression: String,
    #[source]
    pub source: ExpressionEvalError,
}
