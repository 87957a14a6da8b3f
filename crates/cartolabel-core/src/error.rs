//! Error types for the core primitives.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing core values.
///
/// These are construction-time errors: anything that fails here is rejected
/// before a formatting tree or placement set is assembled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Attribute expression could not be parsed.
    #[error("Expression parse error at offset {position} in '{input}': {message}")]
    ExpressionParse {
        input: String,
        position: usize,
        message: String,
    },

    /// Invalid property value.
    #[error("Invalid value for property '{property}': {message}")]
    InvalidValue { property: String, message: String },
}

impl Error {
    /// Create an expression parse error.
    pub fn expression_parse(
        input: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::ExpressionParse {
            input: input.into(),
            position,
            message: message.into(),
        }
    }

    /// Create a value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}

/// Recoverable failure while evaluating an expression against a feature.
///
/// The formatting tree never aborts on these; the affected run falls back to
/// empty text and the error is handed back to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionEvalError {
    /// The feature has no attribute with this name.
    #[error("Attribute '{name}' is missing from the feature")]
    MissingAttribute { name: String },

    /// The attribute exists but cannot be rendered as text.
    #[error("Attribute '{name}' is malformed: {message}")]
    MalformedAttribute { name: String, message: String },

    /// A numeric result was expected.
    #[error("Expected a number, got '{text}'")]
    NotNumeric { text: String },
}
