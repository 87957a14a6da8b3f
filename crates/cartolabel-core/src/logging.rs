//! Tracing integration.
//!
//! cartolabel emits diagnostics through the `tracing` crate. Install a
//! subscriber in the host application to see them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("cartolabel_text::format=warn")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Attribute expression parsing and evaluation.
    pub const EXPRESSION: &str = "cartolabel_core::expression";
    /// Formatting tree evaluation.
    pub const FORMAT: &str = "cartolabel_text::format";
    /// Placement alternative iteration.
    pub const PLACEMENT: &str = "cartolabel::placement";
    /// Symbolizer shortcuts and placement-set replacement.
    pub const SYMBOLIZER: &str = "cartolabel::symbolizer";
}
