//! Glyph styles and the label formatting tree.
//!
//! A label's text is described by a small tree of [`FormatNode`]s:
//!
//! - [`TextNode`]: evaluates an attribute expression and emits one run
//! - [`FormatOverrideNode`]: overrides some style fields for its child
//! - [`ListNode`]: evaluates its children in order
//!
//! Evaluating the tree against a feature fills a [`ProcessedText`] with
//! `(text, GlyphStyle)` runs. Expression failures never abort evaluation;
//! the failing run is emitted with empty text and the error is recorded on
//! the output.
//!
//! # Example
//!
//! ```
//! use cartolabel_core::{Color, FeatureRecord};
//! use cartolabel_text::prelude::*;
//!
//! let tree = ListNode::new()
//!     .with_child(TextNode::literal("Hello "))
//!     .with_child(
//!         FormatOverrideNode::new(
//!             StyleOverride::builder().fill(Color::RED).build(),
//!             TextNode::parse("[name]").unwrap(),
//!         )
//!         .unwrap(),
//!     );
//!
//! let feature = FeatureRecord::new(1).with_attribute("name", "Paris");
//! let output = process(&tree, &GlyphStyle::default(), &feature);
//!
//! assert_eq!(output.text(), "Hello Paris");
//! assert_eq!(output.runs()[1].style.fill, Color::RED);
//! ```

pub mod format;
pub mod style;
pub mod types;

mod error;

pub use error::{Error, NodeEvalError, Result};
pub use format::{
    FormatNode, FormatOverrideNode, ListNode, NodeBox, ProcessedText, StyledRun, TextNode,
    collect_expressions, process,
};
pub use style::{GlyphStyle, OverrideBuilder, StyleOverride, merge};
pub use types::TextTransform;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::format::{
        FormatNode, FormatOverrideNode, ListNode, NodeBox, ProcessedText, StyledRun, TextNode,
        collect_expressions, process,
    };
    pub use crate::style::{GlyphStyle, StyleOverride, merge};
    pub use crate::types::TextTransform;
}
