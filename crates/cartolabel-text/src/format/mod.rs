//! The label formatting tree.
//!
//! Trees are built once, before rendering starts, and are read-only while
//! features are evaluated. A finished tree is `Send + Sync` and may be
//! evaluated from several rendering workers at the same time.

mod list;
mod node;
mod overrides;
mod processed;
mod text;

pub use list::ListNode;
pub use node::{FormatNode, NodeBox};
pub use overrides::FormatOverrideNode;
pub use processed::{ProcessedText, StyledRun};
pub use text::TextNode;

use cartolabel_core::{ExpressionSet, Feature};

use crate::style::GlyphStyle;

/// Evaluate a tree against a feature into a fresh [`ProcessedText`].
pub fn process(root: &dyn FormatNode, style: &GlyphStyle, feature: &dyn Feature) -> ProcessedText {
    let mut output = ProcessedText::new();
    root.apply(style, feature, &mut output);
    output
}

/// Gather every expression a tree reads, without evaluating anything.
pub fn collect_expressions(root: &dyn FormatNode) -> ExpressionSet {
    let mut set = ExpressionSet::new();
    root.collect_expressions(&mut set);
    set
}

static_assertions::assert_impl_all!(NodeBox: Send, Sync);
static_assertions::assert_impl_all!(TextNode: Send, Sync);
static_assertions::assert_impl_all!(FormatOverrideNode: Send, Sync);
static_assertions::assert_impl_all!(ListNode: Send, Sync);
static_assertions::assert_impl_all!(ProcessedText: Send, Sync);
