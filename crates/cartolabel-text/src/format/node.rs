//! The node capability shared by built-in and custom nodes.

use std::fmt;

use cartolabel_core::{ExpressionSet, Feature};

use super::ProcessedText;
use crate::style::GlyphStyle;

/// A node of the formatting tree.
///
/// The three built-in nodes cover text, style overrides and sequences.
/// Applications may add their own nodes by implementing this trait; they are
/// stored as [`NodeBox`] exactly like the built-ins.
///
/// # Example
///
/// ```
/// use cartolabel_core::{Feature, FeatureRecord};
/// use cartolabel_text::prelude::*;
///
/// /// Emits the feature id as its own run.
/// #[derive(Debug)]
/// struct FeatureIdNode;
///
/// impl FormatNode for FeatureIdNode {
///     fn apply(&self, style: &GlyphStyle, feature: &dyn Feature, output: &mut ProcessedText) {
///         output.push(format!("#{}", feature.id()), style.clone());
///     }
/// }
///
/// let tree = ListNode::new()
///     .with_child(TextNode::literal("Feature "))
///     .with_child(Box::new(FeatureIdNode) as NodeBox);
///
/// let output = process(&tree, &GlyphStyle::default(), &FeatureRecord::new(42));
/// assert_eq!(output.text(), "Feature #42");
/// ```
pub trait FormatNode: fmt::Debug + Send + Sync {
    /// Append this node's runs to `output`, styled from `style`.
    ///
    /// Implementations must not reorder runs already in `output` and must
    /// not fail: recoverable problems are recorded with
    /// [`ProcessedText::report`].
    fn apply(&self, style: &GlyphStyle, feature: &dyn Feature, output: &mut ProcessedText);

    /// Add every expression this node (and its children) reads to `set`.
    ///
    /// Nodes that read no attributes can keep the default, which adds nothing.
    fn collect_expressions(&self, set: &mut ExpressionSet) {
        let _ = set;
    }
}

/// Owning handle to a tree node.
pub type NodeBox = Box<dyn FormatNode>;

macro_rules! impl_into_node_box {
    ($($node:ty),+ $(,)?) => {
        $(
            impl From<$node> for NodeBox {
                fn from(node: $node) -> Self {
                    Box::new(node)
                }
            }
        )+
    };
}

impl_into_node_box!(super::TextNode, super::FormatOverrideNode, super::ListNode);
