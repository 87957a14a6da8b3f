//! Style override node.

use cartolabel_core::{ExpressionSet, Feature};

use super::{FormatNode, NodeBox, ProcessedText};
use crate::Result;
use crate::style::{GlyphStyle, StyleOverride, merge};

/// Applies a sparse style override to exactly one child.
///
/// The override is validated whenever it is attached, so evaluation never
/// meets a malformed value.
#[derive(Debug)]
pub struct FormatOverrideNode {
    overrides: StyleOverride,
    child: NodeBox,
}

impl FormatOverrideNode {
    /// Create an override node, rejecting malformed overrides.
    pub fn new(overrides: StyleOverride, child: impl Into<NodeBox>) -> Result<Self> {
        overrides.validate()?;
        Ok(Self {
            overrides,
            child: child.into(),
        })
    }

    /// The override applied to the child.
    pub fn overrides(&self) -> &StyleOverride {
        &self.overrides
    }

    /// Replace the override. The node is left unchanged if it is malformed.
    pub fn set_overrides(&mut self, overrides: StyleOverride) -> Result<()> {
        overrides.validate()?;
        self.overrides = overrides;
        Ok(())
    }

    /// The formatted child.
    pub fn child(&self) -> &dyn FormatNode {
        self.child.as_ref()
    }

    /// Replace the child, returning the previous one.
    pub fn set_child(&mut self, child: impl Into<NodeBox>) -> NodeBox {
        std::mem::replace(&mut self.child, child.into())
    }
}

impl FormatNode for FormatOverrideNode {
    fn apply(&self, style: &GlyphStyle, feature: &dyn Feature, output: &mut ProcessedText) {
        let effective = merge(style, &self.overrides);
        self.child.apply(&effective, feature, output);
    }

    fn collect_expressions(&self, set: &mut ExpressionSet) {
        self.child.collect_expressions(set);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartolabel_core::{Color, FeatureRecord};

    use crate::Error;
    use crate::format::{TextNode, process};

    #[test]
    fn child_sees_merged_style() {
        let node = FormatOverrideNode::new(
            StyleOverride::builder().fill(Color::RED).build(),
            TextNode::literal("hi"),
        )
        .unwrap();

        let base = GlyphStyle::default();
        let output = process(&node, &base, &FeatureRecord::new(1));

        assert_eq!(output.len(), 1);
        assert_eq!(output.runs()[0].style.fill, Color::RED);
        assert_eq!(output.runs()[0].style.halo_fill, base.halo_fill);
    }

    #[test]
    fn malformed_override_rejected_at_construction() {
        let result = FormatOverrideNode::new(
            StyleOverride::builder().text_size(0.0).build(),
            TextNode::literal("hi"),
        );
        assert!(matches!(result, Err(Error::MalformedOverride { field: "text_size", .. })));
    }

    #[test]
    fn set_overrides_keeps_old_value_on_error() {
        let mut node = FormatOverrideNode::new(
            StyleOverride::builder().opacity(0.5).build(),
            TextNode::literal("hi"),
        )
        .unwrap();

        assert!(node.set_overrides(StyleOverride::builder().opacity(-1.0).build()).is_err());
        assert_eq!(node.overrides().opacity, Some(0.5));

        node.set_overrides(StyleOverride::builder().opacity(0.25).build()).unwrap();
        assert_eq!(node.overrides().opacity, Some(0.25));
    }

    #[test]
    fn replace_child() {
        let mut node = FormatOverrideNode::new(StyleOverride::new(), TextNode::literal("old")).unwrap();
        node.set_child(TextNode::literal("new"));

        let output = process(&node, &GlyphStyle::default(), &FeatureRecord::new(1));
        assert_eq!(output.text(), "new");
    }

    #[test]
    fn override_fields_contribute_no_expressions() {
        let node = FormatOverrideNode::new(
            StyleOverride::builder().face_name("Open Sans Italic").build(),
            TextNode::parse("[name]").unwrap(),
        )
        .unwrap();

        let mut set = ExpressionSet::new();
        node.collect_expressions(&mut set);
        assert_eq!(set.len(), 1);
    }
}
