//! Sequence node.

use cartolabel_core::{ExpressionSet, Feature};

use super::{FormatNode, NodeBox, ProcessedText};
use crate::style::GlyphStyle;

/// Evaluates its children in insertion order with the same inherited style.
#[derive(Debug, Default)]
pub struct ListNode {
    children: Vec<NodeBox>,
}

impl ListNode {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list from existing nodes.
    pub fn from_children<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeBox>,
    {
        Self {
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Builder-style append.
    pub fn with_child(mut self, child: impl Into<NodeBox>) -> Self {
        self.push(child);
        self
    }

    /// Append a child.
    pub fn push(&mut self, child: impl Into<NodeBox>) {
        self.children.push(child.into());
    }

    /// The children, in evaluation order.
    pub fn children(&self) -> &[NodeBox] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the list has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl FormatNode for ListNode {
    fn apply(&self, style: &GlyphStyle, feature: &dyn Feature, output: &mut ProcessedText) {
        for child in &self.children {
            child.apply(style, feature, output);
        }
    }

    fn collect_expressions(&self, set: &mut ExpressionSet) {
        for child in &self.children {
            child.collect_expressions(set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartolabel_core::FeatureRecord;

    use crate::format::{TextNode, process};

    #[test]
    fn children_evaluated_in_order() {
        let list = ListNode::from_children(["a", "b", "c"].map(TextNode::literal));
        let output = process(&list, &GlyphStyle::default(), &FeatureRecord::new(1));

        let texts: Vec<_> = output.iter().map(|run| run.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn empty_list_emits_nothing() {
        let output = process(&ListNode::new(), &GlyphStyle::default(), &FeatureRecord::new(1));
        assert!(output.is_empty());
    }

    #[test]
    fn failing_child_does_not_suppress_siblings() {
        let list = ListNode::new()
            .with_child(TextNode::literal("A"))
            .with_child(TextNode::parse("[missing]").unwrap())
            .with_child(TextNode::literal("C"));

        let output = process(&list, &GlyphStyle::default(), &FeatureRecord::new(1));

        assert_eq!(output.len(), 3);
        assert_eq!(output.text(), "AC");
        assert_eq!(output.errors().len(), 1);
        assert_eq!(output.errors()[0].run_index, 1);
    }

    #[test]
    fn push_and_len() {
        let mut list = ListNode::new();
        assert!(list.is_empty());
        list.push(TextNode::literal("x"));
        list.push(ListNode::new());
        assert_eq!(list.len(), 2);
        assert_eq!(list.children().len(), 2);
    }

    #[test]
    fn collects_from_all_children() {
        let list = ListNode::new()
            .with_child(TextNode::parse("[name]").unwrap())
            .with_child(ListNode::new().with_child(TextNode::parse("[ref]").unwrap()))
            .with_child(TextNode::parse("[name]").unwrap());

        let mut set = ExpressionSet::new();
        list.collect_expressions(&mut set);

        assert_eq!(set.len(), 2);
        assert_eq!(set.attribute_names().into_iter().collect::<Vec<_>>(), ["name", "ref"]);
    }
}
