//! Text leaf node.

use std::sync::Arc;

use cartolabel_core::logging::targets;
use cartolabel_core::{Expression, ExpressionRef, ExpressionSet, Feature};

use super::{FormatNode, ProcessedText};
use crate::style::GlyphStyle;
use crate::{NodeEvalError, Result};

/// Leaf node: evaluates one expression and emits exactly one run.
///
/// The run is emitted even when the text is empty, or when the expression
/// fails, so run counts stay predictable for callers that insert separators.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    text: ExpressionRef,
}

impl TextNode {
    /// Create a node from an expression.
    pub fn new(text: impl Into<ExpressionRef>) -> Self {
        Self { text: text.into() }
    }

    /// Create a node emitting constant text.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(Expression::literal(text))
    }

    /// Create a node from expression source such as `[name] + ' ' + [ref]`.
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self::new(Expression::parse(source)?))
    }

    /// The expression this node evaluates.
    pub fn text(&self) -> &ExpressionRef {
        &self.text
    }

    /// Replace the expression.
    pub fn set_text(&mut self, text: impl Into<ExpressionRef>) {
        self.text = text.into();
    }
}

impl From<Expression> for TextNode {
    fn from(expression: Expression) -> Self {
        Self::new(Arc::new(expression))
    }
}

impl FormatNode for TextNode {
    fn apply(&self, style: &GlyphStyle, feature: &dyn Feature, output: &mut ProcessedText) {
        let text = match self.text.evaluate(feature) {
            Ok(text) => style.text_transform.apply(&text),
            Err(source) => {
                tracing::warn!(
                    target: targets::FORMAT,
                    feature = feature.id(),
                    expression = %self.text,
                    "text run evaluation failed: {}",
                    source
                );
                output.report(NodeEvalError {
                    run_index: output.len(),
                    expression: self.text.to_string(),
                    source,
                });
                String::new()
            }
        };
        output.push(text, style.clone());
    }

    fn collect_expressions(&self, set: &mut ExpressionSet) {
        set.insert(Arc::clone(&self.text));
    }
}
