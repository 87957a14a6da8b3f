//! Output buffer of tree evaluation.

use crate::NodeEvalError;
use crate::style::GlyphStyle;

/// One contiguous span of text sharing a resolved style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: GlyphStyle,
}

/// Ordered runs produced by evaluating a formatting tree for one feature.
///
/// Runs are append-only while a tree is evaluated. Renderers typically keep
/// one buffer per worker and [`clear`](Self::clear) it between features.
#[derive(Debug, Clone, Default)]
pub struct ProcessedText {
    runs: Vec<StyledRun>,
    errors: Vec<NodeEvalError>,
}

impl ProcessedText {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run.
    pub fn push(&mut self, text: impl Into<String>, style: GlyphStyle) {
        self.runs.push(StyledRun {
            text: text.into(),
            style,
        });
    }

    /// Record a recoverable evaluation failure.
    pub fn report(&mut self, error: NodeEvalError) {
        self.errors.push(error);
    }

    /// Remove all runs and recorded errors, keeping the allocations.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.errors.clear();
    }

    /// The runs, in emission order.
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Failures recorded during evaluation.
    pub fn errors(&self) -> &[NodeEvalError] {
        &self.errors
    }

    /// Check if any run failed to evaluate.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if no run was emitted.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterate over the runs.
    pub fn iter(&self) -> std::slice::Iter<'_, StyledRun> {
        self.runs.iter()
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ProcessedText {
    type Item = &'a StyledRun;
    type IntoIter = std::slice::Iter<'a, StyledRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
