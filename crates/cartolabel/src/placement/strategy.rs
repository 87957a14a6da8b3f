//! The placement strategy trait.

use std::fmt;

use cartolabel_core::ExpressionSet;

use super::PlacementProperties;
use crate::Result;

/// Source of the alternatives a [`PlacementIterator`](super::PlacementIterator)
/// steps through.
///
/// [`PlacementAlternativeSet`](super::PlacementAlternativeSet) is the
/// built-in strategy: a fixed list of sparse overrides. Custom strategies
/// can compute their alternatives on demand.
///
/// The iterator asks for alternative 0, then 1, and so on, until
/// [`alternative`](Self::alternative) returns `None`. After that the iterator
/// is exhausted and never asks again.
///
/// # Example
///
/// ```
/// use cartolabel::prelude::*;
/// use cartolabel::Result;
///
/// /// Shrinks the text by 2 units per attempt down to a minimum size.
/// #[derive(Debug, Clone)]
/// struct Shrinking {
///     defaults: PlacementProperties,
///     min_size: f64,
/// }
///
/// impl PlacementStrategy for Shrinking {
///     fn defaults(&self) -> &PlacementProperties {
///         &self.defaults
///     }
///
///     fn set_defaults(&mut self, defaults: PlacementProperties) -> Result<()> {
///         defaults.validate()?;
///         self.defaults = defaults;
///         Ok(())
///     }
///
///     fn alternative(&self, index: usize) -> Option<PlacementProperties> {
///         let size = self.defaults.default_format.text_size - 2.0 * index as f64;
///         (size >= self.min_size).then(|| {
///             let mut props = self.defaults.clone();
///             props.default_format.text_size = size;
///             props
///         })
///     }
///
///     fn clone_box(&self) -> Box<dyn PlacementStrategy> {
///         Box::new(self.clone())
///     }
/// }
///
/// let strategy = Shrinking { defaults: PlacementProperties::default(), min_size: 6.0 };
/// let mut it = PlacementIterator::new(&strategy, 1.0, None);
/// let mut sizes = Vec::new();
/// while it.next() {
///     sizes.push(it.properties().unwrap().default_format.text_size);
/// }
/// assert_eq!(sizes, [10.0, 8.0, 6.0]);
/// ```
pub trait PlacementStrategy: fmt::Debug + Send + Sync {
    /// Properties the strategy starts from.
    fn defaults(&self) -> &PlacementProperties;

    /// Replace the defaults, rejecting unusable values.
    fn set_defaults(&mut self, defaults: PlacementProperties) -> Result<()>;

    /// Fully resolved properties of alternative `index`, or `None` when
    /// there are no more alternatives.
    fn alternative(&self, index: usize) -> Option<PlacementProperties>;

    /// Number of alternatives, when known in advance.
    fn alternative_count(&self) -> Option<usize> {
        None
    }

    /// Add every expression the strategy reads to `set`.
    ///
    /// The default covers the defaults only.
    fn collect_expressions(&self, set: &mut ExpressionSet) {
        self.defaults().collect_expressions(set);
    }

    /// Copy the strategy, for copy-on-write edits through a shared handle.
    fn clone_box(&self) -> Box<dyn PlacementStrategy>;
}

impl Clone for Box<dyn PlacementStrategy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
