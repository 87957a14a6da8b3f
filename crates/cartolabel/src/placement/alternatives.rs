//! Ordered placement alternatives sharing a set of defaults.

use cartolabel_core::logging::targets;
use cartolabel_core::{Dimensions, ExpressionSet};
use cartolabel_text::GlyphStyle;
use serde::{Deserialize, Serialize};

use super::{PlacementIterator, PlacementOverride, PlacementProperties, PlacementStrategy};
use crate::{Error, Result};

/// Default placement properties plus an ordered list of alternatives.
///
/// The renderer tries the alternatives in order until one fits. Each
/// alternative only stores the fields it changes; everything else comes
/// from [`defaults`](Self::defaults).
///
/// Deserialization validates the defaults and every alternative, the same
/// as [`with_alternatives`](Self::with_alternatives).
///
/// # Example
///
/// ```
/// use cartolabel::prelude::*;
///
/// let mut set = PlacementAlternativeSet::new(PlacementProperties::default()).unwrap();
/// set.push(PlacementOverride::new().text_size(12.0)).unwrap();
/// set.push(PlacementOverride::new().text_size(8.0)).unwrap();
///
/// let mut it = set.placement_info(1.0, None);
/// let mut sizes = Vec::new();
/// while it.next() {
///     sizes.push(it.properties().unwrap().default_format.text_size);
/// }
/// assert_eq!(sizes, [12.0, 8.0]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawAlternativeSet")]
pub struct PlacementAlternativeSet {
    defaults: PlacementProperties,
    alternatives: Vec<PlacementOverride>,
}

/// Unvalidated form of a [`PlacementAlternativeSet`] as read from config.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawAlternativeSet {
    defaults: PlacementProperties,
    alternatives: Vec<PlacementOverride>,
}

impl TryFrom<RawAlternativeSet> for PlacementAlternativeSet {
    type Error = Error;

    fn try_from(raw: RawAlternativeSet) -> Result<Self> {
        Self::with_alternatives(raw.defaults, raw.alternatives)
    }
}

impl PlacementAlternativeSet {
    /// Create a set with no alternatives.
    pub fn new(defaults: PlacementProperties) -> Result<Self> {
        defaults.validate()?;
        Ok(Self {
            defaults,
            alternatives: Vec::new(),
        })
    }

    /// Create a set with exactly one alternative identical to the defaults.
    pub fn single(defaults: PlacementProperties) -> Result<Self> {
        defaults.validate()?;
        Ok(Self::single_unchecked(defaults))
    }

    /// One empty alternative over the built-in default properties.
    pub(crate) fn default_single() -> Self {
        Self::single_unchecked(PlacementProperties::default())
    }

    fn single_unchecked(defaults: PlacementProperties) -> Self {
        Self {
            defaults,
            alternatives: vec![PlacementOverride::new()],
        }
    }

    /// Create a set from defaults and a list of alternatives.
    pub fn with_alternatives<I>(defaults: PlacementProperties, alternatives: I) -> Result<Self>
    where
        I: IntoIterator<Item = PlacementOverride>,
    {
        let mut set = Self::new(defaults)?;
        for alternative in alternatives {
            set.push(alternative)?;
        }
        Ok(set)
    }

    /// Append an alternative.
    pub fn push(&mut self, alternative: PlacementOverride) -> Result<()> {
        alternative.validate()?;
        self.alternatives.push(alternative);
        tracing::trace!(
            target: targets::PLACEMENT,
            count = self.alternatives.len(),
            "added placement alternative"
        );
        Ok(())
    }

    /// Check the defaults and every alternative.
    pub fn validate(&self) -> Result<()> {
        self.defaults.validate()?;
        self.alternatives.iter().try_for_each(PlacementOverride::validate)
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Check if there are no alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// The alternatives in the order they are tried.
    pub fn alternatives(&self) -> &[PlacementOverride] {
        &self.alternatives
    }

    /// The properties unset fields fall back to.
    pub fn defaults(&self) -> &PlacementProperties {
        &self.defaults
    }

    /// Replace the defaults.
    pub fn set_defaults(&mut self, defaults: PlacementProperties) -> Result<()> {
        defaults.validate()?;
        self.defaults = defaults;
        Ok(())
    }

    /// Replace the default text style only.
    pub fn set_default_format(&mut self, format: GlyphStyle) -> Result<()> {
        format.validate()?;
        self.defaults.default_format = format;
        Ok(())
    }

    /// Fully resolved properties of alternative `index`.
    pub fn resolve(&self, index: usize) -> Option<PlacementProperties> {
        self.alternatives
            .get(index)
            .map(|alternative| alternative.apply_to(&self.defaults))
    }

    /// Start iterating the alternatives for one placement attempt.
    ///
    /// `scale_factor` converts nominal distances to the current view;
    /// `dimensions` are the extents of an attached marker, if any.
    pub fn placement_info(&self, scale_factor: f64, dimensions: Option<Dimensions>) -> PlacementIterator<'_> {
        PlacementIterator::new(self, scale_factor, dimensions)
    }

    /// Every expression read by the defaults or any alternative.
    pub fn expressions(&self) -> ExpressionSet {
        let mut set = ExpressionSet::new();
        PlacementStrategy::collect_expressions(self, &mut set);
        set
    }
}

impl PlacementStrategy for PlacementAlternativeSet {
    fn defaults(&self) -> &PlacementProperties {
        &self.defaults
    }

    fn set_defaults(&mut self, defaults: PlacementProperties) -> Result<()> {
        PlacementAlternativeSet::set_defaults(self, defaults)
    }

    fn alternative(&self, index: usize) -> Option<PlacementProperties> {
        self.resolve(index)
    }

    fn alternative_count(&self) -> Option<usize> {
        Some(self.alternatives.len())
    }

    fn collect_expressions(&self, set: &mut ExpressionSet) {
        self.defaults.collect_expressions(set);
        for alternative in &self.alternatives {
            alternative.collect_expressions(set);
        }
    }

    fn clone_box(&self) -> Box<dyn PlacementStrategy> {
        Box::new(self.clone())
    }
}
