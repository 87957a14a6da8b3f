//! Cursor over the alternatives of one placement attempt.

use std::fmt;

use cartolabel_core::logging::targets;
use cartolabel_core::{BoxEnvelope, Dimensions, Displacement, Feature};
use cartolabel_text::ProcessedText;

use super::{PlacementProperties, PlacementStrategy};
use crate::{Error, Result};

/// Position of a [`PlacementIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationState {
    /// `next()` has not been called yet.
    Unstarted,
    /// On the alternative with this index.
    Positioned(usize),
    /// Past the last alternative. Terminal.
    Exhausted,
}

impl fmt::Display for IterationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationState::Unstarted => f.write_str("unstarted"),
            IterationState::Positioned(index) => write!(f, "positioned at alternative {index}"),
            IterationState::Exhausted => f.write_str("exhausted"),
        }
    }
}

/// Single-use cursor a renderer drives through a [`PlacementStrategy`].
///
/// Created per feature, advanced with [`next`](Self::next) until an
/// alternative fits or the set is exhausted. The public geometry fields
/// belong to the renderer: the iterator never reads or writes them, and
/// they persist across `next()` calls.
///
/// ```
/// use cartolabel::prelude::*;
///
/// let set = PlacementAlternativeSet::with_alternatives(
///     PlacementProperties::default(),
///     [PlacementOverride::new().minimum_distance(4.0)],
/// )
/// .unwrap();
///
/// let mut it = set.placement_info(2.0, None);
/// assert!(it.next());
/// assert_eq!(it.actual_minimum_distance().unwrap(), 8.0);
/// assert!(!it.next());
/// ```
#[derive(Debug)]
pub struct PlacementIterator<'a> {
    strategy: &'a dyn PlacementStrategy,
    state: IterationState,
    current: Option<PlacementProperties>,

    /// Nominal-to-view multiplier.
    pub scale_factor: f64,
    /// Extents of an attached marker, when known.
    pub dimensions: Option<Dimensions>,
    /// Whether the renderer should record placed label extents.
    pub collect_extents: bool,
    /// Union of everything placed for this feature so far.
    pub extents: BoxEnvelope,
    /// Extra exclusion boxes supplied by the caller.
    pub additional_boxes: Vec<BoxEnvelope>,
    /// Envelopes of successful placements so far.
    pub envelopes: Vec<BoxEnvelope>,
}

impl<'a> PlacementIterator<'a> {
    /// Start iterating `strategy`'s alternatives.
    pub fn new(strategy: &'a dyn PlacementStrategy, scale_factor: f64, dimensions: Option<Dimensions>) -> Self {
        Self {
            strategy,
            state: IterationState::Unstarted,
            current: None,
            scale_factor,
            dimensions,
            collect_extents: false,
            extents: BoxEnvelope::empty(),
            additional_boxes: Vec::new(),
            envelopes: Vec::new(),
        }
    }

    /// Advance to the next alternative.
    ///
    /// Returns `true` exactly once per alternative, then `false` forever.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        let candidate = match self.state {
            IterationState::Unstarted => 0,
            IterationState::Positioned(index) => index + 1,
            IterationState::Exhausted => return false,
        };

        match self.strategy.alternative(candidate) {
            Some(properties) => {
                tracing::trace!(
                    target: targets::PLACEMENT,
                    index = candidate,
                    "trying placement alternative"
                );
                self.state = IterationState::Positioned(candidate);
                self.current = Some(properties);
                true
            }
            None => {
                tracing::debug!(
                    target: targets::PLACEMENT,
                    tried = candidate,
                    "placement alternatives exhausted"
                );
                self.state = IterationState::Exhausted;
                self.current = None;
                false
            }
        }
    }

    /// Current position.
    pub fn state(&self) -> IterationState {
        self.state
    }

    /// Index of the current alternative.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            IterationState::Positioned(index) => Some(index),
            _ => None,
        }
    }

    /// Check if marker dimensions were supplied.
    pub fn has_dimensions(&self) -> bool {
        self.dimensions.is_some()
    }

    /// The strategy being iterated.
    pub fn strategy(&self) -> &'a dyn PlacementStrategy {
        self.strategy
    }

    /// Resolved properties of the current alternative.
    pub fn properties(&self) -> Result<&PlacementProperties> {
        self.current
            .as_ref()
            .ok_or(Error::IteratorNotPositioned { state: self.state })
    }

    /// Label spacing in view units.
    pub fn actual_label_spacing(&self) -> Result<f64> {
        Ok(self.properties()?.label_spacing * self.scale_factor)
    }

    /// Minimum distance to other labels in view units.
    pub fn actual_minimum_distance(&self) -> Result<f64> {
        Ok(self.properties()?.minimum_distance * self.scale_factor)
    }

    /// Minimum padding to the map edge in view units.
    pub fn actual_minimum_padding(&self) -> Result<f64> {
        Ok(self.properties()?.minimum_padding * self.scale_factor)
    }

    /// Displacement in view units.
    pub fn actual_displacement(&self) -> Result<Displacement> {
        Ok(self.properties()?.displacement.scaled(self.scale_factor))
    }

    /// Evaluate the current alternative's formatting tree for a feature.
    pub fn process(&self, feature: &dyn Feature) -> Result<ProcessedText> {
        let output = self.properties()?.process(feature);
        if output.has_errors() {
            tracing::debug!(
                target: targets::PLACEMENT,
                feature = feature.id(),
                errors = output.errors().len(),
                "label text evaluated with errors"
            );
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{PlacementAlternativeSet, PlacementOverride};

    fn three_alternatives() -> PlacementAlternativeSet {
        PlacementAlternativeSet::with_alternatives(
            PlacementProperties::default(),
            [
                PlacementOverride::new().label_spacing(10.0),
                PlacementOverride::new().label_spacing(20.0),
                PlacementOverride::new().label_spacing(30.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn state_transitions() {
        let set = three_alternatives();
        let mut it = set.placement_info(1.0, None);

        assert_eq!(it.state(), IterationState::Unstarted);
        assert!(it.next());
        assert_eq!(it.state(), IterationState::Positioned(0));
        assert!(it.next());
        assert!(it.next());
        assert_eq!(it.index(), Some(2));
        assert!(!it.next());
        assert_eq!(it.state(), IterationState::Exhausted);
        assert_eq!(it.index(), None);
    }

    #[test]
    fn accessors_follow_position() {
        let set = three_alternatives();
        let mut it = set.placement_info(0.5, None);

        let mut spacing = Vec::new();
        while it.next() {
            spacing.push(it.actual_label_spacing().unwrap());
        }
        assert_eq!(spacing, [5.0, 10.0, 15.0]);
    }

    #[test]
    fn accessor_misuse_reports_state() {
        let set = three_alternatives();
        let mut it = set.placement_info(1.0, None);

        assert_eq!(
            it.actual_minimum_padding(),
            Err(Error::IteratorNotPositioned { state: IterationState::Unstarted })
        );
        while it.next() {}
        assert_eq!(
            it.properties().unwrap_err(),
            Error::IteratorNotPositioned { state: IterationState::Exhausted }
        );
    }

    #[test]
    fn scale_change_applies_immediately() {
        let set = three_alternatives();
        let mut it = set.placement_info(1.0, None);
        assert!(it.next());
        assert_eq!(it.actual_label_spacing().unwrap(), 10.0);

        it.scale_factor = 4.0;
        assert_eq!(it.actual_label_spacing().unwrap(), 40.0);
    }

    #[test]
    fn state_display() {
        assert_eq!(IterationState::Unstarted.to_string(), "unstarted");
        assert_eq!(IterationState::Positioned(2).to_string(), "positioned at alternative 2");
        assert_eq!(IterationState::Exhausted.to_string(), "exhausted");
    }
}
