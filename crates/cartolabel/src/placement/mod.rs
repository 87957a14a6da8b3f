//! Placement properties, alternatives, and the placement iterator.
//!
//! A [`PlacementAlternativeSet`] holds full default [`PlacementProperties`]
//! and an ordered list of sparse [`PlacementOverride`]s. It is the built-in
//! [`PlacementStrategy`]; other strategies can generate their alternatives
//! on demand. For each feature the renderer opens a [`PlacementIterator`]
//! and advances it until one alternative fits:
//!
//! ```text
//! Unstarted --next()--> Positioned(0) --next()--> ... Positioned(N-1) --next()--> Exhausted
//!     \_________________________ N = 0 ______________________________________/
//! ```

mod alternatives;
mod iterator;
mod properties;
mod strategy;

pub use alternatives::PlacementAlternativeSet;
pub use iterator::{IterationState, PlacementIterator};
pub use properties::{FormatTree, PlacementOverride, PlacementProperties};
pub use strategy::PlacementStrategy;

static_assertions::assert_impl_all!(PlacementProperties: Send, Sync, Clone);
static_assertions::assert_impl_all!(PlacementAlternativeSet: Send, Sync, Clone);
static_assertions::assert_impl_all!(Box<dyn PlacementStrategy>: Send, Sync, Clone);
