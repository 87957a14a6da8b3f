//! Cartographic label engine.
//!
//! Labels are described in two layers:
//!
//! - **What to write**: a formatting tree of [`TextNode`]s,
//!   [`FormatOverrideNode`]s and [`ListNode`]s, evaluated per feature into
//!   styled text runs (see [`cartolabel_text`])
//! - **Where to put it**: a [`PlacementStrategy`], usually a
//!   [`PlacementAlternativeSet`] of placement properties, that the renderer
//!   tries in order through a [`PlacementIterator`]
//!
//! A [`TextSymbolizer`] ties the two together for a style rule.
//!
//! # Example
//!
//! ```
//! use cartolabel::prelude::*;
//! use cartolabel_core::{Color, FeatureRecord};
//!
//! let tree = ListNode::new()
//!     .with_child(TextNode::parse("[name]").unwrap())
//!     .with_child(
//!         FormatOverrideNode::new(
//!             StyleOverride::builder().text_size(7.0).build(),
//!             TextNode::parse("' ' + [ref]").unwrap(),
//!         )
//!         .unwrap(),
//!     );
//!
//! let mut defaults = PlacementProperties::with_format_tree(tree);
//! defaults.default_format = GlyphStyle::with_font("DejaVu Sans Book", 10.0, Color::BLACK);
//!
//! let placements = PlacementAlternativeSet::with_alternatives(
//!     defaults,
//!     [
//!         PlacementOverride::new(),
//!         PlacementOverride::new().text_size(8.0).displacement((0.0, 4.0).into()),
//!     ],
//! )
//! .unwrap();
//!
//! let feature = FeatureRecord::new(1)
//!     .with_attribute("name", "Autoroute du Soleil")
//!     .with_attribute("ref", "A6");
//!
//! let mut it = placements.placement_info(1.0, None);
//! while it.next() {
//!     let text = it.process(&feature).unwrap();
//!     assert_eq!(text.text(), "Autoroute du Soleil A6");
//!     // Collision test against the renderer's own index goes here.
//! }
//! ```

pub mod placement;
pub mod symbolizer;
pub mod types;

mod error;

pub use error::{Error, Result};
pub use placement::{
    FormatTree, IterationState, PlacementAlternativeSet, PlacementIterator, PlacementOverride,
    PlacementProperties, PlacementStrategy,
};
pub use symbolizer::TextSymbolizer;
pub use types::{HorizontalAlignment, JustifyAlignment, LabelPlacement, VerticalAlignment};

// Formatting tree types, re-exported for convenience.
pub use cartolabel_text::{
    FormatNode, FormatOverrideNode, GlyphStyle, ListNode, NodeBox, ProcessedText, StyleOverride,
    StyledRun, TextNode, TextTransform,
};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::placement::{
        IterationState, PlacementAlternativeSet, PlacementIterator, PlacementOverride,
        PlacementProperties, PlacementStrategy,
    };
    pub use crate::symbolizer::TextSymbolizer;
    pub use crate::types::{HorizontalAlignment, JustifyAlignment, LabelPlacement, VerticalAlignment};
    pub use cartolabel_text::prelude::*;
}
