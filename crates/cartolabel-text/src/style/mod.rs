//! Glyph styles and sparse style overrides.

mod builder;
mod glyph;
mod overrides;

pub use builder::OverrideBuilder;
pub use glyph::GlyphStyle;
pub use overrides::{StyleOverride, merge};
