//! Fluent builder for style overrides.

use cartolabel_core::Color;

use super::StyleOverride;
use crate::types::TextTransform;

/// Builder for creating style overrides with a fluent API.
///
/// The builder does not validate; trees validate overrides when they are
/// attached to a node.
///
/// # Example
///
/// ```
/// use cartolabel_core::Color;
/// use cartolabel_text::StyleOverride;
///
/// let overrides = StyleOverride::builder()
///     .face_name("DejaVu Sans Bold")
///     .fill(Color::RED)
///     .halo_radius(1.0)
///     .build();
///
/// assert_eq!(overrides.fill, Some(Color::RED));
/// assert_eq!(overrides.text_size, None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OverrideBuilder {
    overrides: StyleOverride,
}

impl OverrideBuilder {
    /// Create a new builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the final override.
    pub fn build(self) -> StyleOverride {
        self.overrides
    }

    /// Set the font face name.
    pub fn face_name(mut self, value: impl Into<String>) -> Self {
        self.overrides.face_name = Some(value.into());
        self
    }

    /// Set the font set name.
    pub fn fontset(mut self, value: impl Into<String>) -> Self {
        self.overrides.fontset = Some(value.into());
        self
    }

    /// Set the text size.
    pub fn text_size(mut self, value: f64) -> Self {
        self.overrides.text_size = Some(value);
        self
    }

    /// Set the character spacing.
    pub fn character_spacing(mut self, value: f64) -> Self {
        self.overrides.character_spacing = Some(value);
        self
    }

    /// Set the line spacing.
    pub fn line_spacing(mut self, value: f64) -> Self {
        self.overrides.line_spacing = Some(value);
        self
    }

    /// Set the text opacity.
    pub fn opacity(mut self, value: f64) -> Self {
        self.overrides.opacity = Some(value);
        self
    }

    /// Set the wrap character.
    pub fn wrap_char(mut self, value: char) -> Self {
        self.overrides.wrap_char = Some(value);
        self
    }

    /// Set whether to wrap before the wrap character.
    pub fn wrap_before(mut self, value: bool) -> Self {
        self.overrides.wrap_before = Some(value);
        self
    }

    /// Set the text transformation.
    pub fn text_transform(mut self, value: TextTransform) -> Self {
        self.overrides.text_transform = Some(value);
        self
    }

    /// Set the text color.
    pub fn fill(mut self, value: Color) -> Self {
        self.overrides.fill = Some(value);
        self
    }

    /// Set the halo color.
    pub fn halo_fill(mut self, value: Color) -> Self {
        self.overrides.halo_fill = Some(value);
        self
    }

    /// Set the halo radius.
    pub fn halo_radius(mut self, value: f64) -> Self {
        self.overrides.halo_radius = Some(value);
        self
    }
}
