//! Fully resolved text appearance.

use cartolabel_core::Color;
use serde::{Deserialize, Serialize};

use crate::types::TextTransform;
use crate::{Error, Result};

/// Fully resolved text appearance attached to every emitted run.
///
/// Every field always has a value. Runs carry their own copy, so a style
/// can be changed after evaluation without affecting earlier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphStyle {
    /// Font face name. Empty selects the renderer's default face.
    pub face_name: String,
    /// Named font set used instead of a single face, if any.
    pub fontset: Option<String>,
    /// Font size in nominal pixels.
    pub text_size: f64,
    /// Extra space between characters.
    pub character_spacing: f64,
    /// Extra space between lines.
    pub line_spacing: f64,
    /// Text opacity (0.0-1.0).
    pub opacity: f64,
    /// Character at which lines may be wrapped.
    pub wrap_char: char,
    /// Wrap before the wrap character instead of after it.
    pub wrap_before: bool,
    /// Case transformation applied to the text.
    pub text_transform: TextTransform,
    /// Text color.
    pub fill: Color,
    /// Halo color.
    pub halo_fill: Color,
    /// Halo radius in nominal pixels.
    pub halo_radius: f64,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            face_name: String::new(),
            fontset: None,
            text_size: 10.0,
            character_spacing: 0.0,
            line_spacing: 0.0,
            opacity: 1.0,
            wrap_char: ' ',
            wrap_before: false,
            text_transform: TextTransform::None,
            fill: Color::BLACK,
            halo_fill: Color::WHITE,
            halo_radius: 0.0,
        }
    }
}

impl GlyphStyle {
    /// Create the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a style with the given face, size and fill.
    pub fn with_font(face_name: impl Into<String>, text_size: f64, fill: Color) -> Self {
        Self {
            face_name: face_name.into(),
            text_size,
            fill,
            ..Self::default()
        }
    }

    /// Check that numeric fields are usable.
    ///
    /// Styles loaded from a style file should be validated once before they
    /// are attached to a placement set.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, message: String| Err(Error::InvalidStyle { field, message });

        if let Some(message) = check_size(self.text_size) {
            return invalid("text_size", message);
        }
        if let Some(message) = check_finite(self.character_spacing) {
            return invalid("character_spacing", message);
        }
        if let Some(message) = check_finite(self.line_spacing) {
            return invalid("line_spacing", message);
        }
        if let Some(message) = check_opacity(self.opacity) {
            return invalid("opacity", message);
        }
        if let Some(message) = check_radius(self.halo_radius) {
            return invalid("halo_radius", message);
        }
        if let Some(message) = self.fontset.as_deref().and_then(check_name) {
            return invalid("fontset", message);
        }
        Ok(())
    }
}

pub(super) fn check_finite(value: f64) -> Option<String> {
    (!value.is_finite()).then(|| format!("{value} is not a finite number"))
}

pub(super) fn check_size(value: f64) -> Option<String> {
    check_finite(value).or_else(|| (value <= 0.0).then(|| format!("size must be positive, got {value}")))
}

pub(super) fn check_opacity(value: f64) -> Option<String> {
    check_finite(value)
        .or_else(|| (!(0.0..=1.0).contains(&value)).then(|| format!("opacity must be within 0..=1, got {value}")))
}

pub(super) fn check_radius(value: f64) -> Option<String> {
    check_finite(value).or_else(|| (value < 0.0).then(|| format!("radius must not be negative, got {value}")))
}

pub(super) fn check_name(value: &str) -> Option<String> {
    value.trim().is_empty().then(|| "name must not be empty".to_string())
}
