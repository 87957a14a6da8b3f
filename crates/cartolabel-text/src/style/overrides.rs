//! Sparse style overrides and the merge onto a resolved style.

use cartolabel_core::Color;
use serde::{Deserialize, Serialize};

use super::glyph::{check_finite, check_name, check_opacity, check_radius, check_size};
use super::{GlyphStyle, OverrideBuilder};
use crate::types::TextTransform;
use crate::{Error, Result};

/// A set of optional style fields.
///
/// `None` means "inherit from the parent style". Only the fields that are
/// set replace anything during [`merge`].
///
/// An override can replace a parent's fontset but cannot clear it: an
/// unset `fontset` always inherits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverride {
    /// Face to use. An empty name selects the renderer's default face.
    pub face_name: Option<String>,
    pub fontset: Option<String>,
    pub text_size: Option<f64>,
    pub character_spacing: Option<f64>,
    pub line_spacing: Option<f64>,
    pub opacity: Option<f64>,
    pub wrap_char: Option<char>,
    pub wrap_before: Option<bool>,
    pub text_transform: Option<TextTransform>,
    pub fill: Option<Color>,
    pub halo_fill: Option<Color>,
    pub halo_radius: Option<f64>,
}

impl StyleOverride {
    /// Create an override that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building an override with a fluent API.
    pub fn builder() -> OverrideBuilder {
        OverrideBuilder::new()
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check that every set field carries a usable value.
    pub fn validate(&self) -> Result<()> {
        let malformed = |field, message: String| Err(Error::MalformedOverride { field, message });

        if let Some(message) = self.fontset.as_deref().and_then(check_name) {
            return malformed("fontset", message);
        }
        if let Some(message) = self.text_size.and_then(check_size) {
            return malformed("text_size", message);
        }
        if let Some(message) = self.character_spacing.and_then(check_finite) {
            return malformed("character_spacing", message);
        }
        if let Some(message) = self.line_spacing.and_then(check_finite) {
            return malformed("line_spacing", message);
        }
        if let Some(message) = self.opacity.and_then(check_opacity) {
            return malformed("opacity", message);
        }
        if let Some(message) = self.halo_radius.and_then(check_radius) {
            return malformed("halo_radius", message);
        }
        Ok(())
    }

    /// Resolve this override against `base`. Same as [`merge`].
    pub fn apply_to(&self, base: &GlyphStyle) -> GlyphStyle {
        merge(base, self)
    }
}

/// Merge an override onto a resolved style.
///
/// Each field is taken from `overrides` when set and from `base` otherwise.
/// Fields never influence each other.
pub fn merge(base: &GlyphStyle, overrides: &StyleOverride) -> GlyphStyle {
    let mut out = base.clone();

    macro_rules! merge_if_set {
        ($($field:ident),+ $(,)?) => {
            $(
                if let Some(value) = &overrides.$field {
                    out.$field = value.clone();
                }
            )+
        };
    }

    merge_if_set!(
        face_name,
        text_size,
        character_spacing,
        line_spacing,
        opacity,
        wrap_char,
        wrap_before,
        text_transform,
        fill,
        halo_fill,
        halo_radius,
    );

    if let Some(fontset) = &overrides.fontset {
        out.fontset = Some(fontset.clone());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_is_identity() {
        let base = GlyphStyle::with_font("Open Sans Regular", 11.0, Color::GRAY);
        assert!(StyleOverride::new().is_empty());
        assert_eq!(merge(&base, &StyleOverride::new()), base);
    }

    #[test]
    fn merge_replaces_only_set_fields() {
        let base = GlyphStyle::default();
        let overrides = StyleOverride {
            fill: Some(Color::RED),
            ..StyleOverride::default()
        };

        let merged = merge(&base, &overrides);

        assert_eq!(merged.fill, Color::RED);
        // Setting fill never implies halo_fill.
        assert_eq!(merged.halo_fill, base.halo_fill);
        assert_eq!(GlyphStyle { fill: base.fill, ..merged }, base);
    }

    #[test]
    fn merge_every_field() {
        let overrides = StyleOverride {
            face_name: Some("Noto Serif Bold".into()),
            fontset: Some("fallback".into()),
            text_size: Some(14.0),
            character_spacing: Some(1.5),
            line_spacing: Some(2.0),
            opacity: Some(0.5),
            wrap_char: Some('-'),
            wrap_before: Some(true),
            text_transform: Some(TextTransform::Uppercase),
            fill: Some(Color::BLUE),
            halo_fill: Some(Color::BLACK),
            halo_radius: Some(2.5),
        };

        let merged = overrides.apply_to(&GlyphStyle::default());

        assert_eq!(merged.face_name, "Noto Serif Bold");
        assert_eq!(merged.fontset.as_deref(), Some("fallback"));
        assert_eq!(merged.text_size, 14.0);
        assert_eq!(merged.character_spacing, 1.5);
        assert_eq!(merged.line_spacing, 2.0);
        assert_eq!(merged.opacity, 0.5);
        assert_eq!(merged.wrap_char, '-');
        assert!(merged.wrap_before);
        assert_eq!(merged.text_transform, TextTransform::Uppercase);
        assert_eq!(merged.fill, Color::BLUE);
        assert_eq!(merged.halo_fill, Color::BLACK);
        assert_eq!(merged.halo_radius, 2.5);
    }

    #[test]
    fn unset_fontset_keeps_parent_fontset() {
        let mut base = GlyphStyle::default();
        base.fontset = Some("cjk".into());

        let merged = merge(&base, &StyleOverride::builder().text_size(9.0).build());
        assert_eq!(merged.fontset.as_deref(), Some("cjk"));
    }

    #[test]
    fn validate_rejects_malformed_values() {
        let cases = [
            (StyleOverride::builder().text_size(-1.0).build(), "text_size"),
            (StyleOverride::builder().opacity(2.0).build(), "opacity"),
            (StyleOverride::builder().halo_radius(-0.5).build(), "halo_radius"),
            (StyleOverride::builder().fontset(" ").build(), "fontset"),
            (StyleOverride::builder().line_spacing(f64::INFINITY).build(), "line_spacing"),
        ];

        for (overrides, expected) in cases {
            match overrides.validate() {
                Err(Error::MalformedOverride { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected malformed {expected}, got {other:?}"),
            }
        }

        assert!(StyleOverride::builder().opacity(0.0).build().validate().is_ok());
    }

    #[test]
    fn empty_face_name_selects_renderer_default() {
        let overrides = StyleOverride::builder().face_name("").build();
        assert!(overrides.validate().is_ok());

        let base = GlyphStyle::with_font("Noto Sans", 10.0, Color::BLACK);
        assert_eq!(merge(&base, &overrides).face_name, "");
    }
}
