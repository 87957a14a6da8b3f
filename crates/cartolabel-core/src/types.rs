//! Basic geometry and color types.
//!
//! These are plain value types. Nothing in the label core mutates an
//! envelope on its own; the renderer owns that bookkeeping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color, non-premultiplied.
///
/// Serializes as a hex string (`#rrggbb` when opaque, `#rrggbbaa` otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from 8-bit RGBA components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from a hex string (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, digit) in channels.iter_mut().zip(hex.chars()) {
                    let v = digit.to_digit(16)? as u8;
                    *channel = v * 16 + v;
                }
                Some(Self::from_rgb(channels[0], channels[1], channels[2]))
            }
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = if hex.len() == 8 {
                    u8::from_str_radix(&hex[6..8], 16).ok()?
                } else {
                    255
                };
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Format as a hex string.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Return a new color with modified alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    // Common colors
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    pub const GREEN: Self = Self::from_rgb(0, 128, 0);
    pub const BLUE: Self = Self::from_rgb(0, 0, 255);
    pub const GRAY: Self = Self::from_rgb(128, 128, 128);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
            .ok_or_else(|| crate::Error::invalid_value("color", format!("'{value}' is not a hex color")))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Label offset from the anchor point, in nominal (unscaled) units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    /// No offset.
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Create a new displacement.
    #[inline]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Scale both components.
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            dx: self.dx * factor,
            dy: self.dy * factor,
        }
    }
}

impl From<(f64, f64)> for Displacement {
    fn from((dx, dy): (f64, f64)) -> Self {
        Self { dx, dy }
    }
}

impl From<Displacement> for (f64, f64) {
    fn from(d: Displacement) -> Self {
        (d.dx, d.dy)
    }
}

/// Width and height of the symbol a label is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// Create new dimensions.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<(f64, f64)> for Dimensions {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box in map pixel space.
///
/// A freshly created envelope is empty: it has inverted bounds so the first
/// [`expand_to_include`](Self::expand_to_include) adopts the other box as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxEnvelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoxEnvelope {
    /// Create a box from two corners, normalizing their order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Create a box of the given size centered on a point.
    pub fn centered(cx: f64, cy: f64, dims: Dimensions) -> Self {
        let hw = dims.width / 2.0;
        let hh = dims.height / 2.0;
        Self::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }

    /// An empty envelope that contains nothing.
    pub const fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Check if the envelope covers no area at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Width of the box (zero when empty).
    #[inline]
    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_x - self.min_x }
    }

    /// Height of the box (zero when empty).
    #[inline]
    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_y - self.min_y }
    }

    /// Grow this box to cover `other`.
    pub fn expand_to_include(&mut self, other: &BoxEnvelope) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Check whether two boxes overlap (touching edges count).
    pub fn intersects(&self, other: &BoxEnvelope) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Check whether a point lies inside the box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl Default for BoxEnvelope {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("#f00"), Some(Color::RED));
        assert_eq!(Color::from_hex("#ff000080"), Some(Color::new(255, 0, 0, 128)));
        assert_eq!(Color::from_hex("ff0000"), None);
        assert_eq!(Color::from_hex("#ff00"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn color_hex_formatting() {
        assert_eq!(Color::RED.to_hex(), "#ff0000");
        assert_eq!(Color::new(1, 2, 3, 4).to_hex(), "#01020304");
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn color_try_from_string_rejects_garbage() {
        assert!(Color::try_from("red".to_string()).is_err());
        assert_eq!(Color::try_from("#0000ff".to_string()).ok(), Some(Color::BLUE));
    }

    #[test]
    fn displacement_from_tuple() {
        let d: Displacement = (3.0, -2.5).into();
        assert_eq!(d, Displacement::new(3.0, -2.5));
        assert_eq!(d.scaled(2.0), Displacement::new(6.0, -5.0));
    }

    #[test]
    fn envelope_starts_empty() {
        let env = BoxEnvelope::default();
        assert!(env.is_empty());
        assert_eq!(env.width(), 0.0);
        assert!(!env.intersects(&BoxEnvelope::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn envelope_expand() {
        let mut env = BoxEnvelope::empty();
        env.expand_to_include(&BoxEnvelope::new(0.0, 0.0, 10.0, 5.0));
        env.expand_to_include(&BoxEnvelope::new(-5.0, 2.0, 3.0, 8.0));

        assert_eq!(env, BoxEnvelope::new(-5.0, 0.0, 10.0, 8.0));
        assert_eq!(env.width(), 15.0);
        assert_eq!(env.height(), 8.0);
    }

    #[test]
    fn envelope_intersection() {
        let a = BoxEnvelope::new(0.0, 0.0, 10.0, 10.0);
        let b = BoxEnvelope::new(10.0, 10.0, 20.0, 20.0);
        let c = BoxEnvelope::new(11.0, 0.0, 20.0, 5.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains(5.0, 5.0));
    }

    #[test]
    fn envelope_centered() {
        let env = BoxEnvelope::centered(10.0, 10.0, Dimensions::new(4.0, 2.0));
        assert_eq!(env, BoxEnvelope::new(8.0, 9.0, 12.0, 11.0));
    }
}
