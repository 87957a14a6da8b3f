//! Placement selector enums.
//!
//! Each selector parses from both the style-file spelling (`line`, `top`)
//! and the upper-case constant names used by scripting bindings
//! (`LINE_PLACEMENT`, `TOP`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! selector_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $property:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $style:literal | $constant:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Name as used in style files.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $style,)+
                }
            }

            /// Upper-case constant name.
            pub fn constant_name(self) -> &'static str {
                match self {
                    $($name::$variant => $constant,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = cartolabel_core::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($style) || s == $constant {
                        return Ok($name::$variant);
                    }
                )+
                Err(cartolabel_core::Error::invalid_value(
                    $property,
                    format!("unknown value '{s}'"),
                ))
            }
        }
    };
}

selector_enum! {
    /// How a label is attached to its geometry.
    LabelPlacement, "label_placement" {
        /// Along the line geometry.
        Line => "line" | "LINE_PLACEMENT",
        /// At a single anchor point (centroid for polygons).
        #[default]
        Point => "point" | "POINT_PLACEMENT",
        /// At every vertex.
        Vertex => "vertex" | "VERTEX_PLACEMENT",
        /// At a point guaranteed to be inside the polygon.
        Interior => "interior" | "INTERIOR_PLACEMENT",
    }
}

selector_enum! {
    /// Vertical position of the label relative to its anchor.
    VerticalAlignment, "vertical_alignment" {
        Top => "top" | "TOP",
        Middle => "middle" | "MIDDLE",
        Bottom => "bottom" | "BOTTOM",
        /// Derived from the displacement direction.
        #[default]
        Auto => "auto" | "AUTO",
    }
}

selector_enum! {
    /// Horizontal position of the label relative to its anchor.
    HorizontalAlignment, "horizontal_alignment" {
        Left => "left" | "LEFT",
        Middle => "middle" | "MIDDLE",
        Right => "right" | "RIGHT",
        /// Derived from the displacement direction.
        #[default]
        Auto => "auto" | "AUTO",
    }
}

selector_enum! {
    /// Alignment of wrapped lines within a label.
    JustifyAlignment, "justify_alignment" {
        Left => "left" | "LEFT",
        #[default]
        Middle => "middle" | "MIDDLE",
        Right => "right" | "RIGHT",
    }
}
