//! Text value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Case transformation applied to a run's text before it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Leave the text as evaluated.
    #[default]
    None,
    /// Upper-case every character.
    Uppercase,
    /// Lower-case every character.
    Lowercase,
    /// Upper-case the first letter of each word, lower-case the rest.
    Capitalize,
}

impl TextTransform {
    /// Apply the transformation to `text`.
    pub fn apply(self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => capitalize(text),
        }
    }

    /// Name as used in style files.
    pub fn as_str(self) -> &'static str {
        match self {
            TextTransform::None => "none",
            TextTransform::Uppercase => "uppercase",
            TextTransform::Lowercase => "lowercase",
            TextTransform::Capitalize => "capitalize",
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_word_bounds() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

impl fmt::Display for TextTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextTransform {
    type Err = cartolabel_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(TextTransform::None),
            "uppercase" => Ok(TextTransform::Uppercase),
            "lowercase" => Ok(TextTransform::Lowercase),
            "capitalize" => Ok(TextTransform::Capitalize),
            _ => Err(cartolabel_core::Error::invalid_value(
                "text_transform",
                format!("unknown transform '{s}'"),
            )),
        }
    }
}
