//! Feature records and attribute values.
//!
//! The label engine only ever *reads* attributes, and only those named by an
//! expression. Anything that can look an attribute up by name can act as a
//! feature by implementing [`Feature`].

use std::collections::HashMap;
use std::fmt;

use crate::ExpressionEvalError;

/// A single attribute value of a feature.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    /// Explicit null; renders as empty text.
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl AttributeValue {
    /// Render the value as label text.
    ///
    /// Doubles use the shortest representation that round-trips, so `3.0`
    /// renders as `3` and `0.1` as `0.1`. Non-finite doubles cannot be
    /// labelled and are reported as malformed.
    pub fn to_text(&self, name: &str) -> Result<String, ExpressionEvalError> {
        match self {
            AttributeValue::Null => Ok(String::new()),
            AttributeValue::Bool(v) => Ok(v.to_string()),
            AttributeValue::Integer(v) => Ok(v.to_string()),
            AttributeValue::Double(v) if !v.is_finite() => {
                Err(ExpressionEvalError::MalformedAttribute {
                    name: name.to_string(),
                    message: format!("non-finite number {v}"),
                })
            }
            AttributeValue::Double(v) => Ok(v.to_string()),
            AttributeValue::String(v) => Ok(v.clone()),
        }
    }

    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => f.write_str("null"),
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::Integer(v) => write!(f, "{v}"),
            AttributeValue::Double(v) => write!(f, "{v}"),
            AttributeValue::String(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// Attribute lookup for a single geographic entity.
pub trait Feature {
    /// Identifier of the feature, used in diagnostics only.
    fn id(&self) -> u64;

    /// Look up an attribute by name.
    fn attribute(&self, name: &str) -> Option<&AttributeValue>;
}

/// In-memory feature with a flat attribute map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    id: u64,
    attributes: HashMap<String, AttributeValue>,
}

impl FeatureRecord {
    /// Create a feature with no attributes.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            attributes: HashMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set or replace an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its old value.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.attributes.remove(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the feature carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Feature for FeatureRecord {
    fn id(&self) -> u64 {
        self.id
    }

    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}
