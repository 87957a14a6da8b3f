//! Core primitives for the cartolabel label engine.
//!
//! This crate holds the leaf data shared by the formatting tree and the
//! placement iterator:
//!
//! - **Types**: [`Color`], [`Displacement`], [`Dimensions`], [`BoxEnvelope`]
//! - **Features**: the [`Feature`] lookup trait and an in-memory [`FeatureRecord`]
//! - **Expressions**: attribute expressions such as `[name] + ' (' + [ref] + ')'`
//!   and the [`ExpressionSet`] used for attribute-dependency discovery
//!
//! # Example
//!
//! ```
//! use cartolabel_core::{Expression, FeatureRecord};
//!
//! let expr = Expression::parse("'Rue ' + [name]").unwrap();
//! let feature = FeatureRecord::new(1).with_attribute("name", "de Rivoli");
//!
//! assert_eq!(expr.evaluate(&feature).unwrap(), "Rue de Rivoli");
//! ```

pub mod expression;
pub mod feature;
pub mod logging;
pub mod types;

mod error;

pub use error::{Error, ExpressionEvalError, Result};
pub use expression::{Expression, ExpressionRef, ExpressionSet};
pub use feature::{AttributeValue, Feature, FeatureRecord};
pub use types::{BoxEnvelope, Color, Dimensions, Displacement};
