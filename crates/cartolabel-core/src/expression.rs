//! Attribute expressions.
//!
//! An expression is the text source of a label run. The syntax is the one
//! used in style files:
//!
//! - `'text'` or `"text"`: a literal, `\` escapes the quote character
//! - `[name]`: the value of the feature attribute `name`
//! - `a + b`: concatenation
//!
//! ```
//! use cartolabel_core::Expression;
//!
//! let expr = Expression::parse("[name] + ' (' + [ref] + ')'").unwrap();
//! assert_eq!(expr.to_string(), "[name] + ' (' + [ref] + ')'");
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::Arc;

use crate::logging::targets;
use crate::{Error, ExpressionEvalError, Feature, Result};

/// Shared handle to an expression.
///
/// Text nodes and expression sets hold expressions through this handle so
/// that collecting dependencies never copies expression trees.
pub type ExpressionRef = Arc<Expression>;

/// A parsed attribute expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Constant text.
    Literal(String),
    /// Reference to a feature attribute by name.
    Attribute(String),
    /// Concatenation of sub-expressions, in order.
    Concat(Vec<Expression>),
}

impl Expression {
    /// Create a literal expression.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Create an attribute reference.
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute(name.into())
    }

    /// Parse an expression from its source form.
    pub fn parse(input: &str) -> Result<Self> {
        let result = Parser::new(input).parse();
        if let Err(e) = &result {
            tracing::debug!(target: targets::EXPRESSION, "rejected expression: {}", e);
        }
        result
    }

    /// Check if the expression is constant (references no attribute).
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::Attribute(_) => false,
            Expression::Concat(parts) => parts.iter().all(Expression::is_constant),
        }
    }

    /// Evaluate the expression against a feature, producing label text.
    pub fn evaluate(&self, feature: &dyn Feature) -> std::result::Result<String, ExpressionEvalError> {
        match self {
            Expression::Literal(text) => Ok(text.clone()),
            Expression::Attribute(name) => match feature.attribute(name) {
                Some(value) => value.to_text(name),
                None => Err(ExpressionEvalError::MissingAttribute { name: name.clone() }),
            },
            Expression::Concat(parts) => {
                let mut out = String::new();
                for part in parts {
                    out.push_str(&part.evaluate(feature)?);
                }
                Ok(out)
            }
        }
    }

    /// Evaluate the expression and interpret the result as a number.
    pub fn evaluate_number(&self, feature: &dyn Feature) -> std::result::Result<f64, ExpressionEvalError> {
        let text = self.evaluate(feature)?;
        text.trim()
            .parse::<f64>()
            .map_err(|_| ExpressionEvalError::NotNumeric { text })
    }

    /// Collect the attribute names this expression reads.
    pub fn attribute_names<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Expression::Literal(_) => {}
            Expression::Attribute(name) => {
                out.insert(name.as_str());
            }
            Expression::Concat(parts) => {
                for part in parts {
                    part.attribute_names(out);
                }
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(text) => {
                f.write_str("'")?;
                for c in text.chars() {
                    if c == '\'' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("'")
            }
            Expression::Attribute(name) => write!(f, "[{name}]"),
            Expression::Concat(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" + ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::str::FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn parse(mut self) -> Result<Expression> {
        let mut parts = vec![self.term()?];
        loop {
            self.skip_whitespace();
            match self.chars.next() {
                None => break,
                Some((_, '+')) => parts.push(self.term()?),
                Some((pos, c)) => {
                    return Err(self.error(pos, format!("expected '+' or end of input, found '{c}'")));
                }
            }
        }

        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(Expression::Concat(parts))
        }
    }

    fn term(&mut self) -> Result<Expression> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((pos, quote @ ('\'' | '"'))) => self.literal(pos, quote),
            Some((pos, '[')) => self.attribute(pos),
            Some((pos, c)) => Err(self.error(pos, format!("expected a literal or [attribute], found '{c}'"))),
            None => Err(self.error(self.input.len(), "unexpected end of input")),
        }
    }

    fn literal(&mut self, start: usize, quote: char) -> Result<Expression> {
        let mut text = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => match self.chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => break,
                },
                c if c == quote => return Ok(Expression::Literal(text)),
                c => text.push(c),
            }
        }
        Err(self.error(start, "unterminated string literal"))
    }

    fn attribute(&mut self, start: usize) -> Result<Expression> {
        let mut name = String::new();
        for (pos, c) in self.chars.by_ref() {
            match c {
                ']' if name.trim().is_empty() => {
                    return Err(Error::expression_parse(self.input, pos, "empty attribute name"));
                }
                ']' => return Ok(Expression::Attribute(name.trim().to_string())),
                '[' => {
                    return Err(Error::expression_parse(self.input, pos, "nested '[' in attribute name"));
                }
                c => name.push(c),
            }
        }
        Err(self.error(start, "unterminated attribute reference"))
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn error(&self, position: usize, message: impl Into<String>) -> Error {
        Error::expression_parse(self.input, position, message)
    }
}

/// Set of expressions gathered from a formatting tree.
///
/// Uniqueness is structural: two separately parsed `[name]` references
/// count once. Iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct ExpressionSet {
    expressions: HashSet<ExpressionRef>,
}

impl ExpressionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an expression, returning `true` if it was not present yet.
    pub fn insert(&mut self, expression: ExpressionRef) -> bool {
        self.expressions.insert(expression)
    }

    /// Check if an equal expression is present.
    pub fn contains(&self, expression: &Expression) -> bool {
        self.expressions.contains(expression)
    }

    /// Number of distinct expressions.
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Iterate over the expressions.
    pub fn iter(&self) -> impl Iterator<Item = &ExpressionRef> {
        self.expressions.iter()
    }

    /// All attribute names referenced by any expression in the set.
    pub fn attribute_names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        for expression in &self.expressions {
            expression.attribute_names(&mut names);
        }
        names
    }
}

impl Extend<ExpressionRef> for ExpressionSet {
    fn extend<I: IntoIterator<Item = ExpressionRef>>(&mut self, iter: I) {
        self.expressions.extend(iter);
    }
}

static_assertions::assert_impl_all!(ExpressionSet: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureRecord;

    #[test]
    fn parse_single_attribute() {
        assert_eq!(Expression::parse("[name]").unwrap(), Expression::attribute("name"));
        assert_eq!(Expression::parse("  [ name ]  ").unwrap(), Expression::attribute("name"));
    }

    #[test]
    fn parse_literals() {
        assert_eq!(Expression::parse("'Hello '").unwrap(), Expression::literal("Hello "));
        assert_eq!(Expression::parse("\"it's\"").unwrap(), Expression::literal("it's"));
        assert_eq!(Expression::parse(r"'it\'s'").unwrap(), Expression::literal("it's"));
    }

    #[test]
    fn parse_concatenation() {
        let expr = Expression::parse("[name] + ' ' + [ref]").unwrap();
        assert_eq!(
            expr,
            Expression::Concat(vec![
                Expression::attribute("name"),
                Expression::literal(" "),
                Expression::attribute("ref"),
            ])
        );
    }

    #[test]
    fn parse_errors() {
        for input in ["", "name", "[name", "'open", "[]", "[a] +", "[a] [b]", "[a[b]]"] {
            let err = Expression::parse(input).unwrap_err();
            assert!(matches!(err, Error::ExpressionParse { .. }), "input {input:?}");
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        let source = r"[name] + ' \'quoted\' ' + [ref]";
        let expr = Expression::parse(source).unwrap();
        assert_eq!(Expression::parse(&expr.to_string()).unwrap(), expr);
    }

    #[test]
    fn evaluate_against_feature() {
        let feature = FeatureRecord::new(1)
            .with_attribute("name", "A6")
            .with_attribute("lanes", 4);
        let expr = Expression::parse("[name] + ' (' + [lanes] + ')'").unwrap();

        assert_eq!(expr.evaluate(&feature).unwrap(), "A6 (4)");
    }

    #[test]
    fn evaluate_missing_attribute() {
        let feature = FeatureRecord::new(1);
        let err = Expression::attribute("name").evaluate(&feature).unwrap_err();
        assert_eq!(err, ExpressionEvalError::MissingAttribute { name: "name".into() });
    }

    #[test]
    fn evaluate_number() {
        let feature = FeatureRecord::new(1)
            .with_attribute("angle", 45.5)
            .with_attribute("name", "north");

        assert_eq!(Expression::attribute("angle").evaluate_number(&feature).unwrap(), 45.5);
        assert!(matches!(
            Expression::attribute("name").evaluate_number(&feature),
            Err(ExpressionEvalError::NotNumeric { .. })
        ));
    }

    #[test]
    fn constant_detection() {
        assert!(Expression::parse("'a' + 'b'").unwrap().is_constant());
        assert!(!Expression::parse("'a' + [b]").unwrap().is_constant());
    }

    #[test]
    fn set_deduplicates_structurally() {
        let mut set = ExpressionSet::new();
        assert!(set.insert(Arc::new(Expression::attribute("name"))));
        assert!(!set.insert(Arc::new(Expression::parse("[name]").unwrap())));
        assert!(set.insert(Arc::new(Expression::parse("[name] + [ref]").unwrap())));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&Expression::attribute("name")));
        assert!(set.contains(&Expression::parse("[name] + [ref]").unwrap()));
        assert!(!set.contains(&Expression::attribute("ref")));
        assert_eq!(set.attribute_names().into_iter().collect::<Vec<_>>(), vec!["name", "ref"]);
    }
}
