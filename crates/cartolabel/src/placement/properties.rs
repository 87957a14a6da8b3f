//! Placement parameters of a symbolizer and their sparse overrides.

use std::sync::Arc;

use cartolabel_core::{Displacement, ExpressionEvalError, ExpressionRef, ExpressionSet, Feature};
use cartolabel_text::{FormatNode, GlyphStyle, NodeBox, ProcessedText, StyleOverride, merge};
use serde::{Deserialize, Serialize};

use crate::types::{HorizontalAlignment, JustifyAlignment, LabelPlacement, VerticalAlignment};
use crate::{Error, Result};

/// Shared handle to the root of a formatting tree.
pub type FormatTree = Arc<dyn FormatNode>;

/// Complete parameter set for placing one label.
///
/// Distances are in nominal units; the placement iterator scales them to
/// the current view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementProperties {
    /// Root of the formatting tree. Without one, no text is produced.
    #[serde(skip)]
    pub format_tree: Option<FormatTree>,
    /// Style the formatting tree starts from.
    pub default_format: GlyphStyle,
    /// Rotation in degrees, evaluated per feature.
    #[serde(skip)]
    pub orientation: Option<ExpressionRef>,
    /// Offset from the anchor.
    pub displacement: Displacement,
    pub label_placement: LabelPlacement,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub justify_alignment: JustifyAlignment,
    /// Distance between repeated labels along a line (0 = no repeat).
    pub label_spacing: f64,
    /// How far a label may slide from its ideal position along a line.
    pub label_position_tolerance: f64,
    /// Keep labels away from tile edges.
    pub avoid_edges: bool,
    /// Minimum distance to other labels.
    pub minimum_distance: f64,
    /// Minimum distance to the map edge.
    pub minimum_padding: f64,
    /// Lines shorter than this are not labelled.
    pub minimum_path_length: f64,
    /// Maximum angle between neighbouring characters on a line, in degrees.
    pub max_char_angle_delta: f64,
    /// Force an odd number of labels along a line.
    pub force_odd_labels: bool,
    /// Place the label even when it collides.
    pub allow_overlap: bool,
    /// Preferred width/height ratio of wrapped text.
    pub text_ratio: f64,
    /// Wrap text wider than this (0 = no wrapping).
    pub wrap_width: f64,
}

impl Default for PlacementProperties {
    fn default() -> Self {
        Self {
            format_tree: None,
            default_format: GlyphStyle::default(),
            orientation: None,
            displacement: Displacement::ZERO,
            label_placement: LabelPlacement::Point,
            horizontal_alignment: HorizontalAlignment::Auto,
            vertical_alignment: VerticalAlignment::Auto,
            justify_alignment: JustifyAlignment::Middle,
            label_spacing: 0.0,
            label_position_tolerance: 0.0,
            avoid_edges: false,
            minimum_distance: 0.0,
            minimum_padding: 0.0,
            minimum_path_length: 0.0,
            max_char_angle_delta: 22.5,
            force_odd_labels: false,
            allow_overlap: false,
            text_ratio: 0.0,
            wrap_width: 0.0,
        }
    }
}

impl PlacementProperties {
    /// Create default properties with no formatting tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create default properties with the given formatting tree.
    pub fn with_format_tree(tree: impl Into<NodeBox>) -> Self {
        let mut props = Self::default();
        props.set_format_tree(tree);
        props
    }

    /// The formatting tree, if any.
    pub fn format_tree(&self) -> Option<&FormatTree> {
        self.format_tree.as_ref()
    }

    /// Replace the formatting tree.
    pub fn set_format_tree(&mut self, tree: impl Into<NodeBox>) {
        self.format_tree = Some(Arc::from(tree.into()));
    }

    /// Set the displacement from a `(dx, dy)` pair.
    pub fn set_displacement(&mut self, displacement: impl Into<Displacement>) {
        self.displacement = displacement.into();
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        self.default_format.validate()?;

        check_finite("displacement", self.displacement.dx)?;
        check_finite("displacement", self.displacement.dy)?;
        check_non_negative("label_spacing", self.label_spacing)?;
        check_non_negative("label_position_tolerance", self.label_position_tolerance)?;
        check_non_negative("minimum_distance", self.minimum_distance)?;
        check_non_negative("minimum_padding", self.minimum_padding)?;
        check_non_negative("minimum_path_length", self.minimum_path_length)?;
        check_non_negative("max_char_angle_delta", self.max_char_angle_delta)?;
        check_non_negative("text_ratio", self.text_ratio)?;
        check_non_negative("wrap_width", self.wrap_width)?;
        Ok(())
    }

    /// Evaluate the formatting tree for a feature, starting from `default_format`.
    pub fn process(&self, feature: &dyn Feature) -> ProcessedText {
        let mut output = ProcessedText::new();
        self.process_into(feature, &mut output);
        output
    }

    /// Like [`process`](Self::process), appending to an existing buffer.
    pub fn process_into(&self, feature: &dyn Feature, output: &mut ProcessedText) {
        if let Some(tree) = &self.format_tree {
            tree.apply(&self.default_format, feature, output);
        }
    }

    /// Rotation for a feature in degrees (0 when no orientation is set).
    pub fn orientation_angle(&self, feature: &dyn Feature) -> std::result::Result<f64, ExpressionEvalError> {
        match &self.orientation {
            Some(expr) => expr.evaluate_number(feature),
            None => Ok(0.0),
        }
    }

    /// Add every expression these properties read to `set`.
    pub fn collect_expressions(&self, set: &mut ExpressionSet) {
        if let Some(orientation) = &self.orientation {
            set.insert(Arc::clone(orientation));
        }
        if let Some(tree) = &self.format_tree {
            tree.collect_expressions(set);
        }
    }
}

fn check_finite(property: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_property(property, format!("{value} is not a finite number")))
    }
}

fn check_non_negative(property: &'static str, value: f64) -> Result<()> {
    check_finite(property, value)?;
    if value < 0.0 {
        return Err(Error::invalid_property(property, format!("must not be negative, got {value}")));
    }
    Ok(())
}

/// One placement alternative: the fields it changes relative to the defaults.
///
/// Unset fields fall back to the alternative set's defaults. The text style
/// is overridden field by field through [`StyleOverride`].
///
/// # Example
///
/// ```
/// use cartolabel::prelude::*;
///
/// // Try a smaller font, pushed below the anchor.
/// let alternative = PlacementOverride::new()
///     .text_size(8.0)
///     .displacement((0.0, 6.0).into())
///     .vertical_alignment(VerticalAlignment::Top);
///
/// let resolved = alternative.apply_to(&PlacementProperties::default());
/// assert_eq!(resolved.default_format.text_size, 8.0);
/// assert_eq!(resolved.displacement.dy, 6.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementOverride {
    #[serde(skip)]
    pub format_tree: Option<FormatTree>,
    pub format: StyleOverride,
    #[serde(skip)]
    pub orientation: Option<ExpressionRef>,
    pub displacement: Option<Displacement>,
    pub label_placement: Option<LabelPlacement>,
    pub horizontal_alignment: Option<HorizontalAlignment>,
    pub vertical_alignment: Option<VerticalAlignment>,
    pub justify_alignment: Option<JustifyAlignment>,
    pub label_spacing: Option<f64>,
    pub label_position_tolerance: Option<f64>,
    pub avoid_edges: Option<bool>,
    pub minimum_distance: Option<f64>,
    pub minimum_padding: Option<f64>,
    pub minimum_path_length: Option<f64>,
    pub max_char_angle_delta: Option<f64>,
    pub force_odd_labels: Option<bool>,
    pub allow_overlap: Option<bool>,
    pub text_ratio: Option<f64>,
    pub wrap_width: Option<f64>,
}

macro_rules! override_setters {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Override `", stringify!($field), "`.")]
            pub fn $field(mut self, value: $ty) -> Self {
                self.$field = Some(value);
                self
            }
        )+
    };
}

impl PlacementOverride {
    /// Create an alternative identical to the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    override_setters!(
        displacement: Displacement,
        label_placement: LabelPlacement,
        horizontal_alignment: HorizontalAlignment,
        vertical_alignment: VerticalAlignment,
        justify_alignment: JustifyAlignment,
        label_spacing: f64,
        label_position_tolerance: f64,
        avoid_edges: bool,
        minimum_distance: f64,
        minimum_padding: f64,
        minimum_path_length: f64,
        max_char_angle_delta: f64,
        force_odd_labels: bool,
        allow_overlap: bool,
        text_ratio: f64,
        wrap_width: f64,
    );

    /// Use a different formatting tree for this alternative.
    pub fn format_tree(mut self, tree: impl Into<NodeBox>) -> Self {
        self.format_tree = Some(Arc::from(tree.into()));
        self
    }

    /// Use a different orientation expression for this alternative.
    pub fn orientation(mut self, orientation: impl Into<ExpressionRef>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    /// Override the default text style.
    pub fn format(mut self, format: StyleOverride) -> Self {
        self.format = format;
        self
    }

    /// Shortcut for overriding only the text size.
    pub fn text_size(mut self, size: f64) -> Self {
        self.format.text_size = Some(size);
        self
    }

    /// Resolve this alternative against the defaults.
    pub fn apply_to(&self, defaults: &PlacementProperties) -> PlacementProperties {
        let mut out = defaults.clone();

        macro_rules! merge_if_set {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = &self.$field {
                        out.$field = value.clone();
                    }
                )+
            };
        }

        merge_if_set!(
            displacement,
            label_placement,
            horizontal_alignment,
            vertical_alignment,
            justify_alignment,
            label_spacing,
            label_position_tolerance,
            avoid_edges,
            minimum_distance,
            minimum_padding,
            minimum_path_length,
            max_char_angle_delta,
            force_odd_labels,
            allow_overlap,
            text_ratio,
            wrap_width,
        );

        if let Some(tree) = &self.format_tree {
            out.format_tree = Some(Arc::clone(tree));
        }
        if let Some(orientation) = &self.orientation {
            out.orientation = Some(Arc::clone(orientation));
        }
        out.default_format = merge(&defaults.default_format, &self.format);

        out
    }

    /// Check that every set value is usable.
    pub fn validate(&self) -> Result<()> {
        self.format.validate()?;

        if let Some(d) = self.displacement {
            check_finite("displacement", d.dx)?;
            check_finite("displacement", d.dy)?;
        }
        let distances = [
            ("label_spacing", self.label_spacing),
            ("label_position_tolerance", self.label_position_tolerance),
            ("minimum_distance", self.minimum_distance),
            ("minimum_padding", self.minimum_padding),
            ("minimum_path_length", self.minimum_path_length),
            ("max_char_angle_delta", self.max_char_angle_delta),
            ("text_ratio", self.text_ratio),
            ("wrap_width", self.wrap_width),
        ];
        for (property, value) in distances {
            if let Some(value) = value {
                check_non_negative(property, value)?;
            }
        }
        Ok(())
    }

    /// Add the expressions this alternative introduces to `set`.
    pub fn collect_expressions(&self, set: &mut ExpressionSet) {
        if let Some(orientation) = &self.orientation {
            set.insert(Arc::clone(orientation));
        }
        if let Some(tree) = &self.format_tree {
            tree.collect_expressions(set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartolabel_core::{Color, Expression, FeatureRecord};
    use cartolabel_text::{ListNode, TextNode};

    #[test]
    fn default_values() {
        let props = PlacementProperties::default();
        assert!(props.format_tree().is_none());
        assert_eq!(props.label_placement, LabelPlacement::Point);
        assert_eq!(props.justify_alignment, JustifyAlignment::Middle);
        assert_eq!(props.max_char_angle_delta, 22.5);
        assert_eq!(props.displacement, Displacement::ZERO);
        assert!(props.validate().is_ok());
    }

    #[test]
    fn process_without_tree_is_empty() {
        let output = PlacementProperties::default().process(&FeatureRecord::new(1));
        assert!(output.is_empty());
    }

    #[test]
    fn process_uses_default_format() {
        let mut props = PlacementProperties::with_format_tree(TextNode::parse("[name]").unwrap());
        props.default_format.fill = Color::BLUE;

        let output = props.process(&FeatureRecord::new(1).with_attribute("name", "Rhône"));
        assert_eq!(output.text(), "Rhône");
        assert_eq!(output.runs()[0].style.fill, Color::BLUE);
    }

    #[test]
    fn displacement_from_tuple() {
        let mut props = PlacementProperties::default();
        props.set_displacement((2.0, -3.0));
        assert_eq!(props.displacement, Displacement::new(2.0, -3.0));
    }

    #[test]
    fn orientation_angle() {
        let mut props = PlacementProperties::default();
        let feature = FeatureRecord::new(1).with_attribute("angle", 30);
        assert_eq!(props.orientation_angle(&feature).unwrap(), 0.0);

        props.orientation = Some(Arc::new(Expression::attribute("angle")));
        assert_eq!(props.orientation_angle(&feature).unwrap(), 30.0);
        assert!(props.orientation_angle(&FeatureRecord::new(2)).is_err());
    }

    #[test]
    fn collect_includes_orientation_and_tree() {
        let mut props = PlacementProperties::with_format_tree(
            ListNode::new()
                .with_child(TextNode::parse("[name]").unwrap())
                .with_child(TextNode::literal("!")),
        );
        props.orientation = Some(Arc::new(Expression::attribute("angle")));

        let mut set = ExpressionSet::new();
        props.collect_expressions(&mut set);

        assert_eq!(set.len(), 3);
        assert_eq!(set.attribute_names().into_iter().collect::<Vec<_>>(), ["angle", "name"]);
    }

    #[test]
    fn validate_rejects_negative_distances() {
        let mut props = PlacementProperties::default();
        props.minimum_distance = -1.0;
        assert!(matches!(
            props.validate(),
            Err(Error::InvalidProperty { property: "minimum_distance", .. })
        ));

        let mut props = PlacementProperties::default();
        props.default_format.text_size = -4.0;
        assert!(matches!(props.validate(), Err(Error::Text(_))));
    }

    #[test]
    fn override_replaces_only_set_fields() {
        let mut defaults = PlacementProperties::default();
        defaults.label_spacing = 100.0;
        defaults.minimum_distance = 5.0;
        defaults.default_format.face_name = "Base".into();

        let alternative = PlacementOverride::new().minimum_distance(2.0).text_size(7.0);
        let resolved = alternative.apply_to(&defaults);

        assert_eq!(resolved.minimum_distance, 2.0);
        assert_eq!(resolved.label_spacing, 100.0);
        assert_eq!(resolved.default_format.text_size, 7.0);
        assert_eq!(resolved.default_format.face_name, "Base");
    }

    #[test]
    fn override_tree_replaces_default_tree() {
        let defaults = PlacementProperties::with_format_tree(TextNode::literal("long name"));
        let alternative = PlacementOverride::new().format_tree(TextNode::literal("short"));

        let resolved = alternative.apply_to(&defaults);
        assert_eq!(resolved.process(&FeatureRecord::new(1)).text(), "short");

        let unchanged = PlacementOverride::new().apply_to(&defaults);
        assert_eq!(unchanged.process(&FeatureRecord::new(1)).text(), "long name");
    }

    #[test]
    fn override_validation() {
        assert!(PlacementOverride::new().label_spacing(-1.0).validate().is_err());
        assert!(PlacementOverride::new().text_size(0.0).validate().is_err());
        assert!(
            PlacementOverride::new()
                .displacement(Displacement::new(f64::NAN, 0.0))
                .validate()
                .is_err()
        );
        assert!(PlacementOverride::new().wrap_width(40.0).validate().is_ok());
    }
}
