//! Text symbolizer: the style-level owner of a placement strategy.

use std::sync::Arc;

use cartolabel_core::logging::targets;
use cartolabel_core::{Color, Dimensions, ExpressionRef, ExpressionSet};
use cartolabel_text::{GlyphStyle, TextNode};

use crate::placement::{PlacementAlternativeSet, PlacementIterator, PlacementProperties, PlacementStrategy};
use crate::Result;

/// Labels features with text.
///
/// The placement strategy is shared: cloning a symbolizer is cheap, and
/// modifying one clone copies the strategy first so other clones are not
/// affected.
///
/// ```
/// use cartolabel::prelude::*;
/// use cartolabel_core::{Color, Expression, FeatureRecord};
///
/// let symbolizer = TextSymbolizer::new(
///     Expression::parse("[name]").unwrap(),
///     "DejaVu Sans Book",
///     12.0,
///     Color::BLACK,
/// )
/// .unwrap();
///
/// let feature = FeatureRecord::new(1).with_attribute("name", "Marseille");
/// let mut it = symbolizer.placement_info(1.0, None);
/// assert!(it.next());
/// assert_eq!(it.process(&feature).unwrap().text(), "Marseille");
/// ```
#[derive(Debug, Clone)]
pub struct TextSymbolizer {
    placements: Arc<dyn PlacementStrategy>,
}

impl Default for TextSymbolizer {
    fn default() -> Self {
        Self::with_placements(PlacementAlternativeSet::default_single())
    }
}

impl TextSymbolizer {
    /// Create a symbolizer labelling with `name` in a single font.
    pub fn new(
        name: impl Into<ExpressionRef>,
        face_name: impl Into<String>,
        text_size: f64,
        fill: Color,
    ) -> Result<Self> {
        let mut defaults = PlacementProperties::with_format_tree(TextNode::new(name));
        defaults.default_format = GlyphStyle::with_font(face_name, text_size, fill);
        Ok(Self::with_placements(PlacementAlternativeSet::single(defaults)?))
    }

    /// Create a symbolizer from a placement strategy.
    pub fn with_placements(placements: impl PlacementStrategy + 'static) -> Self {
        Self {
            placements: Arc::new(placements),
        }
    }

    /// The placement strategy.
    pub fn placements(&self) -> &dyn PlacementStrategy {
        self.placements.as_ref()
    }

    /// Shared handle to the placement strategy.
    pub fn placements_handle(&self) -> Arc<dyn PlacementStrategy> {
        Arc::clone(&self.placements)
    }

    /// Replace the placement strategy.
    pub fn set_placements(&mut self, placements: Arc<dyn PlacementStrategy>) {
        self.placements = placements;
        tracing::debug!(
            target: targets::SYMBOLIZER,
            alternatives = ?self.placements.alternative_count(),
            "replaced placement strategy"
        );
    }

    /// Default text style.
    pub fn format(&self) -> &GlyphStyle {
        &self.placements.defaults().default_format
    }

    /// Replace the default text style.
    pub fn set_format(&mut self, format: GlyphStyle) -> Result<()> {
        format.validate()?;
        self.edit_placements(|placements| {
            let mut defaults = placements.defaults().clone();
            defaults.default_format = format;
            placements.set_defaults(defaults)
        })
    }

    /// Default placement properties.
    pub fn properties(&self) -> &PlacementProperties {
        self.placements.defaults()
    }

    /// Replace the default placement properties.
    pub fn set_properties(&mut self, properties: PlacementProperties) -> Result<()> {
        self.edit_placements(|placements| placements.set_defaults(properties))
    }

    /// Start iterating the alternatives for one feature.
    pub fn placement_info(&self, scale_factor: f64, dimensions: Option<Dimensions>) -> PlacementIterator<'_> {
        PlacementIterator::new(self.placements.as_ref(), scale_factor, dimensions)
    }

    /// Every expression the symbolizer reads.
    pub fn collect_expressions(&self) -> ExpressionSet {
        let mut set = ExpressionSet::new();
        self.placements.collect_expressions(&mut set);
        set
    }

    // Edits in place when this symbolizer is the only owner, otherwise on a
    // copy. A failed edit leaves the symbolizer unchanged.
    fn edit_placements<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut (dyn PlacementStrategy + 'static)) -> Result<()>,
    {
        if let Some(placements) = Arc::get_mut(&mut self.placements) {
            return edit(placements);
        }
        let mut copy = self.placements.clone_box();
        edit(copy.as_mut())?;
        self.placements = Arc::from(copy);
        Ok(())
    }
}

static_assertions::assert_impl_all!(TextSymbolizer: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use cartolabel_core::{Expression, FeatureRecord};

    #[test]
    fn default_has_one_empty_alternative() {
        let symbolizer = TextSymbolizer::default();
        assert_eq!(symbolizer.placements().alternative_count(), Some(1));

        let mut it = symbolizer.placement_info(1.0, None);
        assert!(it.next());
        assert!(it.process(&FeatureRecord::new(1)).unwrap().is_empty());
        assert!(!it.next());
    }

    #[test]
    fn new_sets_font_and_name() {
        let symbolizer =
            TextSymbolizer::new(Expression::attribute("name"), "Noto Sans", 9.0, Color::GRAY).unwrap();

        assert_eq!(symbolizer.format().face_name, "Noto Sans");
        assert_eq!(symbolizer.format().text_size, 9.0);
        assert_eq!(symbolizer.format().fill, Color::GRAY);
        assert!(symbolizer.collect_expressions().contains(&Expression::attribute("name")));
    }

    #[test]
    fn new_rejects_bad_font() {
        assert!(TextSymbolizer::new(Expression::literal("x"), "Sans", -1.0, Color::BLACK).is_err());
        assert!(TextSymbolizer::new(Expression::literal("x"), "Sans", f64::NAN, Color::BLACK).is_err());
    }

    #[test]
    fn edits_copy_on_write() {
        let original = TextSymbolizer::new(Expression::literal("x"), "Sans", 10.0, Color::BLACK).unwrap();
        let mut edited = original.clone();

        let mut style = edited.format().clone();
        style.text_size = 14.0;
        edited.set_format(style).unwrap();

        assert_eq!(original.format().text_size, 10.0);
        assert_eq!(edited.format().text_size, 14.0);
    }

    #[test]
    fn failed_edit_leaves_state() {
        let mut symbolizer = TextSymbolizer::default();
        let mut props = symbolizer.properties().clone();
        props.label_spacing = -5.0;

        assert!(symbolizer.set_properties(props).is_err());
        assert_eq!(symbolizer.properties().label_spacing, 0.0);
    }

    #[test]
    fn failed_edit_on_shared_strategy_keeps_handle() {
        let mut symbolizer = TextSymbolizer::default();
        let shared = symbolizer.placements_handle();

        let mut style = symbolizer.format().clone();
        style.opacity = 2.0;
        assert!(symbolizer.set_format(style).is_err());
        assert!(Arc::ptr_eq(&shared, &symbolizer.placements_handle()));
    }

    #[test]
    fn unshared_edit_happens_in_place() {
        let mut symbolizer = TextSymbolizer::default();
        let before = Arc::as_ptr(&symbolizer.placements) as *const ();

        let mut props = symbolizer.properties().clone();
        props.wrap_width = 30.0;
        symbolizer.set_properties(props).unwrap();

        assert_eq!(Arc::as_ptr(&symbolizer.placements) as *const (), before);
        assert_eq!(symbolizer.properties().wrap_width, 30.0);
    }
}
