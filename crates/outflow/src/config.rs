//! Configuration types for Outflow diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! TOML; missing fields fall back to their defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Geometric constants of the layout pass, in diagram units.
//! - [`StyleConfig`] - Visual styling of the SVG output.
//!
//! # Example
//!
//! ```
//! # use outflow::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().arc_samples(), 50);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use outflow_core::{
    color::Color,
    draw::{StrokeCap, StrokeJoin, StrokeStyle},
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first out-of-range setting.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.validate()
    }
}

/// Geometric constants of the layout pass.
///
/// Lengths are in diagram units, where one unit is the total input flow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Points sampled along each arc.
    arc_samples: usize,
    /// Smallest inner bend radius.
    min_bend_radius: f32,
    /// Length of every arrowhead along its flow direction.
    arrow_depth: f32,
    /// Length of the primary input shaft.
    input_length: f32,
    /// Length of the straight diagonal tail of secondary inputs.
    secondary_tail: f32,
    /// Horizontal gap between consecutive loss arrows.
    loss_gap: f32,
    /// Straight vertical run between a loss arc and its arrowhead.
    loss_stem: f32,
    /// Horizontal run between the last arrow and the output head.
    output_gap: f32,
    /// Distance between a label and the geometry it describes.
    label_gap: f32,
}

impl LayoutConfig {
    pub fn arc_samples(&self) -> usize {
        self.arc_samples
    }

    pub fn min_bend_radius(&self) -> f32 {
        self.min_bend_radius
    }

    pub fn arrow_depth(&self) -> f32 {
        self.arrow_depth
    }

    pub fn input_length(&self) -> f32 {
        self.input_length
    }

    pub fn secondary_tail(&self) -> f32 {
        self.secondary_tail
    }

    pub fn loss_gap(&self) -> f32 {
        self.loss_gap
    }

    pub fn loss_stem(&self) -> f32 {
        self.loss_stem
    }

    pub fn output_gap(&self) -> f32 {
        self.output_gap
    }

    pub fn label_gap(&self) -> f32 {
        self.label_gap
    }

    /// Sets the number of points sampled per arc.
    pub fn with_arc_samples(mut self, samples: usize) -> Self {
        self.arc_samples = samples;
        self
    }

    /// Sets the arrowhead depth.
    pub fn with_arrow_depth(mut self, depth: f32) -> Self {
        self.arrow_depth = depth;
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.arc_samples < 2 {
            return Err(format!(
                "layout.arc_samples must be at least 2, got {}",
                self.arc_samples
            ));
        }
        let lengths = [
            ("min_bend_radius", self.min_bend_radius),
            ("arrow_depth", self.arrow_depth),
            ("input_length", self.input_length),
            ("secondary_tail", self.secondary_tail),
            ("loss_gap", self.loss_gap),
            ("loss_stem", self.loss_stem),
            ("output_gap", self.output_gap),
            ("label_gap", self.label_gap),
        ];
        match lengths
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(format!(
                "layout.{name} must be a non-negative number, got {value}"
            )),
            None => Ok(()),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            arc_samples: 50,
            min_bend_radius: 0.07,
            arrow_depth: 0.06,
            input_length: 0.3,
            secondary_tail: 0.15,
            loss_gap: 0.1,
            loss_stem: 0.1,
            output_gap: 0.1,
            label_gap: 0.03,
        }
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color string; no background is drawn when unset.
    background_color: Option<String>,
    /// Outline and separator color string.
    stroke_color: String,
    stroke_width: f32,
    stroke_cap: StrokeCap,
    stroke_join: StrokeJoin,
    /// Dash pattern of separators: "solid", "dashed", "dotted" or a dasharray.
    separator_style: StrokeStyle,
    font_family: String,
    /// Label color string; the SVG default (black) when unset.
    text_color: Option<String>,
    /// Opacity applied to every fill colour.
    fill_opacity: f32,
    /// SVG pixels per diagram unit.
    pixels_per_unit: f32,
    /// Blank border around the content, in pixels.
    margin: f32,
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = color.into();
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn with_stroke_cap(mut self, cap: StrokeCap) -> Self {
        self.stroke_cap = cap;
        self
    }

    pub fn with_stroke_join(mut self, join: StrokeJoin) -> Self {
        self.stroke_join = join;
        self
    }

    pub fn with_separator_style(mut self, style: StrokeStyle) -> Self {
        self.separator_style = style;
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed outline [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        Color::new(&self.stroke_color)
            .map_err(|err| format!("Invalid stroke color in config: {err}"))
    }

    /// Returns the parsed label [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn text_color(&self) -> Result<Option<Color>, String> {
        self.text_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid text color in config: {err}"))
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn stroke_cap(&self) -> StrokeCap {
        self.stroke_cap
    }

    pub fn stroke_join(&self) -> StrokeJoin {
        self.stroke_join
    }

    pub fn separator_style(&self) -> &StrokeStyle {
        &self.separator_style
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn fill_opacity(&self) -> f32 {
        self.fill_opacity
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(format!(
                "style.fill_opacity must lie in [0, 1], got {}",
                self.fill_opacity
            ));
        }
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return Err(format!(
                "style.pixels_per_unit must be positive, got {}",
                self.pixels_per_unit
            ));
        }
        self.background_color()?;
        self.stroke_color()?;
        self.text_color()?;
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            stroke_color: "black".to_string(),
            stroke_width: 1.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            separator_style: StrokeStyle::Dashed,
            font_family: "Arial".to_string(),
            text_color: None,
            fill_opacity: 0.85,
            pixels_per_unit: 400.0,
            margin: 20.0,
        }
    }
}
