//! Stroke and line-style definitions.
//!
//! [`StrokeStyle`], [`StrokeCap`] and [`StrokeJoin`] deserialize from the
//! lowercase SVG keywords, so they can be set directly from a config file:
//!
//! ```toml
//! separator_style = "dotted"   # or "solid", "dashed", or a dasharray like "6,2"
//! stroke_cap = "round"
//! stroke_join = "bevel"
//! ```
//!
//! [`apply_stroke!`](crate::apply_stroke!) writes a [`StrokeDefinition`] onto
//! any SVG element.

use std::str::FromStr;

use serde::Deserialize;

use crate::color::Color;

/// Dash pattern of a stroke.
///
/// Keywords map to fixed dasharrays; any other string is used verbatim.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// "5,5"
    Dashed,
    /// "2,3"
    Dotted,
    /// Raw SVG dasharray, e.g. "10,5,2,3"
    Custom(String),
}

impl From<String> for StrokeStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            _ => Self::Custom(value),
        }
    }
}

impl StrokeStyle {
    /// The `stroke-dasharray` value, or `None` for solid lines.
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// How line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for StrokeCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(format!(
                "invalid stroke cap `{s}`, valid values: butt, round, square"
            )),
        }
    }
}

impl TryFrom<String> for StrokeCap {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How corners between polyline segments are rendered.
///
/// Sampled arcs are polylines too, so this also affects how smooth the
/// bends look at large scales.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl FromStr for StrokeJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            _ => Err(format!(
                "invalid stroke join `{s}`, valid values: miter, round, bevel"
            )),
        }
    }
}

impl TryFrom<String> for StrokeJoin {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Everything needed to stroke an outline or a separator.
///
/// # Examples
///
/// ```
/// use outflow_core::draw::{StrokeDefinition, StrokeJoin, StrokeStyle};
/// use outflow_core::color::Color;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 1.0)
///     .with_style(StrokeStyle::Dotted)
///     .with_join(StrokeJoin::Round);
/// assert_eq!(stroke.style().to_svg_value().as_deref(), Some("2,3"));
/// ```
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// A solid stroke with butt caps and miter joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Sets stroke colour, opacity, width, cap, join and (unless solid) the
/// dasharray on an SVG element.
///
/// ```
/// use outflow_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let line = svg_element::Polyline::new().set("points", "0,0 10,0");
/// let line = outflow_core::apply_stroke!(line, &StrokeDefinition::default());
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
