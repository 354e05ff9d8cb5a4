//! Text rendering definitions for flow labels.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable, possibly multi-line and rotated, text element
//! - [`TextAnchor`] - Which end of a line sits on the anchor point
//!
//! # Quick Start
//!
//! ```
//! # use outflow_core::draw::{TextAnchor, TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_family("Helvetica");
//! style.set_font_size(11.5);
//!
//! let text = Text::new(&style, "Fuel\n75 MW (70%)").with_anchor(TextAnchor::End);
//! let size = text.calculate_size();
//! assert!(size.height() > 0.0);
//! ```
//!
//! Multi-line content is rendered as one `<tspan>` per line, vertically
//! centred on the anchor point.

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

/// Horizontal alignment of text relative to its anchor point.
///
/// Alignment is measured along the text's own baseline, so for rotated text
/// `Start` means "the end the text reads from".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }

    /// Fraction of the line width that lies before the anchor point.
    fn leading_fraction(self) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Middle => 0.5,
            Self::End => 1.0,
        }
    }
}

/// Defines the visual style for label text.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `10.0` |
/// | Text color | `None` (SVG default, typically black) |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` leaves the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 10.0,
            color: None,
        }
    }
}

/// A renderable text element combining content with styling.
///
/// # Examples
///
/// ```
/// # use outflow_core::draw::{TextDefinition, Text};
/// let style = TextDefinition::new();
/// let text = Text::new(&style, "Losses").with_rotation(-90.0);
///
/// let size = text.calculate_size();
/// assert!(size.height() > 0.0);
/// assert_eq!(text.content(), "Losses");
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    anchor: TextAnchor,
    rotation: f32,
}

impl<'a> Text<'a> {
    /// Creates a new, unrotated, centred text element.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            anchor: TextAnchor::default(),
            rotation: 0.0,
        }
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the rotation in degrees about the anchor point, clockwise in
    /// screen coordinates (SVG `rotate()` convention).
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Returns the anchor of this element.
    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Returns the rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Size of the unrotated text block.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    /// Screen-space box covered by this text when anchored at `position`,
    /// with rotation applied.
    ///
    /// # Examples
    ///
    /// ```
    /// # use outflow_core::draw::{TextAnchor, TextDefinition, Text};
    /// # use outflow_core::geometry::Point;
    /// let style = TextDefinition::new();
    /// let text = Text::new(&style, "Heat").with_anchor(TextAnchor::Start);
    ///
    /// let bounds = text.bounds(Point::new(100.0, 50.0));
    /// assert!(bounds.min_x() >= 100.0 - 0.001);
    /// ```
    pub fn bounds(&self, position: Point) -> Bounds {
        let size = self.calculate_size();
        let left = -size.width() * self.anchor.leading_fraction();
        let right = left + size.width();
        let top = -size.height() / 2.0;
        let bottom = size.height() / 2.0;

        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let corners = [(left, top), (right, top), (right, bottom), (left, bottom)]
            .map(|(dx, dy)| Point::new(dx * cos - dy * sin, dx * sin + dy * cos).add_point(position));

        // Four corners always yield a box.
        Bounds::from_points(corners).unwrap_or_default()
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let lines: Vec<&str> = self.content.lines().collect();

        let total_height = self.calculate_size().height();
        let line_height = if lines.is_empty() {
            0.0
        } else {
            total_height / lines.len() as f32
        };
        let y_offset = -(total_height + line_height) / 2.0;

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y() + y_offset)
            .set("text-anchor", self.anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.rotation != 0.0 {
            rendered_text = rendered_text.set(
                "transform",
                format!(
                    "rotate({} {} {})",
                    self.rotation,
                    position.x(),
                    position.y()
                ),
            );
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.bounds(Point::default()).to_size()
    }
}

/// TextManager handles text measurement and font operations.
/// It keeps one FontSystem alive since building it means scanning system fonts.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measure `text` in pixels with cosmic-text, one line-height per line.
    ///
    /// Falls back to an average-advance estimate when shaping yields no
    /// layout runs (e.g. no fonts installed).
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        } else {
            let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
            max_width = longest as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height * text.lines().count().max(1) as f32;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
