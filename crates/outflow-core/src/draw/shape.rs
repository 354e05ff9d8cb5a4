//! Vertex-list shapes.
//!
//! Unlike box shapes centred on a position, these carry absolute vertices;
//! the position passed to [`Drawable::render_to_layers`] is a translation.

use std::fmt::Write as _;

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Point, Size},
};

/// Formats vertices as an SVG `points` attribute, translated by `offset`.
fn points_attribute(points: &[Point], offset: Point) -> String {
    let mut value = String::new();
    for (i, point) in points.iter().enumerate() {
        let point = point.add_point(offset);
        if i > 0 {
            value.push(' ');
        }
        // Writing into a String cannot fail
        let _ = write!(value, "{},{}", point.x(), point.y());
    }
    value
}

fn points_size(points: &[Point]) -> Size {
    Bounds::from_points(points.iter().copied())
        .map(Bounds::to_size)
        .unwrap_or_default()
}

/// A filled polygon without an outline.
///
/// # Examples
///
/// ```
/// # use outflow_core::draw::{Drawable, Polygon};
/// # use outflow_core::color::Color;
/// # use outflow_core::geometry::Point;
/// let triangle = Polygon::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 5.0),
///     Point::new(0.0, 10.0),
/// ])
/// .with_fill(Color::new("orange").unwrap());
///
/// assert_eq!(triangle.size().height(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct Polygon {
    points: Vec<Point>,
    fill: Option<Color>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            fill: None,
        }
    }

    /// Sets the fill colour; its alpha becomes `fill-opacity`.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Drawable for Polygon {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.points.is_empty() {
            return output;
        }

        let mut polygon =
            svg_element::Polygon::new().set("points", points_attribute(&self.points, position));

        polygon = match &self.fill {
            Some(color) => polygon
                .set("fill", color)
                .set("fill-opacity", color.alpha()),
            None => polygon.set("fill", "none"),
        };
        let polygon = polygon.set("stroke", "none");

        output.add_to_layer(RenderLayer::Fill, Box::new(polygon));
        output
    }

    fn size(&self) -> Size {
        points_size(&self.points)
    }
}

/// A stroked open or closed line through a list of vertices.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Point>,
    stroke: StrokeDefinition,
    closed: bool,
    layer: RenderLayer,
}

impl Polyline {
    pub fn new(points: Vec<Point>, stroke: StrokeDefinition) -> Self {
        Self {
            points,
            stroke,
            closed: false,
            layer: RenderLayer::Outline,
        }
    }

    /// Closes the line back to its first vertex.
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Overrides the layer, [`RenderLayer::Outline`] by default.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Drawable for Polyline {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.points.len() < 2 {
            return output;
        }

        let points = points_attribute(&self.points, position);
        let node: Box<dyn svg::Node> = if self.closed {
            let element = svg_element::Polygon::new()
                .set("points", points)
                .set("fill", "none");
            Box::new(apply_stroke!(element, &self.stroke))
        } else {
            let element = svg_element::Polyline::new()
                .set("points", points)
                .set("fill", "none");
            Box::new(apply_stroke!(element, &self.stroke))
        };

        output.add_to_layer(self.layer, node);
        output
    }

    fn size(&self) -> Size {
        points_size(&self.points)
    }
}
