//! The laid-out diagram as an ordered list of drawing primitives.
//!
//! A [`Scene`] is the pure result of layout. Coordinates are in diagram
//! space: x grows rightward, y grows upward and one vertical unit is the
//! total input. Primitives are stored in paint order.

use outflow_core::{
    draw::TextAnchor,
    geometry::{Bounds, Point},
};

/// The flow a primitive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowRef {
    Input(usize),
    Loss(usize),
    Output,
}

/// Vertical territory owned by one input.
///
/// Spans `[lower, upper]`. `left` is the x position where the input's
/// arrowhead base meets the diagram body; the arrowhead cuts a notch of
/// depth `arrow_depth` into the band's left boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    upper: f32,
    lower: f32,
    left: f32,
    drawn: bool,
}

impl Band {
    pub fn new(upper: f32, lower: f32, left: f32, drawn: bool) -> Self {
        Self {
            upper,
            lower,
            left,
            drawn,
        }
    }

    pub fn upper(&self) -> f32 {
        self.upper
    }

    /// Bottom of the band (`lim_bot`).
    pub fn lower(&self) -> f32 {
        self.lower
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    /// Whether the owning input was drawn. Negligible inputs keep a
    /// zero-height band.
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    pub fn height(&self) -> f32 {
        self.upper - self.lower
    }

    /// Vertical midpoint, where the arrowhead notch is deepest.
    pub fn comp(&self) -> f32 {
        (self.upper + self.lower) / 2.0
    }

    /// x of the notched left boundary at height `y`.
    ///
    /// The boundary runs from `left` at the band edges to `left + depth` at
    /// [`Band::comp`].
    pub fn boundary_x(&self, y: f32, depth: f32) -> f32 {
        let half = self.height() / 2.0;
        if half <= 0.0 {
            return self.left;
        }
        let distance = ((y - self.comp()).abs() / half).min(1.0);
        self.left + depth * (1.0 - distance)
    }
}

/// Whether a fill paints a band slice or an arrow body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    /// A slice of the diagram body lying in band `k`.
    Band(usize),
    /// The curved body and head of a loss arrow, or the output dart.
    Arrow,
}

/// A closed, colour-filled region.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPolygon {
    points: Vec<Point>,
    colour_index: usize,
    owner: FlowRef,
    kind: FillKind,
}

impl FillPolygon {
    pub fn new(points: Vec<Point>, colour_index: usize, owner: FlowRef, kind: FillKind) -> Self {
        Self {
            points,
            colour_index,
            owner,
            kind,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Index into the diagram's colour list.
    pub fn colour_index(&self) -> usize {
        self.colour_index
    }

    pub fn owner(&self) -> FlowRef {
        self.owner
    }

    pub fn kind(&self) -> FillKind {
        self.kind
    }
}

/// What a stroked line depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    /// Straight outline segment: shafts, diagram edges, stems, tails.
    Edge,
    InnerArc,
    OuterArc,
    Arrowhead,
    Separator,
}

/// A stroked polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    kind: StrokeKind,
    owner: Option<FlowRef>,
    points: Vec<Point>,
    closed: bool,
}

impl Stroke {
    /// An open stroke. Its dash pattern is chosen by the exporter from its kind.
    pub fn new(kind: StrokeKind, owner: Option<FlowRef>, points: Vec<Point>) -> Self {
        Self {
            kind,
            owner,
            points,
            closed: false,
        }
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn owner(&self) -> Option<FlowRef> {
        self.owner
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// A positioned text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    lines: Vec<String>,
    anchor: Point,
    rotation: f32,
    font_size: f32,
    text_anchor: TextAnchor,
    owner: FlowRef,
}

impl Label {
    pub fn new(
        lines: Vec<String>,
        anchor: Point,
        font_size: f32,
        text_anchor: TextAnchor,
        owner: FlowRef,
    ) -> Self {
        Self {
            lines,
            anchor,
            rotation: 0.0,
            font_size,
            text_anchor,
            owner,
        }
    }

    /// Rotation in degrees, counter-clockwise in diagram space.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn text_anchor(&self) -> TextAnchor {
        self.text_anchor
    }

    pub fn owner(&self) -> FlowRef {
        self.owner
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Fill(FillPolygon),
    Stroke(Stroke),
    Label(Label),
}

/// The result of laying out a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
    bands: Vec<Band>,
    output_magnitude: f32,
}

impl Scene {
    pub fn new(primitives: Vec<Primitive>, bands: Vec<Band>, output_magnitude: f32) -> Self {
        Self {
            primitives,
            bands,
            output_magnitude,
        }
    }

    /// All primitives in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// One band per input, top to bottom.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Net output in the diagram's unit.
    pub fn output_magnitude(&self) -> f32 {
        self.output_magnitude
    }

    pub fn fills(&self) -> impl Iterator<Item = &FillPolygon> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Fill(fill) => Some(fill),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Stroke(stroke) => Some(stroke),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Label(label) => Some(label),
            _ => None,
        })
    }

    /// Bounds of every fill and stroke vertex and label anchor.
    pub fn bounds(&self) -> Option<Bounds> {
        let points = self.primitives.iter().flat_map(|primitive| match primitive {
            Primitive::Fill(fill) => fill.points().to_vec(),
            Primitive::Stroke(stroke) => stroke.points().to_vec(),
            Primitive::Label(label) => vec![label.anchor()],
        });
        Bounds::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_band_geometry() {
        let band = Band::new(0.7, 0.3, 1.0, true);
        assert_approx_eq!(f32, band.height(), 0.4);
        assert_approx_eq!(f32, band.comp(), 0.5);
        assert_approx_eq!(f32, band.boundary_x(0.7, 0.06), 1.0);
        assert_approx_eq!(f32, band.boundary_x(0.5, 0.06), 1.06);
        assert_approx_eq!(f32, band.boundary_x(0.4, 0.06), 1.03, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_height_band_boundary() {
        let band = Band::new(0.2, 0.2, 0.5, false);
        assert_approx_eq!(f32, band.boundary_x(0.2, 0.06), 0.5);
    }

    #[test]
    fn test_scene_filters_by_variant() {
        let scene = Scene::new(
            vec![
                Primitive::Fill(FillPolygon::new(
                    vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
                    0,
                    FlowRef::Output,
                    FillKind::Band(0),
                )),
                Primitive::Stroke(Stroke::new(
                    StrokeKind::Edge,
                    None,
                    vec![Point::new(-0.3, 0.0), Point::new(0.0, 0.0)],
                )),
                Primitive::Label(Label::new(
                    vec!["Out".to_string()],
                    Point::new(2.0, 0.5),
                    10.0,
                    TextAnchor::Start,
                    FlowRef::Output,
                )),
            ],
            vec![Band::new(1.0, 0.0, 0.0, true)],
            50.0,
        );

        assert_eq!(scene.fills().count(), 1);
        assert_eq!(scene.strokes().count(), 1);
        assert_eq!(scene.labels().count(), 1);

        let bounds = scene.bounds().unwrap();
        assert_approx_eq!(f32, bounds.min_x(), -0.3);
        assert_approx_eq!(f32, bounds.max_x(), 2.0);
    }

    #[test]
    fn test_closed_stroke() {
        let stroke = Stroke::new(StrokeKind::Separator, None, Vec::new()).closed();
        assert!(stroke.is_closed());
        assert_eq!(stroke.kind(), StrokeKind::Separator);
    }
}
