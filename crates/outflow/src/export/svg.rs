//! SVG rendering of a [`Scene`].
//!
//! Diagram space has y pointing up and one unit equal to the total input.
//! Every vertex is mapped to screen space by scaling with
//! `pixels_per_unit` and flipping y, then the whole picture is shifted so
//! its bounds, labels included, start at the margin.

use std::io;

use log::{debug, info};
use svg::node::element as svg_element;

use outflow_core::{
    color::{Color, Rgb},
    draw::{
        Drawable, LayeredOutput, Polygon, Polyline, RenderLayer, StrokeDefinition, Text,
        TextDefinition,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    scene::{FillPolygon, Label, Primitive, Scene, Stroke, StrokeKind},
};

/// Builder for [`Svg`]; resolves every colour up front so rendering
/// itself cannot fail on a bad colour string.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    style: StyleConfig,
    palette: Vec<Rgb>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Colours indexed by [`FillPolygon::colour_index`].
    pub fn with_palette(mut self, palette: &[Rgb]) -> Self {
        self.palette = palette.to_vec();
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::Render`] when a configured colour cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let style = self.style;
        let background = style.background_color().map_err(Error::Render)?;
        let stroke_color = style.stroke_color().map_err(Error::Render)?;
        let text_color = style.text_color().map_err(Error::Render)?;

        let palette = self
            .palette
            .into_iter()
            .map(|rgb| {
                rgb.to_color()
                    .map(|color| color.with_alpha(style.fill_opacity()))
                    .map_err(Error::Render)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut text = TextDefinition::new();
        text.set_font_family(style.font_family());
        text.set_color(text_color);

        let outline = StrokeDefinition::new(stroke_color, style.stroke_width())
            .with_cap(style.stroke_cap())
            .with_join(style.stroke_join());
        let separator = outline.clone().with_style(style.separator_style().clone());

        Ok(Svg {
            background,
            outline,
            separator,
            text,
            palette,
            pixels_per_unit: style.pixels_per_unit(),
            margin: style.margin(),
        })
    }
}

/// A configured SVG renderer.
#[derive(Debug)]
pub struct Svg {
    background: Option<Color>,
    outline: StrokeDefinition,
    separator: StrokeDefinition,
    text: TextDefinition,
    palette: Vec<Color>,
    pixels_per_unit: f32,
    margin: f32,
}

impl Svg {
    /// Renders `scene` to a complete SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when a fill refers to a colour missing from
    /// the palette.
    pub fn render_scene(&self, scene: &Scene) -> Result<svg::Document, Error> {
        let content_bounds = self.calculate_scene_bounds(scene);
        let svg_size = content_bounds
            .to_size()
            .add_padding(Insets::uniform(self.margin));
        let offset = Point::new(self.margin, self.margin).sub_point(content_bounds.min_point());
        debug!(
            width = svg_size.width(),
            height = svg_size.height();
            "Calculated SVG dimensions"
        );

        let mut output = LayeredOutput::new();
        output.merge(self.render_background(svg_size));
        for primitive in scene.primitives() {
            let rendered = match primitive {
                Primitive::Fill(fill) => self.render_fill(fill, offset)?,
                Primitive::Stroke(stroke) => self.render_stroke(stroke, offset),
                Primitive::Label(label) => self.render_label(label, offset),
            };
            output.merge(rendered);
        }

        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        Ok(output
            .render()
            .into_iter()
            .fold(doc, |doc, group| doc.add(group)))
    }

    fn to_screen(&self, point: Point) -> Point {
        Point::new(point.x(), -point.y()).scale(self.pixels_per_unit)
    }

    fn screen_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&point| self.to_screen(point)).collect()
    }

    fn label_definition(&self, label: &Label) -> TextDefinition {
        let mut definition = self.text.clone();
        definition.set_font_size(label.font_size());
        definition
    }

    /// Screen-space box of every vertex and every label.
    fn calculate_scene_bounds(&self, scene: &Scene) -> Bounds {
        let mut bounds: Option<Bounds> = None;
        let mut include = |other: Bounds| {
            bounds = Some(match bounds {
                Some(current) => current.merge(&other),
                None => other,
            });
        };

        for primitive in scene.primitives() {
            match primitive {
                Primitive::Fill(fill) => {
                    if let Some(other) = Bounds::from_points(self.screen_points(fill.points())) {
                        include(other);
                    }
                }
                Primitive::Stroke(stroke) => {
                    if let Some(other) = Bounds::from_points(self.screen_points(stroke.points()))
                    {
                        include(other);
                    }
                }
                Primitive::Label(label) => {
                    let definition = self.label_definition(label);
                    let content = label.text();
                    let text = Text::new(&definition, &content)
                        .with_anchor(label.text_anchor())
                        .with_rotation(-label.rotation());
                    include(text.bounds(self.to_screen(label.anchor())));
                }
            }
        }

        bounds.unwrap_or_default()
    }

    fn render_background(&self, size: Size) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if let Some(color) = &self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", color)
                .set("fill-opacity", color.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }
        output
    }

    fn render_fill(&self, fill: &FillPolygon, offset: Point) -> Result<LayeredOutput, Error> {
        let color = self
            .palette
            .get(fill.colour_index())
            .ok_or_else(|| Error::Render(format!("no colour for index {}", fill.colour_index())))?;
        let polygon = Polygon::new(self.screen_points(fill.points())).with_fill(*color);
        Ok(polygon.render_to_layers(offset))
    }

    fn render_stroke(&self, stroke: &Stroke, offset: Point) -> LayeredOutput {
        let (definition, layer) = match stroke.kind() {
            StrokeKind::Separator => (&self.separator, RenderLayer::Separator),
            _ => (&self.outline, RenderLayer::Outline),
        };
        Polyline::new(self.screen_points(stroke.points()), definition.clone())
            .closed(stroke.is_closed())
            .with_layer(layer)
            .render_to_layers(offset)
    }

    fn render_label(&self, label: &Label, offset: Point) -> LayeredOutput {
        let definition = self.label_definition(label);
        let content = label.text();
        // Labels rotate counter-clockwise in diagram space, SVG rotates
        // clockwise on screen.
        Text::new(&definition, &content)
            .with_anchor(label.text_anchor())
            .with_rotation(-label.rotation())
            .render_to_layers(self.to_screen(label.anchor()).add_point(offset))
    }
}

impl Exporter for Svg {
    fn export_scene(&self, scene: &Scene, writer: &mut dyn io::Write) -> Result<(), Error> {
        let doc = self.render_scene(scene)?;
        svg::write(writer, &doc)?;
        info!(primitives = scene.primitives().len(); "SVG exported");
        Ok(())
    }
}
