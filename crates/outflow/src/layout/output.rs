//! The output arrow and the final body fill.

use log::debug;

use outflow_core::{draw::TextAnchor, geometry::Point};

use super::{
    LayoutContext, SceneBuilder,
    cursor::BandCursor,
    fill::{BandFillEngine, band_outline},
};
use crate::{
    label::{LabelRole, LabelStyle},
    scene::{Band, FillKind, FillPolygon, FlowRef, Label, Stroke, StrokeKind},
};

/// Head length relative to output thickness.
const HEAD_LENGTH: f32 = 0.5;
/// Wing overhang past the body on each side, relative to output thickness.
const WING: f32 = 0.2;
/// Depth of the back notch relative to head length.
const NOTCH: f32 = 0.25;

/// Closes the diagram with the output arrow and returns the final bands.
pub(super) fn draw_output(
    ctx: &LayoutContext<'_>,
    cursor: BandCursor,
    scene: &mut SceneBuilder,
) -> Vec<Band> {
    let config = ctx.config;
    let depth = config.arrow_depth();
    let owner = FlowRef::Output;
    let colour = ctx.fractions.losses().len();

    let x_end = cursor.pos_top().max(cursor.pos_bot() + depth) + config.output_gap();
    let hi = cursor.lim_top();
    let lo = cursor.bands().last_lower();
    let mid = (hi + lo) / 2.0;
    let thickness = hi - lo;

    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        None,
        vec![Point::new(cursor.top_edge(), hi), Point::new(x_end, hi)],
    ));
    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        None,
        vec![Point::new(cursor.pos_bot(), lo), Point::new(x_end, lo)],
    ));

    let head_length = depth.max(HEAD_LENGTH * thickness);
    let wing = WING * thickness;
    let notch = NOTCH * head_length;
    let right = x_end + notch;

    let bands = cursor.bands();
    if bands.len() == 1 {
        // Single input: one polygon following the notch
        scene.fill(FillPolygon::new(
            band_outline(bands.band(0), lo, hi, right, depth),
            colour,
            owner,
            FillKind::Band(0),
        ));
    } else {
        let engine = BandFillEngine::new(bands.as_slice(), depth, lo, right);
        for slice in engine.fill(hi) {
            let kind = FillKind::Band(slice.band());
            scene.fill(FillPolygon::new(slice.into_points(), colour, owner, kind));
        }
    }

    let tip = Point::new(x_end + head_length, mid);
    let dart = vec![
        Point::new(x_end, hi + wing),
        tip,
        Point::new(x_end, lo - wing),
        Point::new(right, mid),
    ];
    scene.fill(FillPolygon::new(dart.clone(), colour, owner, FillKind::Arrow));
    scene.stroke(Stroke::new(StrokeKind::Arrowhead, Some(owner), dart).closed());

    let diagram = ctx.diagram;
    let fraction = ctx.fractions.output();
    let style = LabelStyle::for_fraction(fraction, LabelRole::Output);
    let lines = style.lines(
        diagram.output_label(),
        diagram.flows().output(),
        diagram.unit(),
        fraction,
    );
    let anchor = tip.add_point(Point::new(config.label_gap(), 0.0));
    scene.label(Label::new(
        lines,
        anchor,
        style.font_size(),
        TextAnchor::Start,
        owner,
    ));

    debug!(x_end, thickness; "Output laid out");
    cursor.into_bands()
}
