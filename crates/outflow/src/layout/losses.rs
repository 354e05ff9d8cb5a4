//! Loss arrows branching upward off the top edge.
//!
//! Each loss is one fused step: the body slice it drains is filled band by
//! band, then the arrow bends up through a quarter turn and ends in a
//! triangular head. The cursor only advances once both are emitted.

use std::f32::consts::FRAC_PI_2;

use log::{debug, trace};

use outflow_core::{draw::TextAnchor, geometry::Point};

use super::{
    LayoutContext, SceneBuilder,
    arc::{ArcPair, BendRadii},
    cursor::BandCursor,
    fill::BandFillEngine,
};
use crate::{
    fraction::is_negligible,
    label::{LabelRole, LabelStyle},
    scene::{FillKind, FillPolygon, FlowRef, Label, Stroke, StrokeKind},
};

/// Overhang of a loss arrowhead past its stem on each side, relative to the
/// loss thickness.
const HEAD_OVERHANG: f32 = 0.2;

/// Draws loss `index` at the cursor and returns the advanced cursor.
/// Negligible losses leave the cursor unchanged.
pub(super) fn draw_loss(
    ctx: &LayoutContext<'_>,
    cursor: BandCursor,
    index: usize,
    scene: &mut SceneBuilder,
) -> BandCursor {
    let width = ctx.fractions.losses()[index];
    if is_negligible(width) {
        debug!(index; "Skipping negligible loss");
        return cursor;
    }

    let config = ctx.config;
    let depth = config.arrow_depth();
    let owner = FlowRef::Loss(index);
    let x0 = cursor.pos_top();
    let y0 = cursor.lim_top();

    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        None,
        vec![Point::new(cursor.top_edge(), y0), Point::new(x0, y0)],
    ));

    let engine = BandFillEngine::new(cursor.bands().as_slice(), depth, y0 - width, x0);
    for slice in engine.fill(y0) {
        let kind = FillKind::Band(slice.band());
        scene.fill(FillPolygon::new(slice.into_points(), index, owner, kind));
    }

    let radii = BendRadii::for_width(width, config.min_bend_radius());
    let center = Point::new(x0, y0 + radii.inner());
    let arcs = ArcPair::new(center, radii, -FRAC_PI_2, FRAC_PI_2, config.arc_samples());

    let stem_base = center.y();
    let stem_top = stem_base + config.loss_stem();
    let inner_x = x0 + radii.inner();
    let outer_x = x0 + radii.outer();
    let overhang = HEAD_OVERHANG * width;
    let tip = Point::new(
        (inner_x + outer_x) / 2.0,
        stem_top + depth.max(width / 2.0),
    );
    let head = vec![
        Point::new(inner_x - overhang, stem_top),
        tip,
        Point::new(outer_x + overhang, stem_top),
    ];

    let mut body = arcs.inner().to_vec();
    body.push(Point::new(inner_x, stem_top));
    body.extend(head.iter().copied());
    body.push(Point::new(outer_x, stem_top));
    body.extend(arcs.outer().iter().rev().copied());
    scene.fill(FillPolygon::new(body, index, owner, FillKind::Arrow));

    let owner_ref = Some(owner);
    scene.stroke(Stroke::new(
        StrokeKind::InnerArc,
        owner_ref,
        arcs.inner().to_vec(),
    ));
    scene.stroke(Stroke::new(
        StrokeKind::OuterArc,
        owner_ref,
        arcs.outer().to_vec(),
    ));
    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        owner_ref,
        vec![Point::new(inner_x, stem_base), Point::new(inner_x, stem_top)],
    ));
    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        owner_ref,
        vec![Point::new(outer_x, stem_base), Point::new(outer_x, stem_top)],
    ));
    scene.stroke(Stroke::new(StrokeKind::Arrowhead, owner_ref, head).closed());

    let diagram = ctx.diagram;
    let style = LabelStyle::for_fraction(width, LabelRole::Loss);
    let lines = style.lines(
        diagram.loss_label(index),
        diagram.flows().losses()[index],
        diagram.unit(),
        width,
    );
    let anchor = tip.add_point(Point::new(0.0, config.label_gap()));
    scene.label(
        Label::new(lines, anchor, style.font_size(), TextAnchor::Start, owner).with_rotation(90.0),
    );

    let next_pos_top = x0 + radii.outer() + config.loss_gap();
    trace!(index, x0, lim_top = y0, width; "Loss laid out");
    cursor.after_loss(width, x0, next_pos_top)
}
