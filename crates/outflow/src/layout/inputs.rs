//! Input arrows and the band list.
//!
//! The primary input enters horizontally from the left. Every further input
//! joins from below-left through a 45 degree bend and stacks its band under
//! the previous one.

use std::f32::consts::{FRAC_PI_4, PI};

use log::debug;

use outflow_core::{draw::TextAnchor, geometry::Point};

use super::{
    LayoutContext, SceneBuilder,
    arc::{ArcPair, BendRadii, SECONDARY_SWEEP, SIN_FRAC_PI_4},
    cursor::{BandCursor, BandList},
};
use crate::{
    fraction::is_negligible,
    label::{LabelRole, LabelStyle},
    scene::{Band, FlowRef, Label, Stroke, StrokeKind},
};

/// Start angle of a secondary bend: the arc begins heading up and to the
/// right and ends heading right.
const SECONDARY_START: f32 = 3.0 * PI / 4.0;

/// Draws every input and returns the cursor positioned for the first loss.
pub(super) fn draw_inputs(ctx: &LayoutContext<'_>, scene: &mut SceneBuilder) -> BandCursor {
    let config = ctx.config;
    let fractions = ctx.fractions.inputs();
    let primary = fractions[0];

    draw_primary(ctx, primary, scene);

    let mut cursor = BandCursor::new(
        0.0,
        0.0,
        primary,
        -config.input_length(),
        BandList::with_capacity(fractions.len()),
    )
    .with_band(Band::new(primary, 0.0, 0.0, !is_negligible(primary)), 0.0);

    for (index, &fraction) in fractions.iter().enumerate().skip(1) {
        cursor = draw_secondary(ctx, cursor, index, fraction, scene);
    }

    let pos_top = cursor.pos_bot() + config.arrow_depth() + config.loss_gap();
    debug!(bands = cursor.bands().len(), pos_top; "Inputs laid out");
    cursor.with_pos_top(pos_top)
}

/// Bottom shaft, arrowhead and label of the primary input. The top shaft
/// is part of the first top-edge run.
fn draw_primary(ctx: &LayoutContext<'_>, fraction: f32, scene: &mut SceneBuilder) {
    if is_negligible(fraction) {
        return;
    }
    let config = ctx.config;
    let owner = Some(FlowRef::Input(0));
    let mid = fraction / 2.0;

    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        owner,
        vec![Point::new(-config.input_length(), 0.0), Point::new(0.0, 0.0)],
    ));
    scene.stroke(
        Stroke::new(
            StrokeKind::Arrowhead,
            owner,
            vec![
                Point::new(0.0, fraction),
                Point::new(config.arrow_depth(), mid),
                Point::new(0.0, 0.0),
            ],
        )
        .closed(),
    );

    let anchor = Point::new(-config.input_length() - config.label_gap(), mid);
    scene.label(input_label(ctx, 0, fraction, anchor));
}

/// Joins input `index` below the previous band, or reserves an empty band
/// when the input is negligible.
fn draw_secondary(
    ctx: &LayoutContext<'_>,
    cursor: BandCursor,
    index: usize,
    fraction: f32,
    scene: &mut SceneBuilder,
) -> BandCursor {
    let hi = cursor.bands().last_lower();
    let pos_bot = cursor.pos_bot();
    if is_negligible(fraction) {
        debug!(index; "Skipping negligible input");
        return cursor.with_band(Band::new(hi, hi, pos_bot, false), pos_bot);
    }

    let config = ctx.config;
    let depth = config.arrow_depth();
    let owner = Some(FlowRef::Input(index));
    let lo = hi - fraction;
    let mid = (hi + lo) / 2.0;

    let radii = BendRadii::for_width(fraction, config.min_bend_radius());
    let cx = pos_bot + depth + radii.outer() * SIN_FRAC_PI_4;
    let center = Point::new(cx, lo - radii.inner());
    let arcs = ArcPair::new(
        center,
        radii,
        SECONDARY_START,
        -SECONDARY_SWEEP,
        config.arc_samples(),
    );

    // Straight tail leading into the bend, against the flow direction
    let (sin, cos) = (PI + FRAC_PI_4).sin_cos();
    let tail = Point::new(cos, sin).scale(config.secondary_tail());
    let inner_start = arcs.inner()[0];
    let outer_start = arcs.outer()[0];
    let inner_end = inner_start.add_point(tail);
    let outer_end = outer_start.add_point(tail);

    // Exposed bottom of the band above, up to the new arrowhead
    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        None,
        vec![Point::new(pos_bot, hi), Point::new(cx, hi)],
    ));
    scene.stroke(Stroke::new(
        StrokeKind::InnerArc,
        owner,
        arcs.inner().to_vec(),
    ));
    scene.stroke(Stroke::new(
        StrokeKind::OuterArc,
        owner,
        arcs.outer().to_vec(),
    ));
    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        owner,
        vec![inner_end, inner_start],
    ));
    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        owner,
        vec![outer_end, outer_start],
    ));
    scene.stroke(Stroke::new(
        StrokeKind::Edge,
        owner,
        vec![inner_end, outer_end],
    ));
    scene.stroke(
        Stroke::new(
            StrokeKind::Arrowhead,
            owner,
            vec![
                Point::new(cx, hi),
                Point::new(cx + depth, mid),
                Point::new(cx, lo),
            ],
        )
        .closed(),
    );

    let anchor = inner_end
        .midpoint(outer_end)
        .sub_point(Point::new(config.label_gap(), 0.0));
    scene.label(input_label(ctx, index, fraction, anchor));

    debug!(index, upper = hi, lower = lo, left = cx; "Band created");
    cursor.with_band(Band::new(hi, lo, cx, true), cx)
}

fn input_label(ctx: &LayoutContext<'_>, index: usize, fraction: f32, anchor: Point) -> Label {
    let diagram = ctx.diagram;
    let style = LabelStyle::for_fraction(fraction, LabelRole::Input);
    let lines = style.lines(
        diagram.input_label(index),
        diagram.flows().inputs()[index],
        diagram.unit(),
        fraction,
    );
    Label::new(
        lines,
        anchor,
        style.font_size(),
        TextAnchor::End,
        FlowRef::Input(index),
    )
}
