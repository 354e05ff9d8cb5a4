//! Dashed section dividers between losses.

use outflow_core::geometry::Point;

use super::{LayoutContext, SceneBuilder, cursor::BandCursor};
use crate::scene::{FlowRef, Stroke, StrokeKind};

/// Anchor offset relative to the current top position.
const ANCHOR_RATIO: f32 = 0.1;

/// Draws a divider at the current top after loss `index`. The cursor is
/// only read.
///
/// The line runs back from `pos_top` to `0.1 * pos_top` when secondary
/// inputs are present, otherwise to the mirror point `-0.1 * pos_top`
/// behind the inlet.
pub(super) fn draw_separator(
    ctx: &LayoutContext<'_>,
    cursor: &BandCursor,
    index: usize,
    scene: &mut SceneBuilder,
) {
    let pos_top = cursor.pos_top();
    let y = cursor.lim_top();
    let anchor = if ctx.fractions.has_secondary_inputs() {
        ANCHOR_RATIO * pos_top
    } else {
        -ANCHOR_RATIO * pos_top
    };

    scene.stroke(Stroke::new(
        StrokeKind::Separator,
        Some(FlowRef::Loss(index)),
        vec![Point::new(pos_top, y), Point::new(anchor, y)],
    ));
}
