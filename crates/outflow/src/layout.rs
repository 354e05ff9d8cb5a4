//! Geometric layout of a Sankey diagram.
//!
//! Layout is one linear pass over the flows, in the order the geometry
//! depends on:
//!
//! 1. inputs, creating the band list ([`inputs`])
//! 2. each loss with its band fill ([`losses`], [`fill`]), followed by a
//!    separator when requested ([`separator`])
//! 3. the output arrow and the last band fill ([`output`])
//!
//! Every step takes the [`cursor::BandCursor`] left by the previous one and
//! returns the next. Primitives are appended to a [`SceneBuilder`] in paint
//! order.

mod arc;
mod cursor;
mod fill;
mod inputs;
mod losses;
mod output;
mod separator;

use log::{debug, info};

use crate::{
    config::LayoutConfig,
    fraction::Fractions,
    scene::{FillPolygon, Label, Primitive, Scene, Stroke},
    semantic::SankeyDiagram,
    validate::{ValidationError, validate},
};

/// Read-only inputs shared by every layout step.
struct LayoutContext<'a> {
    diagram: &'a SankeyDiagram,
    fractions: &'a Fractions,
    config: &'a LayoutConfig,
}

/// Primitives emitted so far, in paint order.
#[derive(Debug, Default)]
struct SceneBuilder {
    primitives: Vec<Primitive>,
}

impl SceneBuilder {
    fn fill(&mut self, polygon: FillPolygon) {
        self.primitives.push(Primitive::Fill(polygon));
    }

    fn stroke(&mut self, stroke: Stroke) {
        self.primitives.push(Primitive::Stroke(stroke));
    }

    fn label(&mut self, label: Label) {
        self.primitives.push(Primitive::Label(label));
    }

    fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }
}

/// Validates `diagram` and lays it out.
///
/// # Errors
///
/// Returns the first [`ValidationError`]; no scene is produced then.
pub fn layout(diagram: &SankeyDiagram, config: &LayoutConfig) -> Result<Scene, ValidationError> {
    validate(diagram)?;

    let fractions = Fractions::new(diagram.flows());
    let ctx = LayoutContext {
        diagram,
        fractions: &fractions,
        config,
    };
    let mut scene = SceneBuilder::default();

    let mut cursor = inputs::draw_inputs(&ctx, &mut scene);
    for index in 0..fractions.losses().len() {
        cursor = losses::draw_loss(&ctx, cursor, index, &mut scene);
        if diagram.separators().contains(&index) {
            debug!(index; "Drawing separator");
            separator::draw_separator(&ctx, &cursor, index, &mut scene);
        }
    }
    let bands = output::draw_output(&ctx, cursor, &mut scene);

    let primitives = scene.into_primitives();
    info!(primitives = primitives.len(), bands = bands.len(); "Layout calculated");
    Ok(Scene::new(primitives, bands, diagram.flows().output()))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use outflow_core::color::Rgb;

    use super::*;
    use crate::scene::{FillKind, FlowRef, StrokeKind};

    fn diagram(inputs: Vec<f32>, losses: Vec<f32>) -> SankeyDiagram {
        let labels = (0..inputs.len() + losses.len() + 1)
            .map(|i| format!("flow {i}"))
            .collect();
        let colours = vec![Rgb::new(0.2, 0.4, 0.6); losses.len() + 1];
        SankeyDiagram::new(inputs, losses, "MW", labels, colours)
    }

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn test_invalid_diagram_produces_no_scene() {
        let result = layout(&diagram(vec![10.0], vec![15.0]), &config());
        assert!(matches!(result, Err(ValidationError::UnbalancedFlow { .. })));
    }

    #[test]
    fn test_single_input_no_losses() {
        let scene = layout(&diagram(vec![50.0], Vec::new()), &config()).unwrap();
        assert_eq!(scene.bands().len(), 1);
        assert_approx_eq!(f32, scene.output_magnitude(), 50.0);

        let band_fills: Vec<_> = scene
            .fills()
            .filter(|fill| matches!(fill.kind(), FillKind::Band(_)))
            .collect();
        assert_eq!(band_fills.len(), 1);
        assert_eq!(band_fills[0].owner(), FlowRef::Output);
        assert_eq!(band_fills[0].colour_index(), 0);
    }

    #[test]
    fn test_primary_band_spans_full_height() {
        let scene = layout(&diagram(vec![50.0], vec![5.0]), &config()).unwrap();
        let band = scene.bands()[0];
        assert_approx_eq!(f32, band.upper(), 1.0);
        assert_approx_eq!(f32, band.lower(), 0.0);
        assert_approx_eq!(f32, band.left(), 0.0);
    }

    #[test]
    fn test_secondary_band_stacks_below() {
        let scene = layout(&diagram(vec![60.0, 40.0], Vec::new()), &config()).unwrap();
        let bands = scene.bands();
        assert_approx_eq!(f32, bands[1].upper(), 0.0);
        assert_approx_eq!(f32, bands[1].lower(), -0.4, epsilon = 1e-6);
        assert!(bands[1].left() > bands[0].left());
    }

    #[test]
    fn test_negligible_input_keeps_empty_band() {
        let scene = layout(&diagram(vec![60.0, 0.0, 40.0], Vec::new()), &config()).unwrap();
        let bands = scene.bands();
        assert_eq!(bands.len(), 3);
        assert!(!bands[1].is_drawn());
        assert_approx_eq!(f32, bands[1].height(), 0.0);
        assert!(scene.strokes().all(|stroke| stroke.owner() != Some(FlowRef::Input(1))));
        assert!(scene.labels().all(|label| label.owner() != FlowRef::Input(1)));
    }

    #[test]
    fn test_negligible_loss_is_skipped() {
        let scene = layout(&diagram(vec![10.0], vec![0.0, 1.0]), &config()).unwrap();
        assert!(scene.fills().all(|fill| fill.owner() != FlowRef::Loss(0)));
        assert!(scene.fills().any(|fill| fill.owner() == FlowRef::Loss(1)));
    }

    #[test]
    fn test_separator_after_negligible_loss_is_still_drawn() {
        let diagram = diagram(vec![10.0], vec![0.0]).with_separators([0]);
        let scene = layout(&diagram, &config()).unwrap();
        let separators: Vec<_> = scene
            .strokes()
            .filter(|stroke| stroke.kind() == StrokeKind::Separator)
            .collect();
        assert_eq!(separators.len(), 1);
    }

    #[test]
    fn test_separator_anchor_mirrors_without_secondary_inputs() {
        let single = diagram(vec![10.0], vec![1.0]).with_separators([0]);
        let double = diagram(vec![10.0, 5.0], vec![1.0]).with_separators([0]);

        for (diagram, sign) in [(single, -1.0), (double, 1.0)] {
            let scene = layout(&diagram, &config()).unwrap();
            let separator = scene
                .strokes()
                .find(|stroke| stroke.kind() == StrokeKind::Separator)
                .unwrap();
            let [start, end] = separator.points() else {
                panic!("separator should be a single segment");
            };
            assert_approx_eq!(f32, start.y(), end.y());
            assert_approx_eq!(f32, end.x(), sign * 0.1 * start.x(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_loss_label_is_rotated_above_tip() {
        let scene = layout(&diagram(vec![10.0], vec![2.0]), &config()).unwrap();
        let label = scene
            .labels()
            .find(|label| label.owner() == FlowRef::Loss(0))
            .unwrap();
        assert_approx_eq!(f32, label.rotation(), 90.0);
        assert!(label.anchor().y() > 1.0);
    }

    #[test]
    fn test_arc_sample_count_follows_config() {
        let config = LayoutConfig::default().with_arc_samples(12);
        let scene = layout(&diagram(vec![10.0], vec![2.0]), &config).unwrap();
        let arc = scene
            .strokes()
            .find(|stroke| stroke.kind() == StrokeKind::InnerArc)
            .unwrap();
        assert_eq!(arc.points().len(), 12);
    }
}
