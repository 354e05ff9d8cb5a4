//! Outflow - single-direction Sankey diagrams.
//!
//! Flows enter on the left as one or more input arrows, losses branch
//! upward off the top as curved arrows, and whatever is left exits on the
//! right as the output arrow. Arrow thickness is proportional to flow
//! magnitude, normalised so the total input is one unit.
//!
//! The pipeline is validate, layout into a [`scene::Scene`], then export to
//! SVG.

pub mod config;
pub mod scene;
pub mod semantic;

mod error;
mod export;
mod fraction;
mod label;
mod layout;
mod validate;

pub use outflow_core::{color, draw, geometry};

pub use error::OutflowError;
pub use fraction::Fractions;
pub use label::{LabelRole, LabelStyle, LabelTier};
pub use layout::layout;
pub use validate::{FlowRole, ValidationError, validate};

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use scene::Scene;
use semantic::SankeyDiagram;

/// Builder for laying out and rendering Sankey diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use outflow::{DiagramBuilder, color::Rgb, config::AppConfig, semantic::SankeyDiagram};
///
/// let diagram = SankeyDiagram::new(
///     vec![75.0, 32.0],
///     vec![10.0, 5.0, 2.8],
///     "kW",
///     ["Fuel", "Air", "Stack", "Reformer", "Pump", "Power"]
///         .map(String::from)
///         .to_vec(),
///     vec![Rgb::new(0.8, 0.3, 0.2); 4],
/// )
/// .with_separators([1]);
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let svg = builder.render_svg(&diagram).expect("Failed to render");
/// println!("{svg}");
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Validate a diagram and compute its geometry.
    ///
    /// # Errors
    ///
    /// Returns [`OutflowError::Config`] if the configuration is unusable and
    /// [`OutflowError::Validation`] if the diagram is rejected.
    pub fn layout(&self, diagram: &SankeyDiagram) -> Result<Scene, OutflowError> {
        self.config.validate().map_err(OutflowError::Config)?;

        info!(
            inputs = diagram.flows().inputs().len(),
            losses = diagram.flows().losses().len();
            "Laying out diagram"
        );
        let scene = layout::layout(diagram, self.config.layout())?;
        trace!(scene:?; "Laid out scene");

        Ok(scene)
    }

    /// Lay out a diagram and render it to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DiagramBuilder::layout`], plus
    /// [`OutflowError::Export`] for rendering failures.
    pub fn render_svg(&self, diagram: &SankeyDiagram) -> Result<String, OutflowError> {
        let scene = self.layout(diagram)?;

        let svg_exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .with_palette(diagram.colours())
            .build()?;

        let mut buffer = Vec::new();
        svg_exporter.export_scene(&scene, &mut buffer)?;
        debug!(bytes = buffer.len(); "SVG document written");

        let svg = String::from_utf8(buffer)
            .map_err(|err| export::Error::Render(format!("SVG is not valid UTF-8: {err}")))?;

        info!("SVG rendered successfully");
        Ok(svg)
    }
}
