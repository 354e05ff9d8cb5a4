//! Drawable Components for Diagram Rendering
//!
//! This module provides drawable abstractions for rendering Sankey scene
//! primitives. All drawable components implement the [`Drawable`] trait, which
//! provides a consistent interface for rendering to layered SVG output and
//! calculating size.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically ordered
//! during final SVG generation. Within a layer, nodes keep insertion order.
mod layer;
mod shape;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shape::{Polygon, Polyline};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for drawable diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// # Arguments
    ///
    /// * `position` - The position where this drawable should be rendered. Shapes
    ///   built from absolute vertices treat it as a translation.
    ///
    /// # Returns
    ///
    /// A [`LayeredOutput`] containing the SVG nodes organized by layer.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
