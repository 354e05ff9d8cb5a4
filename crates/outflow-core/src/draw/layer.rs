//! Layer-based rendering system for SVG output.
//!
//! Drawables specify which z-order layer their SVG elements belong to.
//! Sorting is stable, so nodes within one layer keep the order in which they
//! were added. The Sankey renderer relies on this: fill polygons are painted
//! in the order the layout pass produced them.
//!
//! # Example
//!
//! ```
//! # use outflow_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Polygon, Text};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("Fuel")));
//! output.add_to_layer(RenderLayer::Fill, Box::new(Polygon::new().set("fill", "red")));
//!
//! // Fill renders before Text regardless of insertion order
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in variant declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Diagram background
    Background,
    /// Colour-filled band and arrow regions
    Fill,
    /// Arrow outlines, arcs and arrowheads
    Outline,
    /// Dashed section dividers
    Separator,
    /// Flow labels
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Fill => "fill",
            Self::Outline => "outline",
            Self::Separator => "separator",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer, after any nodes already there.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer, in bottom-to-top order.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps paint order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
