//! Semantic model of a Sankey diagram.
//!
//! A [`SankeyDiagram`] is the caller-facing description: flow magnitudes,
//! display strings and colours. It carries no geometry; layout derives
//! everything from it in one pass.

use std::collections::BTreeSet;

use outflow_core::color::Rgb;

/// Ordered flow magnitudes of one diagram.
///
/// The first input is the primary input. The single output is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSet {
    inputs: Vec<f32>,
    losses: Vec<f32>,
}

impl FlowSet {
    pub fn new(inputs: Vec<f32>, losses: Vec<f32>) -> Self {
        Self { inputs, losses }
    }

    pub fn inputs(&self) -> &[f32] {
        &self.inputs
    }

    pub fn losses(&self) -> &[f32] {
        &self.losses
    }

    /// Sum of all input magnitudes.
    pub fn total_input(&self) -> f32 {
        self.inputs.iter().sum()
    }

    /// Sum of all loss magnitudes.
    pub fn total_loss(&self) -> f32 {
        self.losses.iter().sum()
    }

    /// Net output magnitude: total input minus total loss.
    ///
    /// # Examples
    ///
    /// ```
    /// # use outflow::semantic::FlowSet;
    /// let flows = FlowSet::new(vec![75.0, 32.0], vec![10.0, 5.0, 2.8]);
    /// assert!((flows.output() - 89.2).abs() < 1e-4);
    /// ```
    pub fn output(&self) -> f32 {
        self.total_input() - self.total_loss()
    }
}

/// A complete single-direction Sankey diagram description.
///
/// `labels` names the inputs, then the losses, then the output. `colours`
/// holds one colour per loss followed by the output colour; extra colours
/// are ignored.
///
/// # Examples
///
/// ```
/// # use outflow::semantic::SankeyDiagram;
/// # use outflow_core::color::Rgb;
/// let diagram = SankeyDiagram::new(
///     vec![100.0],
///     vec![20.0],
///     "MW",
///     vec!["Fuel".into(), "Stack".into(), "Power".into()],
///     vec![Rgb::new(0.8, 0.2, 0.1), Rgb::new(0.2, 0.4, 0.8)],
/// )
/// .with_separators([0]);
///
/// assert_eq!(diagram.flows().losses().len(), 1);
/// assert!(diagram.separators().contains(&0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyDiagram {
    flows: FlowSet,
    unit: String,
    labels: Vec<String>,
    colours: Vec<Rgb>,
    separators: BTreeSet<usize>,
}

impl SankeyDiagram {
    pub fn new(
        inputs: Vec<f32>,
        losses: Vec<f32>,
        unit: impl Into<String>,
        labels: Vec<String>,
        colours: Vec<Rgb>,
    ) -> Self {
        Self {
            flows: FlowSet::new(inputs, losses),
            unit: unit.into(),
            labels,
            colours,
            separators: BTreeSet::new(),
        }
    }

    /// Draw a dashed divider after each listed loss index.
    pub fn with_separators(mut self, separators: impl IntoIterator<Item = usize>) -> Self {
        self.separators = separators.into_iter().collect();
        self
    }

    pub fn flows(&self) -> &FlowSet {
        &self.flows
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn colours(&self) -> &[Rgb] {
        &self.colours
    }

    pub fn separators(&self) -> &BTreeSet<usize> {
        &self.separators
    }

    /// Label text of input `index`, empty when labels are short.
    pub fn input_label(&self, index: usize) -> &str {
        self.label_at(index)
    }

    /// Label text of loss `index`.
    pub fn loss_label(&self, index: usize) -> &str {
        self.label_at(self.flows.inputs.len() + index)
    }

    /// Label text of the output.
    pub fn output_label(&self) -> &str {
        self.label_at(self.flows.inputs.len() + self.flows.losses.len())
    }

    fn label_at(&self, index: usize) -> &str {
        self.labels.get(index).map(String::as_str).unwrap_or_default()
    }
}
