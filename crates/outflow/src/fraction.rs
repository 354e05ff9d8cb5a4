//! Normalisation of flow magnitudes.
//!
//! Every magnitude is divided by the total input, so the diagram's vertical
//! extent is exactly one unit: 100% of the flow entering it.

use crate::semantic::FlowSet;

/// Flows below this fraction are treated as absent and never drawn.
pub const NEGLIGIBLE_FRACTION: f32 = f32::EPSILON;

/// Returns `true` if a fraction is too small to draw.
pub fn is_negligible(fraction: f32) -> bool {
    fraction < NEGLIGIBLE_FRACTION
}

/// Flow fractions, all sharing the total input as normaliser.
///
/// # Examples
///
/// ```
/// # use outflow::Fractions;
/// # use outflow::semantic::FlowSet;
/// let fractions = Fractions::new(&FlowSet::new(vec![60.0, 40.0], vec![25.0]));
/// assert_eq!(fractions.inputs(), &[0.6, 0.4]);
/// assert_eq!(fractions.losses(), &[0.25]);
/// assert_eq!(fractions.output(), 0.75);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fractions {
    inputs: Vec<f32>,
    losses: Vec<f32>,
    output: f32,
}

impl Fractions {
    /// Computes fractions of a validated flow set (non-zero total input).
    pub fn new(flows: &FlowSet) -> Self {
        let total = flows.total_input();
        let fraction = |value: &f32| value / total;
        Self {
            inputs: flows.inputs().iter().map(fraction).collect(),
            losses: flows.losses().iter().map(fraction).collect(),
            output: flows.output() / total,
        }
    }

    pub fn inputs(&self) -> &[f32] {
        &self.inputs
    }

    pub fn losses(&self) -> &[f32] {
        &self.losses
    }

    pub fn output(&self) -> f32 {
        self.output
    }

    /// Fraction of the primary input, the height of the topmost band.
    pub fn primary(&self) -> f32 {
        self.inputs[0]
    }

    /// Returns `true` if any input after the primary one is drawn.
    pub fn has_secondary_inputs(&self) -> bool {
        self.inputs.iter().skip(1).any(|&fr| !is_negligible(fr))
    }
}
