//! Input validation.
//!
//! Every check runs before any layout state exists; a failure aborts the
//! whole call and no partial scene is produced. Geometry code downstream
//! assumes validated input and performs no further checks.

use std::fmt;

use log::debug;
use thiserror::Error;

use crate::semantic::SankeyDiagram;

/// Which list a rejected flow magnitude came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRole {
    Input,
    Loss,
}

impl fmt::Display for FlowRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

/// Reasons a diagram cannot be laid out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("diagram has no inputs")]
    NoInputs,

    #[error("{role} {index} is not a finite number")]
    NonFiniteFlow { role: FlowRole, index: usize },

    #[error("sum of {role}s is too large to represent")]
    NonFiniteTotal { role: FlowRole },

    #[error("{role} {index} is negative ({value})")]
    NegativeFlow {
        role: FlowRole,
        index: usize,
        value: f32,
    },

    #[error("losses ({losses}) must be strictly less than inputs ({inputs})")]
    UnbalancedFlow { inputs: f32, losses: f32 },

    #[error("{supplied} colour(s) supplied, {required} required (one per loss plus the output)")]
    InsufficientColours { required: usize, supplied: usize },

    #[error("colour {index} has a channel outside [0, 1]")]
    ColourOutOfRange { index: usize },

    #[error("{supplied} label(s) supplied, expected {expected} (inputs, losses, then output)")]
    LabelCountMismatch { expected: usize, supplied: usize },

    #[error("separator index {index} does not name one of the {losses} loss(es)")]
    SeparatorOutOfRange { index: usize, losses: usize },
}

/// Checks a diagram, reporting the first violated rule.
///
/// Checks run in a fixed order: presence of inputs, finiteness, sign,
/// finiteness of the totals, balance, colour count, colour range, label
/// count, separator indices. An empty label list skips the label check.
/// Sign is checked before balance so `inputs = [-1]` is reported as a
/// negative flow.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failing check.
///
/// # Examples
///
/// ```
/// # use outflow::{validate, ValidationError};
/// # use outflow::semantic::SankeyDiagram;
/// # use outflow_core::color::Rgb;
/// let diagram = SankeyDiagram::new(
///     vec![10.0],
///     vec![15.0],
///     "W",
///     vec!["In".into(), "Loss".into(), "Out".into()],
///     vec![Rgb::new(1.0, 0.0, 0.0); 2],
/// );
/// assert!(matches!(validate(&diagram), Err(ValidationError::UnbalancedFlow { .. })));
/// ```
pub fn validate(diagram: &SankeyDiagram) -> Result<(), ValidationError> {
    let flows = diagram.flows();
    let inputs = flows.inputs();
    let losses = flows.losses();

    if inputs.is_empty() {
        return Err(ValidationError::NoInputs);
    }

    let tagged = || {
        inputs
            .iter()
            .enumerate()
            .map(|(index, value)| (FlowRole::Input, index, *value))
            .chain(
                losses
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (FlowRole::Loss, index, *value)),
            )
    };

    if let Some((role, index, _)) = tagged().find(|(_, _, value)| !value.is_finite()) {
        return Err(ValidationError::NonFiniteFlow { role, index });
    }

    if let Some((role, index, value)) = tagged().find(|(_, _, value)| *value < 0.0) {
        return Err(ValidationError::NegativeFlow { role, index, value });
    }

    let total_input = flows.total_input();
    if !total_input.is_finite() {
        return Err(ValidationError::NonFiniteTotal {
            role: FlowRole::Input,
        });
    }
    let total_loss = flows.total_loss();
    if !total_loss.is_finite() {
        return Err(ValidationError::NonFiniteTotal {
            role: FlowRole::Loss,
        });
    }
    if total_loss >= total_input {
        return Err(ValidationError::UnbalancedFlow {
            inputs: total_input,
            losses: total_loss,
        });
    }

    let required = losses.len() + 1;
    let colours = diagram.colours();
    if colours.len() < required {
        return Err(ValidationError::InsufficientColours {
            required,
            supplied: colours.len(),
        });
    }

    if let Some(index) = colours.iter().position(|colour| !colour.is_normalized()) {
        return Err(ValidationError::ColourOutOfRange { index });
    }

    // An empty list renders blank names
    let expected = inputs.len() + losses.len() + 1;
    if !diagram.labels().is_empty() && diagram.labels().len() != expected {
        return Err(ValidationError::LabelCountMismatch {
            expected,
            supplied: diagram.labels().len(),
        });
    }

    if let Some(&index) = diagram
        .separators()
        .iter()
        .find(|&&index| index >= losses.len())
    {
        return Err(ValidationError::SeparatorOutOfRange {
            index,
            losses: losses.len(),
        });
    }

    debug!(inputs = inputs.len(), losses = losses.len(); "Diagram validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use outflow_core::color::Rgb;

    use super::*;

    fn diagram(inputs: Vec<f32>, losses: Vec<f32>) -> SankeyDiagram {
        let labels = (0..inputs.len() + losses.len() + 1)
            .map(|i| format!("flow {i}"))
            .collect();
        let colours = vec![Rgb::new(0.5, 0.5, 0.5); losses.len() + 1];
        SankeyDiagram::new(inputs, losses, "MW", labels, colours)
    }

    #[test]
    fn test_valid_diagram_passes() {
        assert_eq!(validate(&diagram(vec![75.0, 32.0], vec![10.0, 5.0, 2.8])), Ok(()));
    }

    #[test]
    fn test_rejects_unbalanced_flow() {
        let err = validate(&diagram(vec![10.0], vec![15.0])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnbalancedFlow {
                inputs: 10.0,
                losses: 15.0
            }
        );
    }

    #[test]
    fn test_rejects_losses_equal_to_inputs() {
        let err = validate(&diagram(vec![10.0], vec![4.0, 6.0])).unwrap_err();
        assert!(matches!(err, ValidationError::UnbalancedFlow { .. }));
    }

    #[test]
    fn test_negative_input_reported_before_balance() {
        let err = validate(&diagram(vec![-1.0], Vec::new())).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeFlow {
                role: FlowRole::Input,
                index: 0,
                value: -1.0
            }
        );
    }

    #[test]
    fn test_rejects_negative_loss() {
        let err = validate(&diagram(vec![10.0], vec![1.0, -0.5])).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NegativeFlow {
                role: FlowRole::Loss,
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_finite_flow() {
        let err = validate(&diagram(vec![10.0, f32::NAN], Vec::new())).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonFiniteFlow {
                role: FlowRole::Input,
                index: 1
            }
        );
    }

    #[test]
    fn test_rejects_empty_inputs() {
        let diagram = SankeyDiagram::new(Vec::new(), Vec::new(), "", Vec::new(), Vec::new());
        assert_eq!(validate(&diagram), Err(ValidationError::NoInputs));
    }

    #[test]
    fn test_rejects_insufficient_colours() {
        let mut labels = vec!["in".to_string(), "a".to_string(), "b".to_string()];
        labels.push("out".to_string());
        let diagram = SankeyDiagram::new(
            vec![10.0],
            vec![1.0, 2.0],
            "W",
            labels,
            vec![Rgb::new(0.0, 0.0, 0.0); 2],
        );
        assert_eq!(
            validate(&diagram),
            Err(ValidationError::InsufficientColours {
                required: 3,
                supplied: 2
            })
        );
    }

    #[test]
    fn test_rejects_colour_out_of_range() {
        let diagram = SankeyDiagram::new(
            vec![10.0],
            Vec::new(),
            "W",
            vec!["in".into(), "out".into()],
            vec![Rgb::new(0.0, 1.2, 0.0)],
        );
        assert_eq!(
            validate(&diagram),
            Err(ValidationError::ColourOutOfRange { index: 0 })
        );
    }

    #[test]
    fn test_rejects_label_count_mismatch() {
        let diagram = SankeyDiagram::new(
            vec![10.0],
            vec![1.0],
            "W",
            vec!["in".into(), "out".into()],
            vec![Rgb::new(0.0, 0.0, 0.0); 2],
        );
        assert_eq!(
            validate(&diagram),
            Err(ValidationError::LabelCountMismatch {
                expected: 3,
                supplied: 2
            })
        );
    }

    #[test]
    fn test_empty_labels_are_accepted() {
        let diagram = SankeyDiagram::new(
            vec![10.0, 5.0],
            vec![1.0],
            "W",
            Vec::new(),
            vec![Rgb::new(0.0, 0.0, 0.0); 2],
        );
        assert_eq!(validate(&diagram), Ok(()));
    }

    #[test]
    fn test_rejects_overflowing_input_total() {
        let err = validate(&diagram(vec![3e38, 3e38], vec![1.0])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonFiniteTotal {
                role: FlowRole::Input
            }
        );
    }

    #[test]
    fn test_rejects_overflowing_loss_total() {
        let err = validate(&diagram(vec![f32::MAX], vec![3e38, 3e38])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonFiniteTotal {
                role: FlowRole::Loss
            }
        );
    }

    #[test]
    fn test_rejects_separator_out_of_range() {
        let diagram = diagram(vec![10.0], vec![1.0]).with_separators([1]);
        assert_eq!(
            validate(&diagram),
            Err(ValidationError::SeparatorOutOfRange {
                index: 1,
                losses: 1
            })
        );
    }

    #[test]
    fn test_zero_flows_are_valid() {
        assert_eq!(validate(&diagram(vec![10.0, 0.0], vec![0.0])), Ok(()));
    }
}
