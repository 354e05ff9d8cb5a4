//! The TOML diagram description read by the CLI.
//!
//! ```toml
//! unit = "kW"
//! inputs = [75, 32]
//! losses = [10, 5, 2.8]
//! labels = ["Fuel", "Air", "Stack heat", "Reformer", "Pump", "Power"]
//! colours = [[0.8, 0.3, 0.2], [0.9, 0.6, 0.2], [0.5, 0.5, 0.5], [0.2, 0.5, 0.8]]
//! separators = [1]
//! ```
//!
//! Only `inputs` and `colours` are required. Value checks (balance, colour
//! ranges, label counts) happen later in [`outflow::validate`].

use std::ops::Range;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use outflow::{color::Rgb, semantic::SankeyDiagram};

/// Deserialized diagram file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramFile {
    #[serde(default)]
    unit: String,
    inputs: Vec<f32>,
    #[serde(default)]
    losses: Vec<f32>,
    #[serde(default)]
    labels: Vec<String>,
    colours: Vec<Rgb>,
    /// Loss indices followed by a dashed divider.
    #[serde(default)]
    separators: Vec<usize>,
}

impl DiagramFile {
    /// Parse a diagram description from TOML source.
    ///
    /// # Errors
    ///
    /// Returns a [`DiagramFileError`] with the offending byte range when the
    /// TOML is malformed or does not match the expected shape.
    pub fn parse(source: &str) -> Result<Self, DiagramFileError> {
        let file: Self = toml::from_str(source).map_err(|err| DiagramFileError {
            message: err.message().to_string(),
            span: err.span(),
        })?;
        debug!(
            inputs = file.inputs.len(),
            losses = file.losses.len();
            "Diagram file parsed"
        );
        Ok(file)
    }

    pub fn into_diagram(self) -> SankeyDiagram {
        SankeyDiagram::new(
            self.inputs,
            self.losses,
            self.unit,
            self.labels,
            self.colours,
        )
        .with_separators(self.separators)
    }
}

/// A diagram file that could not be deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid diagram file: {message}")]
pub struct DiagramFileError {
    message: String,
    span: Option<Range<usize>>,
}

impl DiagramFileError {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending TOML, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_file() {
        let source = r#"
            unit = "kW"
            inputs = [75, 32]
            losses = [10, 5, 2.8]
            labels = ["Fuel", "Air", "Stack heat", "Reformer", "Pump", "Power"]
            colours = [[0.8, 0.3, 0.2], [0.9, 0.6, 0.2], [0.5, 0.5, 0.5], [0.2, 0.5, 0.8]]
            separators = [1]
        "#;
        let diagram = DiagramFile::parse(source).unwrap().into_diagram();

        assert_eq!(diagram.unit(), "kW");
        assert_eq!(diagram.flows().inputs(), &[75.0, 32.0]);
        assert_eq!(diagram.flows().losses(), &[10.0, 5.0, 2.8]);
        assert_eq!(diagram.output_label(), "Power");
        assert_eq!(diagram.colours()[3], Rgb::new(0.2, 0.5, 0.8));
        assert!(diagram.separators().contains(&1));
    }

    #[test]
    fn test_optional_fields_default() {
        let source = "inputs = [50]\ncolours = [[0, 0, 1]]\n";
        let diagram = DiagramFile::parse(source).unwrap().into_diagram();

        assert_eq!(diagram.unit(), "");
        assert!(diagram.flows().losses().is_empty());
        assert!(diagram.labels().is_empty());
        assert!(diagram.separators().is_empty());
    }

    #[test]
    fn test_missing_inputs() {
        let err = DiagramFile::parse("colours = [[0, 0, 1]]\n").unwrap_err();
        assert!(err.message().contains("inputs"));
    }

    #[test]
    fn test_unknown_field_has_span() {
        let source = "inputs = [50]\ncolours = [[0, 0, 1]]\nlosess = [1]\n";
        let err = DiagramFile::parse(source).unwrap_err();
        assert!(err.message().contains("losess"));
        assert!(err.span().is_some());
    }

    #[test]
    fn test_colour_needs_three_channels() {
        let result = DiagramFile::parse("inputs = [50]\ncolours = [[0, 0]]\n");
        assert!(result.is_err());
    }
}
