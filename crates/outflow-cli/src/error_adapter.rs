//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Diagram file
//! errors carry a source snippet; everything else is reported with a stable
//! code and, where there is something actionable to say, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use outflow::{OutflowError, ValidationError};

use crate::{CliError, diagram_file::DiagramFileError};

/// Adapter for a diagram file error, with the file's text as source.
pub struct DiagramFileAdapter<'a> {
    err: &'a DiagramFileError,
    src: &'a str,
}

impl<'a> DiagramFileAdapter<'a> {
    pub fn new(err: &'a DiagramFileError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for DiagramFileAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramFileAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DiagramFileAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for DiagramFileAdapter<'_> {}

impl MietteDiagnostic for DiagramFileAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("outflow::diagram_file"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a diagram file needs `inputs` and `colours`; `unit`, `losses`, `labels` and `separators` are optional",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(self.err.message().to_string()),
            span,
        ))))
    }
}

/// Adapter for [`OutflowError`].
pub struct ErrorAdapter<'a>(pub &'a OutflowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            OutflowError::Io(_) => "outflow::io",
            OutflowError::Validation(err) => validation_code(err),
            OutflowError::Config(_) => "outflow::config",
            OutflowError::Export(_) => "outflow::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            OutflowError::Validation(err) => validation_help(err),
            OutflowError::Config(_) => {
                "check the [layout] and [style] tables of the configuration file"
            }
            OutflowError::Io(_) | OutflowError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

fn validation_code(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::NoInputs => "outflow::validation::no_inputs",
        ValidationError::NonFiniteFlow { .. } => "outflow::validation::non_finite",
        ValidationError::NonFiniteTotal { .. } => "outflow::validation::total_overflow",
        ValidationError::NegativeFlow { .. } => "outflow::validation::negative",
        ValidationError::UnbalancedFlow { .. } => "outflow::validation::unbalanced",
        ValidationError::InsufficientColours { .. } => "outflow::validation::colours",
        ValidationError::ColourOutOfRange { .. } => "outflow::validation::colour_range",
        ValidationError::LabelCountMismatch { .. } => "outflow::validation::labels",
        ValidationError::SeparatorOutOfRange { .. } => "outflow::validation::separator",
    }
}

fn validation_help(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::NoInputs => "add at least one value to `inputs`",
        ValidationError::NonFiniteFlow { .. } | ValidationError::NegativeFlow { .. } => {
            "flow magnitudes must be finite and zero or greater"
        }
        ValidationError::NonFiniteTotal { .. } => {
            "scale the magnitudes down, e.g. by choosing a larger unit"
        }
        ValidationError::UnbalancedFlow { .. } => {
            "the sum of `losses` must stay below the sum of `inputs` so the output is positive"
        }
        ValidationError::InsufficientColours { .. } => {
            "list one colour per loss, in order, followed by the output colour"
        }
        ValidationError::ColourOutOfRange { .. } => {
            "colour channels are fractions in [0, 1], e.g. [0.8, 0.2, 0.1]"
        }
        ValidationError::LabelCountMismatch { .. } => {
            "either omit `labels` or give one per input, one per loss and one for the output"
        }
        ValidationError::SeparatorOutOfRange { .. } => {
            "separator indices refer to positions in `losses`, starting at 0"
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagram file error with source location information.
    DiagramFile(DiagramFileAdapter<'a>),
    /// A library error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::DiagramFile(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::DiagramFile(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::DiagramFile(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::DiagramFile(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::DiagramFile(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::DiagramFile(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::DiagramFile { err, src } => {
            vec![Reportable::DiagramFile(DiagramFileAdapter::new(err, src))]
        }
        CliError::Outflow(err) => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use crate::DiagramFile;

    use super::*;

    fn code(reportable: &Reportable<'_>) -> String {
        reportable.code().map(|c| c.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_validation_error_code_and_help() {
        let err = CliError::Outflow(OutflowError::Validation(
            ValidationError::UnbalancedFlow {
                inputs: 10.0,
                losses: 12.0,
            },
        ));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(code(&reportables[0]), "outflow::validation::unbalanced");
        assert!(reportables[0].help().is_some());
        assert!(reportables[0].to_string().contains("must be strictly less"));
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = CliError::from(std::io::Error::other("disk full"));

        let reportables = to_reportables(&err);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(code(&reportables[0]), "outflow::io");
                assert!(e.help().is_none());
            }
            Reportable::DiagramFile(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_total_overflow_code() {
        let err = CliError::Outflow(OutflowError::Validation(
            ValidationError::NonFiniteTotal {
                role: outflow::FlowRole::Input,
            },
        ));
        let reportables = to_reportables(&err);
        assert_eq!(code(&reportables[0]), "outflow::validation::total_overflow");
        assert!(reportables[0].help().is_some());
    }

    #[test]
    fn test_config_error_code() {
        let err = CliError::Outflow(OutflowError::Config("bad".to_string()));
        assert_eq!(code(&to_reportables(&err)[0]), "outflow::config");
    }

    #[test]
    fn test_diagram_file_error_has_source_and_label() {
        let source = "inputs = \"many\"\ncolours = []\n";
        let file_err = DiagramFile::parse(source).unwrap_err();
        let err = CliError::new_diagram_file_error(file_err, source);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::DiagramFile(d) => {
                assert!(d.source_code().is_some());
                assert_eq!(d.labels().map(Iterator::count), Some(1));
                assert_eq!(code(&reportables[0]), "outflow::diagram_file");
            }
            Reportable::Error(_) => panic!("Expected DiagramFile"),
        }
    }

    #[test]
    fn test_render_report() {
        let err = CliError::Outflow(OutflowError::Validation(ValidationError::NoInputs));
        let reporter = miette::GraphicalReportHandler::new();

        let mut output = String::new();
        for reportable in to_reportables(&err) {
            reporter.render_report(&mut output, &reportable).unwrap();
        }
        assert!(output.contains("no inputs"));
    }
}
