//! CLI logic for the Outflow Sankey diagram tool.

pub mod error_adapter;

mod args;
mod config;
mod diagram_file;
mod error;

pub use args::Args;
pub use diagram_file::{DiagramFile, DiagramFileError};
pub use error::CliError;

use std::fs;

use log::info;

use outflow::DiagramBuilder;

/// Run the Outflow CLI application
///
/// Reads the diagram file, renders it with the loaded configuration and
/// writes the SVG to the output path.
///
/// # Errors
///
/// Returns [`CliError::DiagramFile`] when the input cannot be parsed, and
/// [`CliError::Outflow`] for I/O, configuration, validation or rendering
/// errors.
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let diagram = DiagramFile::parse(&source)
        .map_err(|err| CliError::new_diagram_file_error(err, &source))?
        .into_diagram();

    let builder = DiagramBuilder::new(app_config);
    let svg = builder.render_svg(&diagram)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
