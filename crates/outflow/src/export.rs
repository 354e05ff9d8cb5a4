//! Export of laid-out scenes.
//!
//! This is the last stage of the pipeline:
//!
//! ```text
//! SankeyDiagram
//!     ↓ validate + layout
//! Scene (diagram space, y up)
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! [`Error`] converts into [`OutflowError::Export`] at the crate boundary.
//!
//! [`OutflowError::Export`]: crate::OutflowError::Export

/// SVG export backend.
pub mod svg;

use std::io;

use thiserror::Error;

use crate::scene::Scene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Writes `scene` to `writer` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted, or
    /// [`Error::Io`] if writing fails.
    fn export_scene(&self, scene: &Scene, writer: &mut dyn io::Write) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
