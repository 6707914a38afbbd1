use std::io;

use masterror::AppError;

/// Error type returned by [`TextSurfacePort`] operations.
///
/// Each variant stores the logical operation name to aid diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// Writing to the underlying output device failed.
    #[error("operation `{operation}` failed: {source}")]
    Io {
        /// Logical operation identifier.
        operation: &'static str,
        /// Source error reported by the output device.
        #[source]
        source: io::Error,
    },
}

impl SurfaceError {
    /// Helper for constructing [`SurfaceError::Io`].
    pub fn io(operation: &'static str, source: io::Error) -> Self {
        Self::Io { operation, source }
    }
}

impl From<SurfaceError> for AppError {
    fn from(err: SurfaceError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// A surface displaying a single line of plain text.
///
/// [`set_text`](TextSurfacePort::set_text) replaces whatever is currently
/// shown; the surface keeps no history and interprets no markup.
pub trait TextSurfacePort {
    fn set_text(&mut self, text: &str) -> Result<(), SurfaceError>;
}
