//! Error types for Stepflow rendering.

use thiserror::Error;

use stepflow_core::draw::CanvasError;

/// The error type for a single render call.
///
/// Every variant is terminal: a render either returns a complete image or
/// one of these, never partial output. Rendering the same input again fails
/// the same way.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cannot allocate a {width}x{height} pixel surface")]
    SurfaceAllocation { width: u32, height: u64 },

    #[error("Drawing failed: {0}")]
    Scene(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<CanvasError> for RenderError {
    fn from(error: CanvasError) -> Self {
        match error {
            CanvasError::Allocation { width, height } => Self::SurfaceAllocation {
                width,
                height: u64::from(height),
            },
            CanvasError::Scene(reason) => Self::Scene(reason),
            CanvasError::Encode(reason) => Self::Encoding(reason),
        }
    }
}
