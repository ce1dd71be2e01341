use thiserror::Error;

/// Errors raised while building spherical tessellations or polygons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Points are too close, coincident or cocircular for a well-defined
    /// tessellation, or the result failed its sanity checks.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Need at least {min} generators, got {got}")]
    TooFewPoints { min: usize, got: usize },

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),
}
