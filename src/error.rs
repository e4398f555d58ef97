//! Crate error type.

use thiserror::Error;

/// Errors produced by grid construction, section construction,
/// generation preconditions, and JSON import.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// Grid geometry is unusable (no days, no lunch row, bad chunk width).
    #[error("Invalid grid configuration: {0}")]
    InvalidGrid(String),

    /// A section block lies outside the render grid.
    #[error("Block {block} of section '{section_id}' is outside the grid (render cells: {render_len})")]
    BlockOutOfRange {
        section_id: String,
        block: usize,
        render_len: usize,
    },

    /// Two masks built against different grid geometries were compared.
    #[error("Mask width mismatch: expected {expected} chunks, found {found}")]
    MaskWidthMismatch { expected: usize, found: usize },

    /// A course request carries a filter that cannot be interpreted.
    #[error("Invalid filter for course '{course_code}': {reason}")]
    InvalidFilter { course_code: String, reason: String },

    /// Import document is structurally valid JSON but not the expected shape.
    #[error("Invalid import format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TimetableError>;
