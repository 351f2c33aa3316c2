//! Error types shared by every gisdb operation.

use thiserror::Error;

/// Errors surfaced by the database coordinator and its configuration layer.
///
/// Lookups that find nothing are not errors; they come back as `None`, an
/// empty `Vec`, or a [`Removal`](crate::compute::spatial::Removal) without a
/// record.
#[derive(Debug, Error)]
pub enum GisError {
    /// A coordinate, name, or radius failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Another record already occupies this coordinate.
    #[error("A record already exists at ({x}, {y})")]
    DuplicateCoordinate { x: i32, y: i32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GisError>;
