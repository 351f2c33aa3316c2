//! Compute layer for indexing and validation.
//!
//! This module separates the index structures and input checks from the
//! coordinator that owns them:
//! - Spatial indexing (k-d tree)
//! - Boundary validation

pub mod spatial;
pub mod validation;
