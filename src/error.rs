//! Error taxonomy for canvas access and drawing.
//!
//! Two failure classes exist: a coordinate handed to a strict accessor is
//! outside the grid, or a drawing call's parameters are geometrically
//! unsatisfiable. Single plots that fall outside the canvas during an
//! otherwise-valid line or fill are clipped silently and are not errors.

use thiserror::Error;

/// Errors returned by canvas accessors and drawing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Coordinate access outside the canvas dimensions. Never clamped.
    #[error("coordinate ({x}, {y}) outside {width}x{height} canvas")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Drawing parameters that cannot be satisfied: non-positive radius or
    /// dimensions, a shape exceeding the canvas bounds, or too few polygon
    /// vertices. The rejected call leaves the canvas unchanged.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Tests
// ============================================================================
