//! Error types for scene construction and configuration.

use thiserror::Error;

/// Result type for fallible construction in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building meshes or validating configuration.
///
/// Nothing in the per-frame draw path returns these: degenerate geometry is
/// recovered locally there.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("sphere tessellation needs at least 3 sectors and 3 stacks, got {sectors}x{stacks}")]
    InvalidTessellation { sectors: u32, stacks: u32 },

    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    #[error("index {index} at position {position} exceeds vertex count {vertex_count}")]
    IndexOutOfRange {
        index: u32,
        position: usize,
        vertex_count: usize,
    },

    #[error("{name} strength must lie in [0, 1], got {value}")]
    StrengthOutOfRange { name: &'static str, value: f32 },

    #[error("light direction has zero length")]
    DegenerateLightDirection,

    #[error("zoom range is empty: min {min} > max {max}")]
    InvalidZoomRange { min: f32, max: f32 },

    #[error("viewport must be non-empty, got {width}x{height}")]
    InvalidViewport { width: usize, height: usize },

    #[error("invalid projection: {0}")]
    InvalidProjection(String),
}
