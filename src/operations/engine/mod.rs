//! Planar buffering of projected geometries.

mod convert;
mod round_buffer;

pub use convert::{from_planar, to_planar};
pub use round_buffer::RoundBuffer;

use crate::error::EngineError;

/// A planar offset engine working in projected (meter) coordinates.
///
/// `offset` returns the set of points within `distance` of `geometry` as a
/// `Polygon` or `MultiPolygon`. `segments` is the number of chords used to
/// approximate a full circle of the offset boundary.
pub trait PlanarBufferEngine: Send + Sync {
    /// Buffers `geometry` by `distance`.
    ///
    /// # Errors
    ///
    /// Implementations return an [`EngineError`] for negative distances,
    /// empty or non-finite input, or geometry they cannot buffer.
    fn offset(
        &self,
        geometry: &geo::Geometry<f64>,
        distance: f64,
        segments: u32,
    ) -> Result<geo::Geometry<f64>, EngineError>;
}
