use serde::{Deserialize, Serialize};

use crate::math::PROJECTION_SCALE;
use crate::projection::ProjectionKind;
use crate::units::Units;

/// Settings for a buffer operation.
///
/// Deserializes from JSON with every field optional, e.g.
/// `{"units": "miles", "steps": 32}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferOptions {
    /// Units of the buffer radius.
    pub units: Units,
    /// Vertices per full circle of generated arcs.
    pub steps: u32,
    /// Local projection used for non-point geometries.
    pub projection: ProjectionKind,
    /// Projection scale in meters per radian.
    pub projection_scale: f64,
    /// Radii above this many kilometers log a distortion warning on the
    /// projection path. The output is not altered.
    pub distortion_warning_km: f64,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            units: Units::Kilometers,
            steps: 64,
            projection: ProjectionKind::TransverseMercator,
            projection_scale: PROJECTION_SCALE,
            distortion_warning_km: 500.0,
        }
    }
}
