//! Local planar projections centered on a geometry.
//!
//! Both projections first rotate the sphere so the center lands on
//! (0°, 0°), then map the rotated sphere to the plane. Planar units are
//! meters when `scale` is the Earth radius in meters.

mod azimuthal_equidistant;
mod transverse_mercator;

pub use azimuthal_equidistant::AzimuthalEquidistant;
pub use transverse_mercator::TransverseMercator;

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::math::sphere::{from_unit_vector, normalize_longitude, to_unit_vector};
use crate::math::{Rotation3, Vector3};

/// A forward/inverse pair between geographic and planar coordinates.
///
/// Implementations must round-trip points near their center.
pub trait Projection: Send + Sync {
    /// Maps `[lon, lat]` in degrees to planar `[x, y]`.
    fn forward(&self, lon_lat: [f64; 2]) -> [f64; 2];

    /// Maps planar `[x, y]` back to `[lon, lat]` in degrees.
    fn inverse(&self, xy: [f64; 2]) -> [f64; 2];

    /// The geographic center the projection was built around.
    fn center(&self) -> [f64; 2];
}

/// Which local projection the buffer pipeline builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    #[default]
    TransverseMercator,
    AzimuthalEquidistant,
}

impl ProjectionKind {
    /// Builds a projection of this kind centered on `center` (`[lon, lat]`).
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::InvalidCenter` if the center is not finite
    /// or its latitude is outside `[-90, 90]`, and `ProjectionError::InvalidScale`
    /// unless `scale` is positive and finite.
    pub fn build(self, center: [f64; 2], scale: f64) -> Result<Box<dyn Projection>, ProjectionError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ProjectionError::InvalidScale(scale));
        }
        let rotation = CenterRotation::new(center)?;
        Ok(match self {
            Self::TransverseMercator => Box::new(TransverseMercator::new(rotation, scale)),
            Self::AzimuthalEquidistant => Box::new(AzimuthalEquidistant::new(rotation, scale)),
        })
    }
}

/// Rigid rotation of the sphere taking `center` to (0°, 0°).
#[derive(Debug, Clone, Copy)]
pub struct CenterRotation {
    center: [f64; 2],
    rotation: Rotation3,
}

impl CenterRotation {
    /// Creates the rotation for `center` (`[lon, lat]` in degrees).
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::InvalidCenter` for non-finite coordinates or a
    /// latitude outside `[-90, 90]`.
    pub fn new(center: [f64; 2]) -> Result<Self, ProjectionError> {
        let [lon, lat] = center;
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 {
            return Err(ProjectionError::InvalidCenter { lon, lat });
        }
        // Spin the center's meridian onto lon = 0, then tilt it down to the equator.
        let spin = Rotation3::from_axis_angle(&Vector3::z_axis(), -lon.to_radians());
        let tilt = Rotation3::from_axis_angle(&Vector3::y_axis(), lat.to_radians());
        Ok(Self {
            center,
            rotation: tilt * spin,
        })
    }

    /// The geographic center of the rotation.
    #[must_use]
    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    /// Rotates a geographic point into the centered frame as a unit vector.
    #[must_use]
    pub fn rotate(&self, lon_lat: [f64; 2]) -> Vector3 {
        self.rotation * to_unit_vector(lon_lat)
    }

    /// Rotates a centered-frame vector back to geographic `[lon, lat]`.
    #[must_use]
    pub fn unrotate(&self, v: &Vector3) -> [f64; 2] {
        let [lon, lat] = from_unit_vector(&(self.rotation.inverse() * *v));
        [normalize_longitude(lon), lat]
    }
}
