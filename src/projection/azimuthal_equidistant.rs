use super::{CenterRotation, Projection};
use crate::math::{Vector3, TOLERANCE};

/// Azimuthal equidistant projection around the center.
///
/// Distances and azimuths measured from the center are exact; distortion
/// grows perpendicular to those radial lines.
#[derive(Debug, Clone, Copy)]
pub struct AzimuthalEquidistant {
    rotation: CenterRotation,
    scale: f64,
}

impl AzimuthalEquidistant {
    /// Creates an azimuthal equidistant projection.
    #[must_use]
    pub fn new(rotation: CenterRotation, scale: f64) -> Self {
        Self { rotation, scale }
    }
}

impl Projection for AzimuthalEquidistant {
    fn forward(&self, lon_lat: [f64; 2]) -> [f64; 2] {
        let v = self.rotation.rotate(lon_lat);
        let sin_c = v.y.hypot(v.z);
        if sin_c < TOLERANCE {
            // Center, or its antipode which has no defined azimuth.
            let c = if v.x > 0.0 { 0.0 } else { std::f64::consts::PI };
            return [self.scale * c, 0.0];
        }
        let c = sin_c.atan2(v.x);
        let k = self.scale * c / sin_c;
        [k * v.y, k * v.z]
    }

    fn inverse(&self, xy: [f64; 2]) -> [f64; 2] {
        let rho = xy[0].hypot(xy[1]);
        if rho < TOLERANCE {
            return self.rotation.center();
        }
        let c = rho / self.scale;
        let k = c.sin() / rho;
        let v = Vector3::new(c.cos(), k * xy[0], k * xy[1]);
        self.rotation.unrotate(&v)
    }

    fn center(&self) -> [f64; 2] {
        self.rotation.center()
    }
}
