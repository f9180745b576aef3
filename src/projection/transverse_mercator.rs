use super::{CenterRotation, Projection};
use crate::math::Vector3;

/// Largest |sin| of the angular distance from the central meridian that
/// the forward map accepts before clamping (the projection diverges at ±90°).
const MAX_MERIDIAN_SINE: f64 = 1.0 - 1e-12;

/// Spherical transverse Mercator on a sphere rotated onto the center.
///
/// The central meridian of the rotated frame passes through the center, so
/// scale distortion grows with distance east/west of it and is negligible
/// within a few hundred kilometers.
#[derive(Debug, Clone, Copy)]
pub struct TransverseMercator {
    rotation: CenterRotation,
    scale: f64,
}

impl TransverseMercator {
    /// Creates a transverse Mercator projection.
    #[must_use]
    pub fn new(rotation: CenterRotation, scale: f64) -> Self {
        Self { rotation, scale }
    }
}

impl Projection for TransverseMercator {
    fn forward(&self, lon_lat: [f64; 2]) -> [f64; 2] {
        let v = self.rotation.rotate(lon_lat);
        let b = v.y.clamp(-MAX_MERIDIAN_SINE, MAX_MERIDIAN_SINE);
        [self.scale * b.atanh(), self.scale * v.z.atan2(v.x)]
    }

    fn inverse(&self, xy: [f64; 2]) -> [f64; 2] {
        let x = xy[0] / self.scale;
        let d = xy[1] / self.scale;
        let r = 1.0 / x.cosh();
        let v = Vector3::new(r * d.cos(), x.tanh(), r * d.sin());
        self.rotation.unrotate(&v)
    }

    fn center(&self) -> [f64; 2] {
        self.rotation.center()
    }
}
