//! Spherical helpers over `[longitude, latitude]` pairs in degrees.

use super::Vector3;

/// Converts a `[lon, lat]` pair in degrees to a unit vector.
///
/// The x axis points at (0°, 0°), y at (90°E, 0°), z at the north pole.
#[must_use]
pub fn to_unit_vector(lon_lat: [f64; 2]) -> Vector3 {
    let lambda = lon_lat[0].to_radians();
    let phi = lon_lat[1].to_radians();
    Vector3::new(phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin())
}

/// Converts a (not necessarily normalized) vector back to `[lon, lat]` degrees.
#[must_use]
pub fn from_unit_vector(v: &Vector3) -> [f64; 2] {
    let horizontal = v.x.hypot(v.y);
    [v.y.atan2(v.x).to_degrees(), v.z.atan2(horizontal).to_degrees()]
}

/// Wraps a longitude into `[-180, 180]`.
#[must_use]
pub fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Central angle in radians between two `[lon, lat]` points (haversine).
#[must_use]
pub fn central_angle(a: [f64; 2], b: [f64; 2]) -> f64 {
    let phi1 = a[1].to_radians();
    let phi2 = b[1].to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (b[0] - a[0]).to_radians();

    let h = (d_phi * 0.5).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda * 0.5).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

/// Returns the point reached by travelling `angle` radians from `origin`
/// along the great circle with initial `bearing` (degrees clockwise from north).
#[must_use]
pub fn destination(origin: [f64; 2], angle: f64, bearing: f64) -> [f64; 2] {
    let lambda1 = origin[0].to_radians();
    let phi1 = origin[1].to_radians();
    let theta = bearing.to_radians();

    let phi2 = (phi1.sin() * angle.cos() + phi1.cos() * angle.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * angle.sin() * phi1.cos()).atan2(angle.cos() - phi1.sin() * phi2.sin());

    [lambda2.to_degrees(), phi2.to_degrees()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EARTH_RADIUS;

    #[test]
    fn unit_vector_axes() {
        let v = to_unit_vector([0.0, 0.0]);
        assert!((v.x - 1.0).abs() < 1e-12);
        let v = to_unit_vector([90.0, 0.0]);
        assert!((v.y - 1.0).abs() < 1e-12);
        let v = to_unit_vector([0.0, 90.0]);
        assert!((v.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unit_vector_round_trip() {
        let p = [-90.548_63, 14.616_599];
        let back = from_unit_vector(&to_unit_vector(p));
        assert!((back[0] - p[0]).abs() < 1e-12);
        assert!((back[1] - p[1]).abs() < 1e-12);
    }

    #[test]
    fn normalize_longitude_wraps() {
        assert!((normalize_longitude(190.0) + 170.0).abs() < 1e-12);
        assert!((normalize_longitude(-190.0) - 170.0).abs() < 1e-12);
        assert!((normalize_longitude(180.0) - 180.0).abs() < 1e-12);
        assert!((normalize_longitude(540.0) - 180.0).abs() < 1e-12);
        assert!((normalize_longitude(12.5) - 12.5).abs() < 1e-12);
    }

    #[test]
    fn central_angle_one_degree_of_equator() {
        let a = central_angle([0.0, 0.0], [1.0, 0.0]);
        assert!((a - 1f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn destination_matches_central_angle() {
        let origin = [-75.343, 39.984];
        let angle = 50_000.0 / EARTH_RADIUS;
        for bearing in [0.0, 45.0, 90.0, -135.0, 180.0] {
            let dest = destination(origin, angle, bearing);
            let back = central_angle(origin, dest);
            assert!((back - angle).abs() < 1e-12, "bearing {bearing}: {back} vs {angle}");
        }
    }

    #[test]
    fn destination_due_north() {
        let dest = destination([10.0, 0.0], 1f64.to_radians(), 0.0);
        assert!((dest[0] - 10.0).abs() < 1e-9);
        assert!((dest[1] - 1.0).abs() < 1e-9);
    }
}
