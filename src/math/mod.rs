pub mod arc_2d;
pub mod sphere;

/// 3D vector type, used for points on the unit sphere.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3D rotation type.
pub type Rotation3 = nalgebra::Rotation3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Mean Earth radius in meters, used for unit conversion and geodesic circles.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// Scale of the local projection in meters per radian.
pub const PROJECTION_SCALE: f64 = 6_373_000.0;
