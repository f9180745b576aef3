use geojson::{Feature, Geometry, JsonObject, Value};

use crate::error::{BufferError, Result};
use crate::math::sphere::{destination, normalize_longitude};
use crate::units::{length_to_radians, Units};

/// Builds a geodesic circle polygon around a point.
///
/// The ring has `steps` distinct vertices, each exactly `radius` away from
/// the center along a great circle, and is closed by repeating the first
/// vertex. Bearings run counter-clockwise from north.
#[derive(Debug)]
pub struct GeodesicCircle {
    center: [f64; 2],
    radius: f64,
    units: Units,
    steps: u32,
}

impl GeodesicCircle {
    /// Creates a new circle operation. `center` is `[lon, lat]` in degrees.
    #[must_use]
    pub fn new(center: [f64; 2], radius: f64, units: Units, steps: u32) -> Self {
        Self {
            center,
            radius,
            units,
            steps,
        }
    }

    /// Creates a circle around a GeoJSON position, ignoring any altitude.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::InvalidPosition` if the position has fewer than
    /// 2 elements.
    pub fn around(position: &[f64], radius: f64, units: Units, steps: u32) -> Result<Self> {
        match position {
            [lon, lat, ..] => Ok(Self::new([*lon, *lat], radius, units, steps)),
            _ => Err(BufferError::InvalidPosition(position.len())),
        }
    }

    /// Executes the operation, returning the closed ring.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::InvalidRadius` for a non-positive radius or
    /// `BufferError::InvalidSteps` when `steps` is zero.
    pub fn ring(&self) -> Result<Vec<Vec<f64>>> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(BufferError::InvalidRadius(self.radius));
        }
        if self.steps == 0 {
            return Err(BufferError::InvalidSteps(0));
        }

        let angle = length_to_radians(self.radius, self.units);
        let step = -360.0 / f64::from(self.steps);
        let mut ring: Vec<Vec<f64>> = (0..self.steps)
            .map(|i| {
                let [lon, lat] = destination(self.center, angle, f64::from(i) * step);
                vec![normalize_longitude(lon), lat]
            })
            .collect();
        ring.push(ring[0].clone());
        Ok(ring)
    }

    /// Executes the operation, returning a Polygon feature carrying `properties`.
    ///
    /// # Errors
    ///
    /// See [`GeodesicCircle::ring`].
    pub fn execute(&self, properties: JsonObject) -> Result<Feature> {
        let ring = self.ring()?;
        Ok(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::sphere::central_angle;
    use crate::math::EARTH_RADIUS;
    use crate::units::to_meters;

    fn ring_of(feature: &Feature) -> &Vec<Vec<f64>> {
        match &feature.geometry.as_ref().unwrap().value {
            Value::Polygon(rings) => &rings[0],
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn vertices_lie_on_the_circle() {
        let center = [-90.548_63, 14.616_599];
        let feature = GeodesicCircle::new(center, 500.0, Units::Miles, 64)
            .execute(JsonObject::new())
            .unwrap();
        let ring = ring_of(&feature);
        assert_eq!(ring.len(), 65);
        assert_eq!(ring.first(), ring.last());
        let expected = to_meters(500.0, Units::Miles);
        for p in ring {
            let d = central_angle(center, [p[0], p[1]]) * EARTH_RADIUS;
            assert!((d - expected).abs() < 1e-3, "{d} vs {expected}");
        }
    }

    #[test]
    fn first_vertex_is_due_north() {
        let ring = GeodesicCircle::new([0.0, 0.0], 1.0, Units::Degrees, 8)
            .ring()
            .unwrap();
        assert!(ring[0][0].abs() < 1e-9);
        assert!((ring[0][1] - 1.0).abs() < 1e-9);
        // Second vertex heads west (bearing -45°).
        assert!(ring[1][0] < 0.0);
    }

    #[test]
    fn steps_control_vertex_count() {
        let ring = GeodesicCircle::new([3.0, 4.0], 10.0, Units::Kilometers, 5)
            .ring()
            .unwrap();
        assert_eq!(ring.len(), 6);
    }

    #[test]
    fn properties_are_carried() {
        let mut props = JsonObject::new();
        props.insert("name".to_owned(), serde_json::json!("depot"));
        let feature = GeodesicCircle::new([0.0, 0.0], 1.0, Units::Kilometers, 16)
            .execute(props.clone())
            .unwrap();
        assert_eq!(feature.properties, Some(props));
    }

    #[test]
    fn around_ignores_altitude() {
        let circle = GeodesicCircle::around(&[1.0, 2.0, 300.0], 1.0, Units::Meters, 4).unwrap();
        assert_eq!(circle.ring().unwrap()[0].len(), 2);
    }

    #[test]
    fn around_rejects_short_position() {
        assert!(matches!(
            GeodesicCircle::around(&[1.0], 1.0, Units::Meters, 4),
            Err(BufferError::InvalidPosition(1))
        ));
    }

    #[test]
    fn invalid_parameters_fail() {
        let zero_radius = GeodesicCircle::new([0.0, 0.0], 0.0, Units::Meters, 8).ring();
        assert!(matches!(zero_radius, Err(BufferError::InvalidRadius(_))));
        let zero_steps = GeodesicCircle::new([0.0, 0.0], 1.0, Units::Meters, 0).ring();
        assert!(matches!(zero_steps, Err(BufferError::InvalidSteps(0))));
    }
}
