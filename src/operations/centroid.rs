use geojson::{Position, Value};

use crate::error::{BufferError, ProjectionError, Result};

/// Computes the vertex-mean centroid of a geometry as `[lon, lat]`.
///
/// Every position contributes once; the closing position of a polygon ring
/// is skipped so that it does not pull the mean toward the ring's start.
/// Longitudes are averaged as plain numbers, so geometries straddling the
/// antimeridian get a centroid on the far side of the globe.
#[derive(Debug)]
pub struct Centroid<'a> {
    value: &'a Value,
}

impl<'a> Centroid<'a> {
    /// Creates a new centroid query.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::Empty` if the geometry has no positions, or
    /// `BufferError::InvalidPosition` if a position has fewer than 2 elements.
    pub fn execute(&self) -> Result<[f64; 2]> {
        let mut acc = Accumulator::default();
        acc.add_value(self.value)?;
        acc.mean()
    }
}

#[derive(Default)]
struct Accumulator {
    sum_x: f64,
    sum_y: f64,
    count: usize,
}

impl Accumulator {
    fn add_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Point(p) => self.add(p),
            Value::MultiPoint(points) | Value::LineString(points) => self.add_all(points),
            Value::Polygon(rings) => self.add_rings(rings),
            Value::MultiLineString(lines) => {
                for line in lines {
                    self.add_all(line)?;
                }
                Ok(())
            }
            Value::MultiPolygon(polygons) => {
                for rings in polygons {
                    self.add_rings(rings)?;
                }
                Ok(())
            }
            Value::GeometryCollection(geometries) => {
                for geometry in geometries {
                    self.add_value(&geometry.value)?;
                }
                Ok(())
            }
        }
    }

    fn add_rings(&mut self, rings: &[Vec<Position>]) -> Result<()> {
        for ring in rings {
            let open = match ring.as_slice() {
                [first, .., last] if first == last => &ring[..ring.len() - 1],
                _ => ring.as_slice(),
            };
            self.add_all(open)?;
        }
        Ok(())
    }

    fn add_all(&mut self, positions: &[Position]) -> Result<()> {
        for p in positions {
            self.add(p)?;
        }
        Ok(())
    }

    fn add(&mut self, p: &[f64]) -> Result<()> {
        match p {
            [x, y, ..] => {
                self.sum_x += x;
                self.sum_y += y;
                self.count += 1;
                Ok(())
            }
            _ => Err(BufferError::InvalidPosition(p.len())),
        }
    }

    fn mean(&self) -> Result<[f64; 2]> {
        if self.count == 0 {
            return Err(ProjectionError::Empty.into());
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.count as f64;
        Ok([self.sum_x / n, self.sum_y / n])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square() -> Value {
        Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![4.0, 0.0],
            vec![4.0, 2.0],
            vec![0.0, 2.0],
            vec![0.0, 0.0],
        ]])
    }

    #[test]
    fn polygon_skips_closing_position() {
        let c = Centroid::new(&square()).execute().unwrap();
        assert!((c[0] - 2.0).abs() < 1e-12);
        assert!((c[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn line_string_mean() {
        let line = Value::LineString(vec![vec![0.0, 0.0], vec![3.0, 3.0], vec![6.0, 0.0]]);
        let c = Centroid::new(&line).execute().unwrap();
        assert!((c[0] - 3.0).abs() < 1e-12);
        assert!((c[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn point_with_altitude() {
        let point = Value::Point(vec![1.5, -2.5, 100.0]);
        let c = Centroid::new(&point).execute().unwrap();
        assert_eq!(c, [1.5, -2.5]);
    }

    #[test]
    fn geometry_collection_pools_members() {
        let gc = Value::GeometryCollection(vec![
            geojson::Geometry::new(Value::Point(vec![0.0, 0.0])),
            geojson::Geometry::new(Value::Point(vec![2.0, 4.0])),
        ]);
        let c = Centroid::new(&gc).execute().unwrap();
        assert_eq!(c, [1.0, 2.0]);
    }

    #[test]
    fn empty_geometry_fails() {
        let err = Centroid::new(&Value::MultiPoint(vec![])).execute().unwrap_err();
        assert!(matches!(err, BufferError::Projection(ProjectionError::Empty)));
    }

    #[test]
    fn short_position_fails() {
        let err = Centroid::new(&Value::LineString(vec![vec![1.0], vec![2.0, 3.0]]))
            .execute()
            .unwrap_err();
        assert!(matches!(err, BufferError::InvalidPosition(1)));
    }
}
