use geo::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use geojson::{Position, Value};

use crate::error::EngineError;

/// Converts a GeoJSON geometry value to a `geo` geometry.
///
/// # Errors
///
/// Returns `EngineError::Conversion` if a position has fewer than 2 elements.
pub fn to_planar(value: &Value) -> Result<geo::Geometry<f64>, EngineError> {
    Ok(match value {
        Value::Point(p) => geo::Geometry::Point(Point(coord(p)?)),
        Value::MultiPoint(points) => geo::Geometry::MultiPoint(MultiPoint(
            points
                .iter()
                .map(|p| coord(p).map(Point))
                .collect::<Result<_, _>>()?,
        )),
        Value::LineString(line) => geo::Geometry::LineString(line_string(line)?),
        Value::MultiLineString(lines) => geo::Geometry::MultiLineString(MultiLineString(
            lines.iter().map(|l| line_string(l)).collect::<Result<_, _>>()?,
        )),
        Value::Polygon(rings) => geo::Geometry::Polygon(polygon(rings)?),
        Value::MultiPolygon(polygons) => geo::Geometry::MultiPolygon(MultiPolygon(
            polygons.iter().map(|p| polygon(p)).collect::<Result<_, _>>()?,
        )),
        Value::GeometryCollection(geometries) => {
            geo::Geometry::GeometryCollection(geo::GeometryCollection(
                geometries
                    .iter()
                    .map(|g| to_planar(&g.value))
                    .collect::<Result<_, _>>()?,
            ))
        }
    })
}

/// Converts a buffered `geo` geometry back to a GeoJSON value.
///
/// Only areal results are expected from an engine; other kinds are
/// converted faithfully all the same.
#[must_use]
pub fn from_planar(geometry: &geo::Geometry<f64>) -> Value {
    match geometry {
        geo::Geometry::Point(p) => Value::Point(position(p.0)),
        geo::Geometry::Line(l) => Value::LineString(vec![position(l.start), position(l.end)]),
        geo::Geometry::LineString(ls) => Value::LineString(positions(ls)),
        geo::Geometry::Polygon(p) => Value::Polygon(rings(p)),
        geo::Geometry::MultiPoint(mp) => {
            Value::MultiPoint(mp.0.iter().map(|p| position(p.0)).collect())
        }
        geo::Geometry::MultiLineString(mls) => {
            Value::MultiLineString(mls.0.iter().map(positions).collect())
        }
        geo::Geometry::MultiPolygon(mp) => Value::MultiPolygon(mp.0.iter().map(rings).collect()),
        geo::Geometry::GeometryCollection(gc) => Value::GeometryCollection(
            gc.0.iter()
                .map(|g| geojson::Geometry::new(from_planar(g)))
                .collect(),
        ),
        geo::Geometry::Rect(r) => Value::Polygon(rings(&r.to_polygon())),
        geo::Geometry::Triangle(t) => Value::Polygon(rings(&t.to_polygon())),
    }
}

fn coord(p: &[f64]) -> Result<Coord<f64>, EngineError> {
    match p {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(EngineError::Conversion(format!(
            "position with {} element(s)",
            p.len()
        ))),
    }
}

fn line_string(line: &[Position]) -> Result<LineString<f64>, EngineError> {
    Ok(LineString(
        line.iter().map(|p| coord(p)).collect::<Result<_, _>>()?,
    ))
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>, EngineError> {
    let mut iter = rings.iter();
    let exterior = match iter.next() {
        Some(ring) => line_string(ring)?,
        None => LineString(Vec::new()),
    };
    let interiors = iter.map(|r| line_string(r)).collect::<Result<_, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn position(c: Coord<f64>) -> Position {
    vec![c.x, c.y]
}

fn positions(ls: &LineString<f64>) -> Vec<Position> {
    ls.0.iter().map(|c| position(*c)).collect()
}

fn rings(p: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(p.exterior())
        .chain(p.interiors())
        .map(positions)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn polygon_with_hole_round_trips() {
        let value = Value::Polygon(vec![
            vec![vec![0.0, 0.0], vec![4.0, 0.0], vec![4.0, 4.0], vec![0.0, 4.0], vec![0.0, 0.0]],
            vec![vec![1.0, 1.0], vec![1.0, 2.0], vec![2.0, 2.0], vec![1.0, 1.0]],
        ]);
        let planar = to_planar(&value).unwrap();
        let geo::Geometry::Polygon(p) = &planar else {
            panic!("expected polygon");
        };
        assert_eq!(p.interiors().len(), 1);
        assert_eq!(from_planar(&planar), value);
    }

    #[test]
    fn multi_point_converts() {
        let value = Value::MultiPoint(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let planar = to_planar(&value).unwrap();
        assert!(matches!(&planar, geo::Geometry::MultiPoint(mp) if mp.0.len() == 2));
    }

    #[test]
    fn altitude_is_dropped() {
        let planar = to_planar(&Value::Point(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(from_planar(&planar), Value::Point(vec![1.0, 2.0]));
    }

    #[test]
    fn short_position_is_rejected() {
        let err = to_planar(&Value::LineString(vec![vec![0.0, 0.0], vec![1.0]])).unwrap_err();
        assert!(matches!(err, EngineError::Conversion(_)));
    }

    #[test]
    fn nested_collection_converts() {
        let value = Value::GeometryCollection(vec![geojson::Geometry::new(Value::Point(vec![
            0.0, 1.0,
        ]))]);
        let planar = to_planar(&value).unwrap();
        assert!(matches!(planar, geo::Geometry::GeometryCollection(ref gc) if gc.0.len() == 1));
    }
}
