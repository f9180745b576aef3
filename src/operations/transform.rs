//! Coordinate-tree transforms over GeoJSON geometry values.
//!
//! The geometry tag decides the nesting depth, and each depth has its own
//! mapper. Elements past the first two of a position (altitude, measures)
//! are carried over untouched. Positions with fewer than 2 elements are
//! copied as-is; callers validate them beforehand.

use geojson::{Geometry, Position, Value};

/// Returns a copy of `value` with `f` applied to every `[x, y]` pair.
///
/// Tag, nesting and ordering are preserved exactly; `value` is not modified.
#[must_use]
pub fn map_value<F>(value: &Value, f: &F) -> Value
where
    F: Fn([f64; 2]) -> [f64; 2],
{
    match value {
        Value::Point(p) => Value::Point(map_position(p, f)),
        Value::MultiPoint(points) => Value::MultiPoint(map_positions(points, f)),
        Value::LineString(line) => Value::LineString(map_positions(line, f)),
        Value::MultiLineString(lines) => Value::MultiLineString(map_rings(lines, f)),
        Value::Polygon(rings) => Value::Polygon(map_rings(rings, f)),
        Value::MultiPolygon(polygons) => Value::MultiPolygon(map_polygons(polygons, f)),
        Value::GeometryCollection(geometries) => Value::GeometryCollection(
            geometries
                .iter()
                .map(|g| Geometry {
                    bbox: None,
                    value: map_value(&g.value, f),
                    foreign_members: g.foreign_members.clone(),
                })
                .collect(),
        ),
    }
}

/// Depth 0: a single position.
#[must_use]
pub fn map_position<F>(p: &[f64], f: &F) -> Position
where
    F: Fn([f64; 2]) -> [f64; 2],
{
    match p {
        [x, y, rest @ ..] => {
            let [nx, ny] = f([*x, *y]);
            let mut out = Vec::with_capacity(2 + rest.len());
            out.push(nx);
            out.push(ny);
            out.extend_from_slice(rest);
            out
        }
        _ => p.to_vec(),
    }
}

/// Depth 1: a line string or multi-point.
#[must_use]
pub fn map_positions<F>(positions: &[Position], f: &F) -> Vec<Position>
where
    F: Fn([f64; 2]) -> [f64; 2],
{
    positions.iter().map(|p| map_position(p, f)).collect()
}

/// Depth 2: polygon rings or multi-line-string parts.
#[must_use]
pub fn map_rings<F>(rings: &[Vec<Position>], f: &F) -> Vec<Vec<Position>>
where
    F: Fn([f64; 2]) -> [f64; 2],
{
    rings.iter().map(|ring| map_positions(ring, f)).collect()
}

/// Depth 3: multi-polygon parts.
#[must_use]
pub fn map_polygons<F>(polygons: &[Vec<Vec<Position>>], f: &F) -> Vec<Vec<Vec<Position>>>
where
    F: Fn([f64; 2]) -> [f64; 2],
{
    polygons.iter().map(|rings| map_rings(rings, f)).collect()
}
