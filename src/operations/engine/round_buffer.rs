use std::f64::consts::{FRAC_PI_2, PI, TAU};

use geo::orient::{Direction, Orient};
use geo::{BooleanOps, Coord, CoordsIter, Geometry, LineString, MultiPolygon, Polygon};

use super::PlanarBufferEngine;
use crate::error::EngineError;
use crate::math::arc_2d::{arc_segment_count, sample_arc};
use crate::math::TOLERANCE;

/// Round-join, round-cap planar buffer.
///
/// The buffer of a geometry is the union of its areal parts with a disc
/// swept along every boundary segment (a capsule) and a disc around every
/// isolated vertex. Capsules and discs are inscribed polygons with
/// `segments` chords per full circle. Pieces are merged by pairwise boolean
/// union.
#[derive(Debug, Clone, Copy)]
pub struct RoundBuffer {
    min_segments: u32,
}

impl Default for RoundBuffer {
    fn default() -> Self {
        Self { min_segments: 8 }
    }
}

impl RoundBuffer {
    /// Creates an engine that never uses fewer than `min_segments` chords per circle.
    #[must_use]
    pub fn new(min_segments: u32) -> Self {
        Self {
            min_segments: min_segments.max(3),
        }
    }
}

impl PlanarBufferEngine for RoundBuffer {
    fn offset(
        &self,
        geometry: &Geometry<f64>,
        distance: f64,
        segments: u32,
    ) -> Result<Geometry<f64>, EngineError> {
        if !distance.is_finite() {
            return Err(EngineError::NonFinite);
        }
        if distance < 0.0 {
            return Err(EngineError::NegativeDistance(distance));
        }

        let mut coords = geometry.coords_iter().peekable();
        if coords.peek().is_none() {
            return Err(EngineError::Empty);
        }
        if coords.any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(EngineError::NonFinite);
        }

        let segments = segments.max(self.min_segments);
        let mut pieces = Vec::new();
        collect_pieces(geometry, distance, segments, &mut pieces);
        if pieces.is_empty() {
            return Err(EngineError::Degenerate(
                "zero-distance buffer of a geometry without area".to_owned(),
            ));
        }

        let mut merged = union_all(pieces).orient(Direction::Default);
        if merged.0.is_empty() {
            return Err(EngineError::Degenerate("buffer collapsed to nothing".to_owned()));
        }

        Ok(if merged.0.len() == 1 {
            Geometry::Polygon(merged.0.remove(0))
        } else {
            Geometry::MultiPolygon(merged)
        })
    }
}

/// Gathers the areal parts, capsules and discs whose union is the buffer.
fn collect_pieces(
    geometry: &Geometry<f64>,
    distance: f64,
    segments: u32,
    pieces: &mut Vec<MultiPolygon<f64>>,
) {
    let sweep = distance > 0.0;
    match geometry {
        Geometry::Point(p) => {
            if sweep {
                pieces.push(disc(p.0, distance, segments));
            }
        }
        Geometry::MultiPoint(mp) => {
            for p in &mp.0 {
                collect_pieces(&Geometry::Point(*p), distance, segments, pieces);
            }
        }
        Geometry::Line(l) => {
            if sweep {
                pieces.push(capsule(l.start, l.end, distance, segments));
            }
        }
        Geometry::LineString(ls) => {
            if sweep {
                sweep_line_string(ls, distance, segments, pieces);
            }
        }
        Geometry::MultiLineString(mls) => {
            if sweep {
                for ls in &mls.0 {
                    sweep_line_string(ls, distance, segments, pieces);
                }
            }
        }
        Geometry::Polygon(poly) => collect_polygon(poly, distance, segments, pieces),
        Geometry::MultiPolygon(mp) => {
            for poly in &mp.0 {
                collect_polygon(poly, distance, segments, pieces);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                collect_pieces(g, distance, segments, pieces);
            }
        }
        Geometry::Rect(r) => collect_polygon(&r.to_polygon(), distance, segments, pieces),
        Geometry::Triangle(t) => collect_polygon(&t.to_polygon(), distance, segments, pieces),
    }
}

fn collect_polygon(
    poly: &Polygon<f64>,
    distance: f64,
    segments: u32,
    pieces: &mut Vec<MultiPolygon<f64>>,
) {
    if is_areal(poly.exterior()) {
        // A self-union splits a self-intersecting ring into simple lobes.
        pieces.push(MultiPolygon(vec![poly.clone()]).union(&MultiPolygon(Vec::new())));
    }
    if distance > 0.0 {
        sweep_line_string(poly.exterior(), distance, segments, pieces);
        for ring in poly.interiors() {
            sweep_line_string(ring, distance, segments, pieces);
        }
    }
}

/// Merges pieces by repeatedly unioning neighbours, halving the list each round.
fn union_all(mut pieces: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    while pieces.len() > 1 {
        pieces = pieces
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => a.union(b),
                [a] => a.clone(),
                _ => MultiPolygon(Vec::new()),
            })
            .collect();
    }
    pieces.pop().unwrap_or_else(|| MultiPolygon(Vec::new()))
}

fn sweep_line_string(
    ls: &LineString<f64>,
    distance: f64,
    segments: u32,
    pieces: &mut Vec<MultiPolygon<f64>>,
) {
    match ls.0.as_slice() {
        [] => {}
        [only] => pieces.push(disc(*only, distance, segments)),
        _ => {
            for line in ls.lines() {
                pieces.push(capsule(line.start, line.end, distance, segments));
            }
        }
    }
}

/// A ring is areal when some vertex lies off the line through its first two
/// distinct vertices.
///
/// Signed area is not used: the lobes of a figure-eight ring cancel out.
fn is_areal(ring: &LineString<f64>) -> bool {
    let mut coords = ring.0.iter();
    let Some(&a) = coords.next() else {
        return false;
    };
    let Some(&b) = coords.find(|c| (c.x - a.x).hypot(c.y - a.y) > TOLERANCE) else {
        return false;
    };
    let (ux, uy) = (b.x - a.x, b.y - a.y);
    let base = ux.hypot(uy);
    coords.any(|c| {
        let (vx, vy) = (c.x - a.x, c.y - a.y);
        (ux * vy - uy * vx).abs() > TOLERANCE * base * vx.hypot(vy).max(base)
    })
}

/// An inscribed regular polygon approximating a disc.
fn disc(center: Coord<f64>, radius: f64, segments: u32) -> MultiPolygon<f64> {
    let mut points = sample_arc(center.x, center.y, radius, 0.0, TAU, segments);
    points.pop();
    MultiPolygon(vec![Polygon::new(LineString::from(points), Vec::new())])
}

/// The region within `radius` of segment `a`–`b`: a rectangle with two
/// semicircular caps. Degenerates to a disc for a zero-length segment.
fn capsule(a: Coord<f64>, b: Coord<f64>, radius: f64, segments: u32) -> MultiPolygon<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx.hypot(dy) < TOLERANCE {
        return disc(a, radius, segments);
    }

    let heading = dy.atan2(dx);
    let half = arc_segment_count(segments, PI);
    let mut points = sample_arc(b.x, b.y, radius, heading - FRAC_PI_2, PI, half);
    points.extend(sample_arc(a.x, a.y, radius, heading + FRAC_PI_2, PI, half));
    MultiPolygon(vec![Polygon::new(LineString::from(points), Vec::new())])
}
