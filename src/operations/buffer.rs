use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use tracing::{debug, warn};

use super::centroid::Centroid;
use super::circle::GeodesicCircle;
use super::engine::{from_planar, to_planar, PlanarBufferEngine, RoundBuffer};
use super::transform::map_value;
use crate::error::{BufferError, EngineError, Result};
use crate::options::BufferOptions;
use crate::units::{to_meters, Units};

/// Buffers GeoJSON by a real-world radius.
///
/// Points become geodesic circles computed directly on the sphere. Every
/// other geometry is projected onto a plane centered on its centroid,
/// buffered there by the planar engine, and projected back.
///
/// The output mirrors the input container: a Feature or bare geometry
/// yields a Feature, a FeatureCollection yields a FeatureCollection with
/// one feature per input feature, and a bare GeometryCollection yields a
/// FeatureCollection with one feature per member. Members of a
/// GeometryCollection are buffered independently and never unioned, so
/// their buffers may overlap.
#[derive(Debug, Clone)]
pub struct Buffer<E = RoundBuffer> {
    radius: f64,
    options: BufferOptions,
    engine: E,
}

impl Buffer<RoundBuffer> {
    /// Creates a buffer operation with default options (kilometers, 64 steps).
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            options: BufferOptions::default(),
            engine: RoundBuffer::default(),
        }
    }
}

impl<E: PlanarBufferEngine> Buffer<E> {
    /// Sets the units of the radius.
    #[must_use]
    pub fn units(mut self, units: Units) -> Self {
        self.options.units = units;
        self
    }

    /// Sets the number of vertices per full circle.
    #[must_use]
    pub fn steps(mut self, steps: u32) -> Self {
        self.options.steps = steps;
        self
    }

    /// Replaces all options at once.
    #[must_use]
    pub fn options(mut self, options: BufferOptions) -> Self {
        self.options = options;
        self
    }

    /// Swaps in a different planar engine.
    #[must_use]
    pub fn engine<F: PlanarBufferEngine>(self, engine: F) -> Buffer<F> {
        Buffer {
            radius: self.radius,
            options: self.options,
            engine,
        }
    }

    /// Executes the buffer.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::InvalidRadius` or `BufferError::InvalidSteps`
    /// before doing any work if the parameters are invalid. Any member that
    /// fails to buffer fails the whole call.
    pub fn execute(&self, input: &GeoJson) -> Result<GeoJson> {
        self.validate()?;
        debug!(
            input = kind(input),
            radius = self.radius,
            units = %self.options.units,
            steps = self.options.steps,
            "buffering"
        );

        match input {
            GeoJson::Geometry(geometry) => match &geometry.value {
                Value::GeometryCollection(members) => {
                    let features =
                        map_members(members, |m| self.geometry(m, JsonObject::new()))?;
                    Ok(GeoJson::FeatureCollection(FeatureCollection {
                        bbox: None,
                        features,
                        foreign_members: None,
                    }))
                }
                _ => Ok(GeoJson::Feature(self.geometry(geometry, JsonObject::new())?)),
            },
            GeoJson::Feature(feature) => Ok(GeoJson::Feature(self.feature(feature)?)),
            GeoJson::FeatureCollection(collection) => {
                let features = map_members(&collection.features, |f| self.feature(f))?;
                Ok(GeoJson::FeatureCollection(FeatureCollection {
                    bbox: None,
                    features,
                    foreign_members: collection.foreign_members.clone(),
                }))
            }
        }
    }

    /// Buffers a single feature, keeping its id, properties and foreign members.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::MissingInput` if the feature has no geometry, or
    /// any error from [`Buffer::geometry`].
    pub fn feature(&self, feature: &Feature) -> Result<Feature> {
        self.validate()?;
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(BufferError::MissingInput("feature has no geometry"))?;
        let properties = feature.properties.clone().unwrap_or_default();
        let mut out = self.geometry(geometry, properties)?;
        out.id.clone_from(&feature.id);
        out.foreign_members.clone_from(&feature.foreign_members);
        Ok(out)
    }

    /// Buffers a single geometry into a feature carrying `properties`.
    ///
    /// # Errors
    ///
    /// Returns projection errors for geometries without usable coordinates
    /// and `BufferError::Engine` when the planar engine fails.
    pub fn geometry(&self, geometry: &Geometry, properties: JsonObject) -> Result<Feature> {
        self.validate()?;
        if let Value::Point(position) = &geometry.value {
            return GeodesicCircle::around(
                position,
                self.radius,
                self.options.units,
                self.options.steps,
            )?
            .execute(properties);
        }

        let meters = to_meters(self.radius, self.options.units);
        if meters > self.options.distortion_warning_km * 1000.0 {
            warn!(
                meters,
                limit_km = self.options.distortion_warning_km,
                "large buffer radius; projection distortion is not corrected"
            );
        }

        let center = Centroid::new(&geometry.value).execute()?;
        let projection = self
            .options
            .projection
            .build(center, self.options.projection_scale)?;
        debug!(?center, projection = ?self.options.projection, "projecting");

        let projected = map_value(&geometry.value, &|p: [f64; 2]| projection.forward(p));
        let planar = to_planar(&projected).map_err(|e| engine_error(geometry, e))?;
        let buffered = self
            .engine
            .offset(&planar, meters, self.options.steps)
            .map_err(|e| engine_error(geometry, e))?;
        let value = map_value(&from_planar(&buffered), &|p: [f64; 2]| projection.inverse(p));

        Ok(Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        })
    }

    fn validate(&self) -> Result<()> {
        check_radius(self.radius)?;
        if self.options.steps == 0 {
            return Err(BufferError::InvalidSteps(0));
        }
        Ok(())
    }
}

/// Buffers `input` by `radius`.
///
/// `units` defaults to kilometers and `steps` to 64.
///
/// # Errors
///
/// Checked in order: `MissingInput` when `input` is `None`, `InvalidRadius`
/// when `radius` is not positive, `InvalidSteps` when `steps` is given and not
/// positive. See [`Buffer::execute`] for the rest.
pub fn buffer(
    input: Option<&GeoJson>,
    radius: f64,
    units: Option<Units>,
    steps: Option<i64>,
) -> Result<GeoJson> {
    let input = input.ok_or(BufferError::MissingInput("no geojson given"))?;
    check_radius(radius)?;

    let mut op = Buffer::new(radius);
    if let Some(units) = units {
        op = op.units(units);
    }
    if let Some(steps) = steps {
        op = op.steps(positive_steps(steps)?);
    }
    op.execute(input)
}

/// Parses GeoJSON text and buffers it, taking `units` by name.
///
/// # Errors
///
/// Returns `MissingInput` for blank or `null` text, `InvalidGeoJson` when the
/// text does not parse, `UnknownUnit` for an unrecognized unit name, and
/// otherwise the errors of [`buffer`].
pub fn buffer_str(
    text: &str,
    radius: f64,
    units: Option<&str>,
    steps: Option<i64>,
) -> Result<GeoJson> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(BufferError::MissingInput("no geojson given"));
    }
    let input: GeoJson = trimmed.parse()?;
    check_radius(radius)?;
    let units = units.map(str::parse::<Units>).transpose()?;
    buffer(Some(&input), radius, units, steps)
}

/// Buffers collection members in input order.
#[cfg(not(feature = "parallel"))]
fn map_members<T, F>(members: &[T], f: F) -> Result<Vec<Feature>>
where
    T: Sync,
    F: Fn(&T) -> Result<Feature> + Sync + Send,
{
    members.iter().map(f).collect()
}

/// Buffers collection members on the rayon pool; results keep input order.
#[cfg(feature = "parallel")]
fn map_members<T, F>(members: &[T], f: F) -> Result<Vec<Feature>>
where
    T: Sync,
    F: Fn(&T) -> Result<Feature> + Sync + Send,
{
    use rayon::prelude::*;
    members.par_iter().map(f).collect()
}

fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(BufferError::InvalidRadius(radius))
    }
}

fn positive_steps(steps: i64) -> Result<u32> {
    u32::try_from(steps)
        .ok()
        .filter(|s| *s > 0)
        .ok_or(BufferError::InvalidSteps(steps))
}

fn engine_error(geometry: &Geometry, source: EngineError) -> BufferError {
    BufferError::Engine {
        geometry: Box::new(geometry.clone()),
        source,
    }
}

fn kind(input: &GeoJson) -> &'static str {
    match input {
        GeoJson::Geometry(g) => match g.value {
            Value::GeometryCollection(_) => "GeometryCollection",
            _ => "Geometry",
        },
        GeoJson::Feature(_) => "Feature",
        GeoJson::FeatureCollection(_) => "FeatureCollection",
    }
}
