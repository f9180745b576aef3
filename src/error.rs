use thiserror::Error;

/// Top-level error type for buffering operations.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("radius must be a positive finite number, got {0}")]
    InvalidRadius(f64),

    #[error("steps must be greater than zero, got {0}")]
    InvalidSteps(i64),

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("position must have at least 2 elements, got {0}")]
    InvalidPosition(usize),

    #[error(transparent)]
    InvalidGeoJson(Box<geojson::Error>),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// The planar engine failed on one geometry. The geographic geometry that
    /// was being buffered is attached for diagnostics.
    #[error("buffer engine failed: {source}")]
    Engine {
        geometry: Box<geojson::Geometry>,
        #[source]
        source: EngineError,
    },
}

impl From<geojson::Error> for BufferError {
    fn from(err: geojson::Error) -> Self {
        Self::InvalidGeoJson(Box::new(err))
    }
}

/// Errors raised by a planar buffer engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("buffer distance must not be negative, got {0}")]
    NegativeDistance(f64),

    #[error("geometry has no coordinates")]
    Empty,

    #[error("geometry contains non-finite coordinates")]
    NonFinite,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("cannot convert geometry: {0}")]
    Conversion(String),
}

/// Errors related to building a local projection.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("invalid projection center ({lon}, {lat})")]
    InvalidCenter { lon: f64, lat: f64 },

    #[error("projection scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("geometry has no coordinates to center a projection on")]
    Empty,
}

/// Convenience type alias for results using [`BufferError`].
pub type Result<T> = std::result::Result<T, BufferError>;
