pub mod error;
pub mod math;
pub mod operations;
pub mod options;
pub mod projection;
pub mod units;

pub use error::{BufferError, EngineError, ProjectionError, Result};
pub use operations::{buffer, buffer_str, Buffer};
pub use options::BufferOptions;
pub use units::Units;

pub use geojson;
