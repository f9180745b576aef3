mod buffer;
mod centroid;
mod circle;
pub mod engine;
pub mod transform;

pub use buffer::{buffer, buffer_str, Buffer};
pub use centroid::Centroid;
pub use circle::GeodesicCircle;
pub use engine::{PlanarBufferEngine, RoundBuffer};
