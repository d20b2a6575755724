//! Text serialization of geometries
pub mod wkt;

pub use wkt::{WktMatch, from_wkt, match_wkt};
