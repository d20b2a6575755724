pub mod core;
mod geo_interface;
mod input;
mod linestring;
mod points;
mod polygons;
pub mod serialization;

pub use self::core::*;
pub use self::geo_interface::*;
pub use self::input::*;
pub use self::linestring::*;
pub use self::points::*;
pub use self::polygons::*;
pub use serialization::from_wkt;
