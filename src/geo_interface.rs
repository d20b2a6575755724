use super::core::{GeomResult, GeometricObject, GeometryError};
use super::linestring::{LineString, LinearRing, MultiLineString};
use super::points::{Coordinate, MultiPoint, Point};
use super::polygons::{MultiPolygon, Polygon};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Names of the geometry kinds a mapping may declare
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::LinearRing => "LinearRing",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = GeometryError;

    /// Exact, case-sensitive match on the type name
    fn from_str(s: &str) -> GeomResult<Self> {
        match s {
            "Point" => Ok(GeometryType::Point),
            "LineString" => Ok(GeometryType::LineString),
            "LinearRing" => Ok(GeometryType::LinearRing),
            "Polygon" => Ok(GeometryType::Polygon),
            "MultiPoint" => Ok(GeometryType::MultiPoint),
            "MultiLineString" => Ok(GeometryType::MultiLineString),
            "MultiPolygon" => Ok(GeometryType::MultiPolygon),
            "GeometryCollection" => Ok(GeometryType::GeometryCollection),
            other => Err(GeometryError::NotImplemented(format!(
                "geometry type {other:?}"
            ))),
        }
    }
}

/// The `{type, coordinates}` description of a geometry
///
/// This is the interchange format consumed and produced by every geometry. It
/// serializes to the same JSON shape as a GeoJSON geometry object.
///
/// Example
/// ```rust
/// use geoif::{GeoInterface, HasGeoInterface, Point};
///
/// let gi = Point::new(1.0, -1.0).geo_interface();
/// assert_eq!(
///     gi.to_json_string().unwrap(),
///     r#"{"type":"Point","coordinates":[1.0,-1.0]}"#
/// );
///
/// let txt = r#"{"type":"Point","coordinates":[1,-1]}"#;
/// let parsed: GeoInterface = serde_json::from_str(txt).unwrap();
/// assert_eq!(parsed, gi);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeoInterface {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    LinearRing(Vec<Coordinate>),
    Polygon(Vec<Vec<Coordinate>>),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    MultiPolygon(Vec<Vec<Vec<Coordinate>>>),
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn json_number(value: &Value) -> GeomResult<f64> {
    let parsed = match value {
        Value::Number(num) => num.as_f64(),
        Value::String(txt) => txt.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| GeometryError::ValueError(format!("could not convert {value} to a float")))
}

fn json_array<'a>(value: &'a Value, what: &str) -> GeomResult<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        GeometryError::ShapeError(format!("expected {what}, got {}", json_kind(value)))
    })
}

fn json_coordinate(value: &Value) -> GeomResult<Coordinate> {
    let items = json_array(value, "a coordinate array")?;
    if !(2..=3).contains(&items.len()) {
        return Err(GeometryError::ShapeError(format!(
            "a coordinate needs 2 or 3 values, got {}",
            items.len()
        )));
    }
    let values = items
        .iter()
        .map(json_number)
        .collect::<GeomResult<Vec<_>>>()?;
    Coordinate::from_values(&values)
}

fn json_line(value: &Value) -> GeomResult<Vec<Coordinate>> {
    json_array(value, "an array of coordinates")?
        .iter()
        .map(json_coordinate)
        .collect()
}

fn json_rings(value: &Value) -> GeomResult<Vec<Vec<Coordinate>>> {
    json_array(value, "an array of rings")?
        .iter()
        .map(json_line)
        .collect()
}

fn json_polygons(value: &Value) -> GeomResult<Vec<Vec<Vec<Coordinate>>>> {
    json_array(value, "an array of polygons")?
        .iter()
        .map(json_rings)
        .collect()
}

impl GeoInterface {
    pub fn geom_type(&self) -> GeometryType {
        match self {
            GeoInterface::Point(_) => GeometryType::Point,
            GeoInterface::LineString(_) => GeometryType::LineString,
            GeoInterface::LinearRing(_) => GeometryType::LinearRing,
            GeoInterface::Polygon(_) => GeometryType::Polygon,
            GeoInterface::MultiPoint(_) => GeometryType::MultiPoint,
            GeoInterface::MultiLineString(_) => GeometryType::MultiLineString,
            GeoInterface::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }

    /// Read a mapping from a JSON object with `type` and `coordinates` members
    ///
    /// Values that are not JSON objects fail with a type mismatch. A missing, unknown
    /// or non-string type and `GeometryCollection` are not implemented.
    pub fn from_json(value: &Value) -> GeomResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| GeometryError::type_mismatch("geometry mapping", json_kind(value)))?;
        let geom_type = match obj.get("type") {
            Some(Value::String(name)) => name.parse::<GeometryType>()?,
            Some(other) => {
                return Err(GeometryError::NotImplemented(format!("geometry type {other}")));
            }
            None => {
                return Err(GeometryError::NotImplemented(String::from(
                    "geometry mapping without a type",
                )));
            }
        };
        let coords = || {
            obj.get("coordinates").ok_or_else(|| {
                GeometryError::type_mismatch("geometry mapping", "object without coordinates")
            })
        };

        Ok(match geom_type {
            GeometryType::Point => GeoInterface::Point(json_coordinate(coords()?)?),
            GeometryType::LineString => GeoInterface::LineString(json_line(coords()?)?),
            GeometryType::LinearRing => GeoInterface::LinearRing(json_line(coords()?)?),
            GeometryType::Polygon => GeoInterface::Polygon(json_rings(coords()?)?),
            GeometryType::MultiPoint => GeoInterface::MultiPoint(json_line(coords()?)?),
            GeometryType::MultiLineString => GeoInterface::MultiLineString(json_rings(coords()?)?),
            GeometryType::MultiPolygon => GeoInterface::MultiPolygon(json_polygons(coords()?)?),
            GeometryType::GeometryCollection => {
                return Err(GeometryError::NotImplemented(String::from(
                    "GeometryCollection",
                )));
            }
        })
    }

    pub fn to_json(&self) -> GeomResult<Value> {
        serde_json::to_value(self).map_err(|err| GeometryError::ValueError(err.to_string()))
    }

    pub fn to_json_string(&self) -> GeomResult<String> {
        serde_json::to_string(self).map_err(|err| GeometryError::ValueError(err.to_string()))
    }
}

impl<'de> Deserialize<'de> for GeoInterface {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        GeoInterface::from_json(&value).map_err(serde::de::Error::custom)
    }
}

/// Anything that can describe itself as a `{type, coordinates}` mapping
pub trait HasGeoInterface {
    fn geo_interface(&self) -> GeoInterface;
}

impl HasGeoInterface for GeoInterface {
    fn geo_interface(&self) -> GeoInterface {
        self.clone()
    }
}

/// Any of the concrete geometry kinds
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    fn as_object(&self) -> &dyn GeometricObject {
        match self {
            Geometry::Point(g) => g,
            Geometry::LineString(g) => g,
            Geometry::LinearRing(g) => g,
            Geometry::Polygon(g) => g,
            Geometry::MultiPoint(g) => g,
            Geometry::MultiLineString(g) => g,
            Geometry::MultiPolygon(g) => g,
        }
    }
}

impl HasGeoInterface for Geometry {
    fn geo_interface(&self) -> GeoInterface {
        self.as_object().geo_interface()
    }
}

impl GeometricObject for Geometry {
    fn geom_type(&self) -> GeometryType {
        self.as_object().geom_type()
    }

    fn to_wkt(&self) -> GeomResult<String> {
        self.as_object().to_wkt()
    }
}

macro_rules! geometry_from {
    ($($variant:ident),*) => {$(
        impl From<$variant> for Geometry {
            fn from(value: $variant) -> Self {
                Geometry::$variant(value)
            }
        }
    )*};
}

geometry_from!(
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon
);

/// Heterogeneous collections of geometries
///
/// Not supported: [`GeometryCollection::new`] always fails.
#[derive(Debug)]
pub struct GeometryCollection {
    _private: (),
}

impl GeometryCollection {
    pub fn new() -> GeomResult<Self> {
        Err(GeometryError::NotImplemented(String::from(
            "GeometryCollection",
        )))
    }
}

/// Build the concrete geometry described by a mapping
///
/// Example
/// ```rust
/// use geoif::{as_shape, Geometry, LinearRing};
/// let ring = LinearRing::new(vec![[0, 0], [0, 1], [1, 1]]).unwrap();
/// match as_shape(&ring).unwrap() {
///     Geometry::LinearRing(copy) => assert_eq!(copy, ring),
///     other => panic!("unexpected geometry {other:?}"),
/// }
/// ```
pub fn as_shape(feature: &impl HasGeoInterface) -> GeomResult<Geometry> {
    let gi = feature.geo_interface();
    log::debug!("Building a {} from its geometry mapping", gi.geom_type());
    Ok(match gi {
        GeoInterface::Point(c) => Geometry::Point(Point::from_coordinate(c)),
        GeoInterface::LineString(c) => Geometry::LineString(LineString::from_coordinates(c)?),
        GeoInterface::LinearRing(c) => Geometry::LinearRing(LinearRing::from_coordinates(c)?),
        GeoInterface::Polygon(rings) => Geometry::Polygon(Polygon::from_rings(rings)?),
        GeoInterface::MultiPoint(c) => Geometry::MultiPoint(MultiPoint::from_coordinates(c)),
        GeoInterface::MultiLineString(lines) => {
            let lines = lines
                .into_iter()
                .map(LineString::from_coordinates)
                .collect::<GeomResult<Vec<_>>>()?;
            Geometry::MultiLineString(MultiLineString::from_lines(lines))
        }
        GeoInterface::MultiPolygon(polys) => {
            Geometry::MultiPolygon(MultiPolygon::from_coordinates(polys)?)
        }
    })
}

/// Build the concrete geometry described by a JSON value
///
/// A value that is not a geometry mapping is an error, see [`GeoInterface::from_json`].
pub fn as_shape_json(value: &Value) -> GeomResult<Geometry> {
    as_shape(&GeoInterface::from_json(value)?)
}
