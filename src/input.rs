use super::core::{GeomResult, GeometryError};
use super::geo_interface::{GeoInterface, Geometry, HasGeoInterface};
use super::linestring::{LineString, LinearRing, MultiLineString};
use super::points::{Coordinate, MultiPoint, Point};
use super::polygons::{MultiPolygon, Polygon};
use serde_json::Value;

/// Loosely typed input accepted by the geometry constructors.
///
/// Constructors accept raw numbers, numeric text, nested sequences of those, or
/// anything exposing a geometry mapping. Most callers never build this directly and
/// rely on the `From` conversions instead.
///
/// Examples
/// ```rust
/// use geoif::{GeomInput, Point};
///
/// let input = GeomInput::from(vec![[0.0, 0.0], [1.0, 2.0]]);
/// assert_eq!(input.nesting_depth(), 2);
///
/// let pt = Point::new(1.0, 2.0);
/// assert!(GeomInput::from(&pt).as_geo_interface().is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum GeomInput {
    Number(f64),
    Text(String),
    Sequence(Vec<GeomInput>),
    Geometry(GeoInterface),
}

impl GeomInput {
    /// The geometry mapping carried by this input, if any.
    pub fn as_geo_interface(&self) -> Option<&GeoInterface> {
        match self {
            GeomInput::Geometry(gi) => Some(gi),
            _ => None,
        }
    }

    /// The items of this input if it is a sequence.
    pub fn as_sequence(&self) -> Option<&[GeomInput]> {
        match self {
            GeomInput::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, GeomInput::Sequence(_))
    }

    /// Coerce a scalar input into a float.
    ///
    /// Text is trimmed and parsed, sequences and geometries cannot be coerced.
    pub fn to_f64(&self) -> GeomResult<f64> {
        match self {
            GeomInput::Number(v) => Ok(*v),
            GeomInput::Text(txt) => txt.trim().parse::<f64>().map_err(|_| {
                GeometryError::ValueError(format!("could not convert {txt:?} to a float"))
            }),
            other => Err(GeometryError::ValueError(format!(
                "could not convert {} to a float",
                other.describe()
            ))),
        }
    }

    /// Depth of nested sequences, following the first element at each level.
    ///
    /// Scalars and geometries have depth 0, `[1, 2]` has depth 1 and `[[1, 2]]` depth 2.
    pub fn nesting_depth(&self) -> usize {
        match self {
            GeomInput::Sequence(items) => 1 + items.first().map_or(0, GeomInput::nesting_depth),
            _ => 0,
        }
    }

    /// Short human readable description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            GeomInput::Number(_) => String::from("a number"),
            GeomInput::Text(_) => String::from("text"),
            GeomInput::Sequence(items) => format!("a sequence of {} items", items.len()),
            GeomInput::Geometry(gi) => format!("a {} mapping", gi.geom_type()),
        }
    }
}

macro_rules! input_from_number {
    ($($t:ty),*) => {$(
        impl From<$t> for GeomInput {
            fn from(value: $t) -> Self {
                GeomInput::Number(value as f64)
            }
        }
    )*};
}

input_from_number!(f64, f32, i32, i64);

impl From<&str> for GeomInput {
    fn from(value: &str) -> Self {
        GeomInput::Text(value.to_string())
    }
}

impl From<String> for GeomInput {
    fn from(value: String) -> Self {
        GeomInput::Text(value)
    }
}

impl<T> From<Vec<T>> for GeomInput
where
    T: Into<GeomInput>,
{
    fn from(value: Vec<T>) -> Self {
        GeomInput::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T, const N: usize> From<[T; N]> for GeomInput
where
    T: Into<GeomInput>,
{
    fn from(value: [T; N]) -> Self {
        GeomInput::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T> From<&[T]> for GeomInput
where
    T: Clone + Into<GeomInput>,
{
    fn from(value: &[T]) -> Self {
        GeomInput::Sequence(value.iter().cloned().map(Into::into).collect())
    }
}

impl<A, B> From<(A, B)> for GeomInput
where
    A: Into<GeomInput>,
    B: Into<GeomInput>,
{
    fn from(value: (A, B)) -> Self {
        GeomInput::Sequence(vec![value.0.into(), value.1.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for GeomInput
where
    A: Into<GeomInput>,
    B: Into<GeomInput>,
    C: Into<GeomInput>,
{
    fn from(value: (A, B, C)) -> Self {
        GeomInput::Sequence(vec![value.0.into(), value.1.into(), value.2.into()])
    }
}

impl From<Coordinate> for GeomInput {
    fn from(value: Coordinate) -> Self {
        GeomInput::from(value.as_vec())
    }
}

impl From<&Coordinate> for GeomInput {
    fn from(value: &Coordinate) -> Self {
        GeomInput::from(value.as_vec())
    }
}

impl From<GeoInterface> for GeomInput {
    fn from(value: GeoInterface) -> Self {
        GeomInput::Geometry(value)
    }
}

impl From<&GeoInterface> for GeomInput {
    fn from(value: &GeoInterface) -> Self {
        GeomInput::Geometry(value.clone())
    }
}

macro_rules! input_from_geom {
    ($($t:ty),*) => {$(
        impl From<$t> for GeomInput {
            fn from(value: $t) -> Self {
                GeomInput::Geometry(value.geo_interface())
            }
        }

        impl From<&$t> for GeomInput {
            fn from(value: &$t) -> Self {
                GeomInput::Geometry(value.geo_interface())
            }
        }
    )*};
}

input_from_geom!(
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    Geometry
);

impl TryFrom<&Value> for GeomInput {
    type Error = GeometryError;

    /// Objects are read as geometry mappings, arrays become sequences.
    fn try_from(value: &Value) -> GeomResult<Self> {
        match value {
            Value::Object(_) => Ok(GeomInput::Geometry(GeoInterface::from_json(value)?)),
            Value::Array(items) => Ok(GeomInput::Sequence(
                items
                    .iter()
                    .map(GeomInput::try_from)
                    .collect::<GeomResult<Vec<_>>>()?,
            )),
            Value::Number(num) => num.as_f64().map(GeomInput::Number).ok_or_else(|| {
                GeometryError::ValueError(format!("could not convert {num} to a float"))
            }),
            Value::String(txt) => Ok(GeomInput::Text(txt.clone())),
            other => Err(GeometryError::ValueError(format!(
                "unsupported JSON value: {other}"
            ))),
        }
    }
}
