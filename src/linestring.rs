use super::core::{GeomResult, GeometricObject, GeometryError, display_for_geom};
use super::geo_interface::{GeoInterface, GeometryType, HasGeoInterface};
use super::input::GeomInput;
use super::points::Coordinate;
use super::serialization::wkt;

/// A one-dimensional geometry made of one or more line segments
///
/// All vertices share the same dimensions (all 2D or all 3D).
///
/// Example
/// ```rust
/// use geoif::LineString;
/// let line = LineString::new(vec![[0, 0], [1, 0], [1, 1]]).unwrap();
/// assert_eq!(line.len(), 3);
/// assert_eq!(line.to_string(), "LINESTRING (0.0 0.0, 1.0 0.0, 1.0 1.0)");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineString {
    coords: Vec<Coordinate>,
}

/// Check that every coordinate has the dimensions of the one before it
fn check_dims(coords: Vec<Coordinate>) -> GeomResult<Vec<Coordinate>> {
    let mut prev: Option<usize> = None;
    for (i, c) in coords.iter().enumerate() {
        let dims = c.dims();
        if let Some(expected) = prev {
            if expected != dims {
                return Err(GeometryError::ValueError(format!(
                    "coordinate {i} has {dims} dimensions, expected {expected}"
                )));
            }
        }
        prev = Some(dims);
    }
    Ok(coords)
}

/// Normalize line-like input into a list of coordinates
fn line_coords(input: &GeomInput) -> GeomResult<Vec<Coordinate>> {
    match input {
        GeomInput::Geometry(gi) => line_coords_from_interface(gi),
        GeomInput::Sequence(items) => {
            let coords = items
                .iter()
                .map(Coordinate::try_from)
                .collect::<GeomResult<Vec<_>>>()?;
            check_dims(coords)
        }
        other => Err(GeometryError::ValueError(format!(
            "cannot build a line from {}",
            other.describe()
        ))),
    }
}

fn line_coords_from_interface(gi: &GeoInterface) -> GeomResult<Vec<Coordinate>> {
    match gi {
        GeoInterface::LineString(coords) | GeoInterface::LinearRing(coords) => {
            check_dims(coords.clone())
        }
        GeoInterface::Polygon(_) => Err(GeometryError::type_mismatch(
            "LineString or LinearRing (use the polygon exterior or interiors)",
            GeometryType::Polygon,
        )),
        other => Err(GeometryError::type_mismatch(
            "LineString or LinearRing",
            other.geom_type(),
        )),
    }
}

impl LineString {
    /// Instantiate a line from a sequence of coordinates or points, or from a line mapping
    pub fn new(input: impl Into<GeomInput>) -> GeomResult<Self> {
        Ok(Self {
            coords: line_coords(&input.into())?,
        })
    }

    /// Instantiate a line from already normalized coordinates
    pub fn from_coordinates(coords: Vec<Coordinate>) -> GeomResult<Self> {
        Ok(Self {
            coords: check_dims(coords)?,
        })
    }

    /// Instantiate a line from anything exposing a `LineString` or `LinearRing` mapping
    pub fn from_geo_interface(geom: &impl HasGeoInterface) -> GeomResult<Self> {
        Ok(Self {
            coords: line_coords_from_interface(&geom.geo_interface())?,
        })
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Replace all vertices of the line
    pub fn set_coords(&mut self, input: impl Into<GeomInput>) -> GeomResult<()> {
        let input = input.into();
        if !input.is_sequence() {
            return Err(GeometryError::ValueError(format!(
                "expected a sequence of coordinates, got {}",
                input.describe()
            )));
        }
        self.coords = line_coords(&input)?;
        Ok(())
    }

    /// Get the total number of vertices in the line.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

impl HasGeoInterface for LineString {
    fn geo_interface(&self) -> GeoInterface {
        GeoInterface::LineString(self.coords.clone())
    }
}

impl GeometricObject for LineString {
    fn geom_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    /// WKT representation of the line
    fn to_wkt(&self) -> GeomResult<String> {
        Ok(wkt::write_coordinate_list(GeometryType::LineString, &self.coords))
    }
}

display_for_geom!(LineString);

/// A closed line string
///
/// The first and last coordinates are always equal: an open input is closed by
/// repeating its first coordinate. A ring that crosses or touches itself is invalid
/// and operations on it may give meaningless results; this is not checked.
///
/// Example
/// ```rust
/// use geoif::LinearRing;
/// let ring = LinearRing::new(vec![[0, 0], [0, 1], [1, 1]]).unwrap();
/// let coords = ring.coords().unwrap();
/// assert_eq!(coords.len(), 4);
/// assert_eq!(coords[0], coords[3]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRing {
    line: LineString,
}

impl LinearRing {
    /// Instantiate a ring from a sequence of coordinates or points, or from a line mapping
    pub fn new(input: impl Into<GeomInput>) -> GeomResult<Self> {
        Self::closed(LineString::new(input)?)
    }

    pub fn from_coordinates(coords: Vec<Coordinate>) -> GeomResult<Self> {
        Self::closed(LineString::from_coordinates(coords)?)
    }

    /// Instantiate a ring from anything exposing a `LineString` or `LinearRing` mapping
    pub fn from_geo_interface(geom: &impl HasGeoInterface) -> GeomResult<Self> {
        Self::closed(LineString::from_geo_interface(geom)?)
    }

    fn closed(mut line: LineString) -> GeomResult<Self> {
        close_ring(&mut line.coords)?;
        Ok(Self { line })
    }

    /// The vertices of the ring, failing if the ring is somehow not closed
    pub fn coords(&self) -> GeomResult<&[Coordinate]> {
        if self.is_closed() {
            Ok(self.line.coords())
        } else {
            Err(GeometryError::ValueError(String::from(
                "linear ring is not closed",
            )))
        }
    }

    /// Replace all vertices of the ring, closing it if needed
    pub fn set_coords(&mut self, input: impl Into<GeomInput>) -> GeomResult<()> {
        let mut line = self.line.clone();
        line.set_coords(input)?;
        close_ring(&mut line.coords)?;
        self.line = line;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.line.coords.first() == self.line.coords.last()
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// View the ring as a plain line string
    pub fn as_line_string(&self) -> &LineString {
        &self.line
    }

    pub fn into_line_string(self) -> LineString {
        self.line
    }
}

fn close_ring(coords: &mut Vec<Coordinate>) -> GeomResult<()> {
    match (coords.first().copied(), coords.last()) {
        (Some(first), Some(last)) => {
            if first != *last {
                log::debug!("Closing linear ring by repeating its first coordinate");
                coords.push(first);
            }
            Ok(())
        }
        _ => Err(GeometryError::ShapeError(String::from(
            "a linear ring needs at least one coordinate",
        ))),
    }
}

impl HasGeoInterface for LinearRing {
    fn geo_interface(&self) -> GeoInterface {
        GeoInterface::LinearRing(self.line.coords.clone())
    }
}

impl GeometricObject for LinearRing {
    fn geom_type(&self) -> GeometryType {
        GeometryType::LinearRing
    }

    fn to_wkt(&self) -> GeomResult<String> {
        Ok(wkt::write_coordinate_list(
            GeometryType::LinearRing,
            self.coords()?,
        ))
    }
}

display_for_geom!(LinearRing);

/// A collection of line strings
///
/// Example
/// ```rust
/// use geoif::MultiLineString;
/// let lines = MultiLineString::new(vec![vec![[0.0, 0.0], [1.0, 2.0]]]).unwrap();
/// assert_eq!(lines.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiLineString {
    lines: Vec<LineString>,
}

impl MultiLineString {
    /// Instantiate from a sequence of line-like inputs, or from a single line mapping
    pub fn new(input: impl Into<GeomInput>) -> GeomResult<Self> {
        match input.into() {
            GeomInput::Sequence(items) => {
                let lines = items
                    .into_iter()
                    .map(LineString::new)
                    .collect::<GeomResult<Vec<_>>>()?;
                Ok(Self { lines })
            }
            GeomInput::Geometry(gi) => Self::from_geo_interface(&gi),
            other => Err(GeometryError::ValueError(format!(
                "cannot build a multilinestring from {}",
                other.describe()
            ))),
        }
    }

    pub fn from_lines(lines: Vec<LineString>) -> Self {
        Self { lines }
    }

    /// Instantiate from a `LineString`, `LinearRing` or `MultiLineString` mapping
    pub fn from_geo_interface(geom: &impl HasGeoInterface) -> GeomResult<Self> {
        match geom.geo_interface() {
            GeoInterface::LineString(coords) | GeoInterface::LinearRing(coords) => Ok(Self {
                lines: vec![LineString::from_coordinates(coords)?],
            }),
            GeoInterface::MultiLineString(lines) => {
                let lines = lines
                    .into_iter()
                    .map(LineString::from_coordinates)
                    .collect::<GeomResult<Vec<_>>>()?;
                Ok(Self { lines })
            }
            other => Err(GeometryError::type_mismatch(
                "LineString, LinearRing or MultiLineString",
                other.geom_type(),
            )),
        }
    }

    pub fn geoms(&self) -> &[LineString] {
        &self.lines
    }

    pub fn push(&mut self, line: LineString) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl HasGeoInterface for MultiLineString {
    fn geo_interface(&self) -> GeoInterface {
        GeoInterface::MultiLineString(self.lines.iter().map(|l| l.coords.clone()).collect())
    }
}

impl GeometricObject for MultiLineString {
    fn geom_type(&self) -> GeometryType {
        GeometryType::MultiLineString
    }
}
