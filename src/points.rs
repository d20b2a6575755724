use super::core::{self, GeomResult, GeometricObject, GeometryError, display_for_geom};
use super::geo_interface::{GeoInterface, GeometryType, HasGeoInterface};
use super::input::GeomInput;
use super::linestring::LineString;
use super::polygons::Polygon;
use super::serialization::wkt;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::HashSet;

/// A single 2D or 3D position
///
/// Examples
/// ```rust
/// use geoif::Coordinate;
/// let c = Coordinate::from_values(&[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(c.dims(), 3);
/// assert_eq!(c.z(), Some(3.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    x: f64,
    y: f64,
    z: Option<f64>,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Build a coordinate from 2 or 3 values
    pub fn from_values(values: &[f64]) -> GeomResult<Self> {
        match *values {
            [x, y] => Ok(Self::new(x, y)),
            [x, y, z] => Ok(Self::new_3d(x, y, z)),
            _ => Err(GeometryError::ShapeError(format!(
                "a coordinate needs 2 or 3 values, got {}",
                values.len()
            ))),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Number of values in the coordinate (2 or 3)
    pub fn dims(&self) -> usize {
        if self.z.is_some() { 3 } else { 2 }
    }

    pub fn as_vec(&self) -> Vec<f64> {
        match self.z {
            Some(z) => vec![self.x, self.y, z],
            None => vec![self.x, self.y],
        }
    }

    /// Return true if both coordinates have the same dimensions and approximately equal values.
    pub fn is_close(&self, other: &Coordinate) -> bool {
        let z_close = match (self.z, other.z) {
            (Some(a), Some(b)) => core::approx(a, b),
            (None, None) => true,
            _ => false,
        };
        z_close && core::approx(self.x, other.x) && core::approx(self.y, other.y)
    }

    // Hashable identity consistent with `==` (0.0 and -0.0 map to the same key)
    fn key(&self) -> (u64, u64, Option<u64>) {
        let bits = |v: f64| (v + 0.0).to_bits();
        (bits(self.x), bits(self.y), self.z.map(bits))
    }
}

impl TryFrom<&GeomInput> for Coordinate {
    type Error = GeometryError;

    /// Normalize a point mapping or a sequence of 2-3 numeric values into a coordinate.
    fn try_from(input: &GeomInput) -> GeomResult<Self> {
        match input {
            GeomInput::Geometry(GeoInterface::Point(c)) => Ok(*c),
            GeomInput::Geometry(gi) => Err(GeometryError::type_mismatch("Point", gi.geom_type())),
            GeomInput::Sequence(items) => {
                if !(2..=3).contains(&items.len()) {
                    return Err(GeometryError::ShapeError(format!(
                        "a coordinate needs 2 or 3 values, got {}",
                        items.len()
                    )));
                }
                let values = items
                    .iter()
                    .map(GeomInput::to_f64)
                    .collect::<GeomResult<Vec<f64>>>()?;
                Coordinate::from_values(&values)
            }
            other => Err(GeometryError::ShapeError(format!(
                "expected a coordinate sequence, got {}",
                other.describe()
            ))),
        }
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.dims()))?;
        seq.serialize_element(&self.x)?;
        seq.serialize_element(&self.y)?;
        if let Some(z) = &self.z {
            seq.serialize_element(z)?;
        }
        seq.end()
    }
}

/// A zero dimensional geometry
///
/// Examples
/// ```rust
/// use geoif::Point;
/// let my_point = Point::new(1.0, -1.0);
/// assert_eq!(my_point.to_string(), "POINT (1.0 -1.0)");
/// assert!(my_point.z().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    coord: Coordinate,
}

impl Point {
    /// Instantiate a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            coord: Coordinate::new(x, y),
        }
    }

    /// Instantiate a new 3D point
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            coord: Coordinate::new_3d(x, y, z),
        }
    }

    pub fn from_coordinate(coord: Coordinate) -> Self {
        Self { coord }
    }

    /// Instantiate a point from a slice of 2 or 3 values
    pub fn from_values(values: &[f64]) -> GeomResult<Self> {
        Ok(Self::from_coordinate(Coordinate::from_values(values)?))
    }

    /// Variadic form: the values are passed as separate positional arguments.
    ///
    /// Anything but 2 or 3 arguments is a value error, unlike [`Point::from_values`]
    /// which reports a malformed sequence.
    pub fn from_args(args: &[f64]) -> GeomResult<Self> {
        if !(2..=3).contains(&args.len()) {
            return Err(GeometryError::ValueError(format!(
                "a point takes 2 or 3 arguments, got {}",
                args.len()
            )));
        }
        Self::from_values(args)
    }

    /// Instantiate a point from a coordinate sequence or a point mapping
    ///
    /// Example
    /// ```rust
    /// use geoif::Point;
    /// let p = Point::try_new(["1.5", "2"]).unwrap();
    /// assert_eq!(p, Point::new(1.5, 2.0));
    /// let q = Point::try_new(&p).unwrap();
    /// assert_eq!(p, q);
    /// ```
    pub fn try_new(input: impl Into<GeomInput>) -> GeomResult<Self> {
        let input = input.into();
        Ok(Self::from_coordinate(Coordinate::try_from(&input)?))
    }

    /// Instantiate a point from anything exposing a point mapping
    pub fn from_geo_interface(geom: &impl HasGeoInterface) -> GeomResult<Self> {
        match geom.geo_interface() {
            GeoInterface::Point(c) => Ok(Self::from_coordinate(c)),
            other => Err(GeometryError::type_mismatch("Point", other.geom_type())),
        }
    }

    pub fn x(&self) -> f64 {
        self.coord.x
    }

    pub fn y(&self) -> f64 {
        self.coord.y
    }

    /// The z value, which only 3D points have
    pub fn z(&self) -> GeomResult<f64> {
        self.coord.z.ok_or_else(|| {
            GeometryError::ValueError(String::from("this point has no z coordinate"))
        })
    }

    pub fn has_z(&self) -> bool {
        self.coord.z.is_some()
    }

    pub fn coords(&self) -> Coordinate {
        self.coord
    }

    /// Replace the coordinate of the point
    pub fn set_coords(&mut self, input: impl Into<GeomInput>) -> GeomResult<()> {
        let input = input.into();
        if !input.is_sequence() {
            return Err(GeometryError::ShapeError(format!(
                "expected a coordinate sequence, got {}",
                input.describe()
            )));
        }
        self.coord = Coordinate::try_from(&input)?;
        Ok(())
    }

    /// Return true if the point is approximately equal to other.
    pub fn is_close(&self, other: &Point) -> bool {
        self.coord.is_close(&other.coord)
    }
}

impl HasGeoInterface for Point {
    fn geo_interface(&self) -> GeoInterface {
        GeoInterface::Point(self.coord)
    }
}

impl GeometricObject for Point {
    fn geom_type(&self) -> GeometryType {
        GeometryType::Point
    }

    /// WKT representation of the point
    fn to_wkt(&self) -> GeomResult<String> {
        Ok(wkt::write_point(&self.coord))
    }
}

display_for_geom!(Point);

/// A collection of points
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiPoint {
    points: Vec<Point>,
}

impl MultiPoint {
    /// Instantiate a multipoint collection
    ///
    /// Accepts a sequence mixing raw coordinates and geometry mappings, or a single
    /// mapping. Lines, rings and polygons contribute one point per vertex.
    ///
    /// Example
    /// ```rust
    /// use geoif::{LineString, MultiPoint, Point};
    /// let line = LineString::new(vec![[0.0, 0.0], [1.0, 1.0]]).unwrap();
    /// let mp = MultiPoint::new(vec![
    ///     geoif::GeomInput::from([5.0, 5.0]),
    ///     geoif::GeomInput::from(&line),
    /// ])
    /// .unwrap();
    /// assert_eq!(mp.len(), 3);
    /// assert_eq!(mp.geoms()[0], Point::new(5.0, 5.0));
    /// ```
    pub fn new(input: impl Into<GeomInput>) -> GeomResult<Self> {
        let mut mp = Self::default();
        match input.into() {
            GeomInput::Sequence(items) => {
                for item in &items {
                    match item {
                        GeomInput::Geometry(gi) => mp.extend_from_interface(gi)?,
                        GeomInput::Sequence(_) => mp.points.push(Point::try_new(item.clone())?),
                        other => {
                            return Err(GeometryError::ValueError(format!(
                                "cannot build a point from {}",
                                other.describe()
                            )));
                        }
                    }
                }
            }
            GeomInput::Geometry(gi) => mp.extend_from_interface(&gi)?,
            other => {
                return Err(GeometryError::ValueError(format!(
                    "cannot build a multipoint from {}",
                    other.describe()
                )));
            }
        }
        Ok(mp)
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_coordinates(coords: Vec<Coordinate>) -> Self {
        Self::from_points(coords.into_iter().map(Point::from_coordinate).collect())
    }

    fn extend_from_interface(&mut self, gi: &GeoInterface) -> GeomResult<()> {
        match gi {
            GeoInterface::Point(c) => self.points.push(Point::from_coordinate(*c)),
            GeoInterface::LineString(_) | GeoInterface::LinearRing(_) => {
                let line = LineString::from_geo_interface(gi)?;
                self.extend_coords(line.coords());
            }
            GeoInterface::Polygon(_) => {
                let poly = Polygon::from_geo_interface(gi)?;
                self.extend_coords(poly.exterior().coords()?);
                for hole in poly.interiors() {
                    self.extend_coords(hole.coords()?);
                }
            }
            other => {
                return Err(GeometryError::ValueError(format!(
                    "cannot take points from a {} mapping",
                    other.geom_type()
                )));
            }
        }
        Ok(())
    }

    fn extend_coords(&mut self, coords: &[Coordinate]) {
        self.points
            .extend(coords.iter().copied().map(Point::from_coordinate));
    }

    pub fn geoms(&self) -> &[Point] {
        &self.points
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove points with duplicate coordinates, keeping the first occurrence of each
    pub fn unique(&mut self) {
        let before = self.points.len();
        let mut seen = HashSet::with_capacity(before);
        self.points.retain(|pt| seen.insert(pt.coord.key()));
        log::debug!(
            "Removed {} duplicate points from multipoint",
            before - self.points.len()
        );
    }
}

impl HasGeoInterface for MultiPoint {
    fn geo_interface(&self) -> GeoInterface {
        GeoInterface::MultiPoint(self.points.iter().map(Point::coords).collect())
    }
}

impl GeometricObject for MultiPoint {
    fn geom_type(&self) -> GeometryType {
        GeometryType::MultiPoint
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::linestring::LinearRing;
    use rand::rng;
    use rand::seq::SliceRandom;

    #[test]
    fn test_coordinate_normalization() {
        let c = Coordinate::try_from(&GeomInput::from([1, 2])).unwrap();
        assert_eq!(c, Coordinate::new(1.0, 2.0));

        let c = Coordinate::try_from(&GeomInput::from(("1.5", "-2", 3))).unwrap();
        assert_eq!(c, Coordinate::new_3d(1.5, -2.0, 3.0));

        match Coordinate::try_from(&GeomInput::from([1.0])) {
            Err(GeometryError::ShapeError(_)) => (),
            other => panic!("Expected a shape error, got {other:?}"),
        }

        match Coordinate::try_from(&GeomInput::from([1.0, 2.0, 3.0, 4.0])) {
            Err(GeometryError::ShapeError(_)) => (),
            other => panic!("Expected a shape error, got {other:?}"),
        }

        match Coordinate::try_from(&GeomInput::from(["1.0", "y"])) {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }

        let line = LineString::new(vec![[0, 0], [1, 1]]).unwrap();
        match Coordinate::try_from(&GeomInput::from(&line)) {
            Err(GeometryError::TypeMismatch { expected, found }) => {
                assert_eq!(expected, "Point");
                assert_eq!(found, "LineString");
            }
            other => panic!("Expected a type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_point_accessors() {
        let p = Point::from_args(&[1.0, -1.0]).unwrap();
        assert_eq!(p.x(), 1.0);
        assert_eq!(p.y(), -1.0);
        match p.z() {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }

        let p = Point::new_3d(1.0, 2.0, 3.0);
        assert_eq!(p.z(), Ok(3.0));
        assert_eq!(p.coords().as_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_point_argument_count() {
        match Point::from_args(&[]) {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }
        match Point::from_args(&[1.0, 2.0, 3.0, 4.0]) {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }
        match Point::from_values(&[1.0]) {
            Err(GeometryError::ShapeError(_)) => (),
            other => panic!("Expected a shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_point_from_geo_interface() {
        let p1 = Point::new(0.5, 7.0);
        let p2 = Point::from_geo_interface(&p1).unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.geo_interface(), p2.geo_interface());

        let ring = LinearRing::new(vec![[0, 0], [1, 0], [1, 1]]).unwrap();
        assert!(Point::from_geo_interface(&ring).is_err());
        assert!(Point::try_new(&ring).is_err());
    }

    #[test]
    fn test_set_coords() {
        let mut p = Point::new(0.0, 0.0);
        p.set_coords([3, 4, 5]).unwrap();
        assert_eq!(p, Point::new_3d(3.0, 4.0, 5.0));

        assert!(p.set_coords([1.0]).is_err());
        assert!(p.set_coords(2.0).is_err());
        // failed updates leave the point untouched
        assert_eq!(p, Point::new_3d(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_close_pts() {
        let p1 = Point::new(20.0, 20.0);
        let p2 = Point::new(20.0 + 1e-7, 20.0);
        let p3 = Point::new(20.0 + 1e-12, 20.0 - 1e-12);

        assert!(!p1.is_close(&p2));
        assert!(p1.is_close(&p3));
        assert!(!p1.is_close(&Point::new_3d(20.0, 20.0, 0.0)));
    }

    #[test]
    fn test_point_wkt() {
        assert_eq!(Point::new(1.0, -1.0).to_wkt().unwrap(), "POINT (1.0 -1.0)");
        assert_eq!(
            Point::new_3d(0.5, 2.0, -3.25).to_string(),
            "POINT (0.5 2.0 -3.25)"
        );
    }

    #[test]
    fn test_multipoint_mixed_inputs() {
        let ring = LinearRing::new(vec![[0, 0], [1, 0], [1, 1]]).unwrap();
        let poly = Polygon::from_exterior_and_holes(
            vec![[0, 0], [0, 4], [4, 4], [4, 0]],
            vec![vec![[1, 1], [1, 2], [2, 2]]],
        )
        .unwrap();
        let mp = MultiPoint::new(vec![
            GeomInput::from([9, 9]),
            GeomInput::from(Point::new(8.0, 8.0)),
            GeomInput::from(&ring),
            GeomInput::from(&poly),
        ])
        .unwrap();

        // 2 points, 4 ring vertices, 5 exterior and 4 hole vertices
        assert_eq!(mp.len(), 15);
        assert_eq!(mp.geoms()[0], Point::new(9.0, 9.0));
        assert_eq!(mp.geoms()[1], Point::new(8.0, 8.0));
        assert_eq!(mp.geoms()[5], Point::new(0.0, 0.0));
        assert_eq!(mp.geoms()[6], Point::new(0.0, 0.0));
        assert_eq!(mp.geoms()[11], Point::new(1.0, 1.0));

        let single = MultiPoint::new(&poly).unwrap();
        assert_eq!(single.len(), 9);
    }

    #[test]
    fn test_multipoint_invalid() {
        match MultiPoint::new(vec![GeomInput::from(1.0)]) {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }
        match MultiPoint::new(2.0) {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }
        let mp = MultiPoint::new(vec![[0, 0], [1, 1]]).unwrap();
        match MultiPoint::new(&mp) {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }
    }

    #[test]
    fn test_multipoint_geo_interface() {
        let mp = MultiPoint::new(vec![[0.0, 1.0], [2.0, 3.0]]).unwrap();
        assert_eq!(
            mp.geo_interface(),
            GeoInterface::MultiPoint(vec![Coordinate::new(0.0, 1.0), Coordinate::new(2.0, 3.0)])
        );
        assert!(mp.to_wkt().is_err());
    }

    #[test]
    fn test_unique() {
        let coords = vec![[0.0, 0.0], [1.0, 1.0], [0.0, 0.0], [-0.0, 0.0], [1.0, 1.0]];
        let mut mp = MultiPoint::new(coords).unwrap();
        mp.unique();
        assert_eq!(mp.len(), 2);
        assert_eq!(mp.geoms()[0], Point::new(0.0, 0.0));
        assert_eq!(mp.geoms()[1], Point::new(1.0, 1.0));

        // 2D and 3D points with equal x/y are distinct
        let mut mp = MultiPoint::new(vec![vec![0.0, 0.0], vec![0.0, 0.0, 0.0]]).unwrap();
        mp.unique();
        assert_eq!(mp.len(), 2);
    }

    #[test]
    fn test_unique_random() {
        let mut random = rng();
        let mut coords = Vec::new();
        for i in 0..10 {
            for _ in 0..(i % 4 + 1) {
                coords.push([i as f64, (i * i) as f64]);
            }
        }
        coords.shuffle(&mut random);

        let mut mp = MultiPoint::new(coords.clone()).unwrap();
        let original = mp.len();
        mp.unique();
        assert_eq!(mp.len(), 10);
        assert!(mp.len() <= original);

        let pts = mp.geoms();
        for (i, a) in pts.iter().enumerate() {
            for b in &pts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
