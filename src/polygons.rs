use super::core::{GeomResult, GeometricObject, GeometryError};
use super::geo_interface::{GeoInterface, GeometryType, HasGeoInterface};
use super::input::GeomInput;
use super::linestring::LinearRing;
use super::points::Coordinate;

/// A two-dimensional geometry bounded by a linear ring
///
/// A polygon may have negative-space holes, each bounded by its own ring. Holes are
/// not checked to lie inside the exterior or to be disjoint; if rings cross each other
/// the polygon is invalid and operations on it may give meaningless results.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

fn no_holes() -> GeomInput {
    GeomInput::Sequence(Vec::new())
}

/// Build the rings of the holes, each one from a ring mapping or a coordinate sequence
fn hole_rings(holes: GeomInput) -> GeomResult<Vec<LinearRing>> {
    let items = match holes {
        GeomInput::Sequence(items) => items,
        other => {
            return Err(GeometryError::ValueError(format!(
                "expected a sequence of holes, got {}",
                other.describe()
            )));
        }
    };
    items
        .into_iter()
        .map(|hole| match hole {
            GeomInput::Geometry(GeoInterface::LinearRing(coords)) => {
                LinearRing::from_coordinates(coords)
            }
            GeomInput::Geometry(gi) => {
                Err(GeometryError::type_mismatch("LinearRing", gi.geom_type()))
            }
            GeomInput::Sequence(_) => LinearRing::new(hole),
            other => Err(GeometryError::ValueError(format!(
                "cannot build a hole from {}",
                other.describe()
            ))),
        })
        .collect()
}

impl Polygon {
    /// Instantiate a polygon from a single shell argument
    ///
    /// Compatibility shim for the single-argument call style: the shell may be a
    /// ring or polygon mapping, a flat sequence of coordinates, or a `(shell, holes)`
    /// pair. The pair form is detected from the nesting depth of the input. Prefer
    /// [`Polygon::from_exterior_and_holes`] and [`Polygon::from_paired_sequence`].
    ///
    /// Example
    /// ```rust
    /// use geoif::Polygon;
    /// let square = Polygon::new(vec![[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]]).unwrap();
    /// assert_eq!(square.interiors().len(), 0);
    ///
    /// let holed = Polygon::new((
    ///     vec![[0, 0], [0, 4], [4, 4], [4, 0]],
    ///     vec![vec![[1, 1], [1, 2], [2, 2]]],
    /// ))
    /// .unwrap();
    /// assert_eq!(holed.interiors().len(), 1);
    /// ```
    pub fn new(shell: impl Into<GeomInput>) -> GeomResult<Self> {
        let shell = shell.into();
        if let Some(items) = shell.as_sequence() {
            match items.first() {
                None => {
                    return Err(GeometryError::ShapeError(String::from(
                        "polygon shell is empty",
                    )));
                }
                Some(GeomInput::Number(_) | GeomInput::Text(_)) => {
                    return Err(GeometryError::ShapeError(String::from(
                        "polygon shell must be a sequence of coordinates",
                    )));
                }
                Some(_) => (),
            }
        }
        if shell.nesting_depth() >= 3 {
            Self::from_paired_sequence(shell)
        } else {
            Self::from_exterior_and_holes(shell, no_holes())
        }
    }

    /// Instantiate a polygon from its exterior and a sequence of holes
    ///
    /// When the shell is a polygon mapping its own rings are used and `holes` is ignored.
    ///
    /// Example
    /// ```rust
    /// use geoif::Polygon;
    /// let holed = Polygon::from_exterior_and_holes(
    ///     vec![[0.0, 0.0], [0.0, 4.0], [4.0, 4.0], [4.0, 0.0]],
    ///     vec![vec![[1.0, 1.0], [1.0, 2.0], [2.0, 2.0]]],
    /// )
    /// .unwrap();
    /// assert_eq!(holed.exterior().len(), 5);
    /// assert_eq!(holed.interiors()[0].len(), 4);
    /// ```
    pub fn from_exterior_and_holes(
        shell: impl Into<GeomInput>,
        holes: impl Into<GeomInput>,
    ) -> GeomResult<Self> {
        let exterior = match shell.into() {
            GeomInput::Geometry(gi @ GeoInterface::Polygon(_)) => {
                let holes = holes.into();
                if holes.as_sequence().is_some_and(|h| !h.is_empty()) {
                    log::debug!("Ignoring holes passed along with a polygon shell");
                }
                return Self::from_geo_interface(&gi);
            }
            GeomInput::Geometry(GeoInterface::LinearRing(coords)) => {
                LinearRing::from_coordinates(coords)?
            }
            GeomInput::Geometry(gi) => {
                return Err(GeometryError::type_mismatch(
                    "LinearRing or Polygon",
                    gi.geom_type(),
                ));
            }
            seq @ GeomInput::Sequence(_) => LinearRing::new(seq)?,
            other => {
                return Err(GeometryError::ValueError(format!(
                    "cannot build a polygon shell from {}",
                    other.describe()
                )));
            }
        };
        Ok(Self {
            exterior,
            interiors: hole_rings(holes.into())?,
        })
    }

    /// Instantiate a polygon from a `(shell, holes)` pair, the holes being optional
    pub fn from_paired_sequence(pair: impl Into<GeomInput>) -> GeomResult<Self> {
        match pair.into() {
            GeomInput::Sequence(items) => {
                let total = items.len();
                let mut items = items.into_iter();
                match (items.next(), items.next(), items.next()) {
                    (Some(shell), None, None) => Self::from_exterior_and_holes(shell, no_holes()),
                    (Some(shell), Some(holes), None) => Self::from_exterior_and_holes(shell, holes),
                    _ => Err(GeometryError::ShapeError(format!(
                        "expected a (shell, holes) pair, got a sequence of {total} items"
                    ))),
                }
            }
            other => Err(GeometryError::ShapeError(format!(
                "expected a (shell, holes) pair, got {}",
                other.describe()
            ))),
        }
    }

    /// Instantiate a polygon from anything exposing a `LinearRing` or `Polygon` mapping
    pub fn from_geo_interface(geom: &impl HasGeoInterface) -> GeomResult<Self> {
        match geom.geo_interface() {
            GeoInterface::LinearRing(coords) => Ok(Self {
                exterior: LinearRing::from_coordinates(coords)?,
                interiors: Vec::new(),
            }),
            GeoInterface::Polygon(rings) => Self::from_rings(rings),
            other => Err(GeometryError::type_mismatch(
                "LinearRing or Polygon",
                other.geom_type(),
            )),
        }
    }

    /// Instantiate a polygon from its rings, the exterior first
    pub fn from_rings(rings: Vec<Vec<Coordinate>>) -> GeomResult<Self> {
        let mut rings = rings.into_iter();
        let exterior = rings.next().ok_or_else(|| {
            GeometryError::ShapeError(String::from("a polygon needs an exterior ring"))
        })?;
        Ok(Self {
            exterior: LinearRing::from_coordinates(exterior)?,
            interiors: rings
                .map(LinearRing::from_coordinates)
                .collect::<GeomResult<Vec<_>>>()?,
        })
    }

    /// The ring bounding the positive space of the polygon
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    /// The rings bounding the holes, empty if there are none
    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    fn ring_coords(&self) -> Vec<Vec<Coordinate>> {
        std::iter::once(&self.exterior)
            .chain(&self.interiors)
            .map(|ring| ring.as_line_string().coords().to_vec())
            .collect()
    }
}

impl HasGeoInterface for Polygon {
    fn geo_interface(&self) -> GeoInterface {
        GeoInterface::Polygon(self.ring_coords())
    }
}

impl GeometricObject for Polygon {
    fn geom_type(&self) -> GeometryType {
        GeometryType::Polygon
    }
}

/// A collection of polygons
///
/// If the polygons overlap the collection is invalid; this is not checked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Instantiate from a sequence of `(shell, holes)` pairs and polygon mappings, or
    /// from a single polygon mapping
    ///
    /// Example
    /// ```rust
    /// use geoif::MultiPolygon;
    /// let mp = MultiPolygon::new(vec![(
    ///     vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
    ///     vec![vec![[0.1, 0.1], [0.1, 0.2], [0.2, 0.2], [0.2, 0.1]]],
    /// )])
    /// .unwrap();
    /// assert_eq!(mp.len(), 1);
    /// assert_eq!(mp.geoms()[0].interiors().len(), 1);
    /// ```
    pub fn new(input: impl Into<GeomInput>) -> GeomResult<Self> {
        match input.into() {
            GeomInput::Sequence(items) => {
                let polygons = items
                    .into_iter()
                    .map(|item| match item {
                        GeomInput::Geometry(gi) => Polygon::from_geo_interface(&gi),
                        pair @ GeomInput::Sequence(_) => Polygon::from_paired_sequence(pair),
                        other => Err(GeometryError::ValueError(format!(
                            "cannot build a polygon from {}",
                            other.describe()
                        ))),
                    })
                    .collect::<GeomResult<Vec<_>>>()?;
                Ok(Self { polygons })
            }
            GeomInput::Geometry(gi @ GeoInterface::Polygon(_)) => Ok(Self {
                polygons: vec![Polygon::from_geo_interface(&gi)?],
            }),
            GeomInput::Geometry(GeoInterface::MultiPolygon(_)) => Err(
                GeometryError::NotImplemented(String::from(
                    "building a multipolygon from a MultiPolygon mapping",
                )),
            ),
            GeomInput::Geometry(gi) => Err(GeometryError::type_mismatch(
                "Polygon",
                gi.geom_type(),
            )),
            other => Err(GeometryError::ValueError(format!(
                "cannot build a multipolygon from {}",
                other.describe()
            ))),
        }
    }

    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Instantiate from the rings of each polygon
    pub fn from_coordinates(polygons: Vec<Vec<Vec<Coordinate>>>) -> GeomResult<Self> {
        let polygons = polygons
            .into_iter()
            .map(Polygon::from_rings)
            .collect::<GeomResult<Vec<_>>>()?;
        Ok(Self { polygons })
    }

    pub fn geoms(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl HasGeoInterface for MultiPolygon {
    fn geo_interface(&self) -> GeoInterface {
        GeoInterface::MultiPolygon(self.polygons.iter().map(Polygon::ring_coords).collect())
    }
}

impl GeometricObject for MultiPolygon {
    fn geom_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linestring::LineString;
    use crate::points::Point;

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
    }

    fn holed() -> Polygon {
        Polygon::from_exterior_and_holes(
            vec![[0, 0], [0, 4], [4, 4], [4, 0]],
            vec![
                vec![[1.0, 1.0], [1.0, 2.0], [2.0, 2.0]],
                vec![[3.0, 3.0], [3.0, 3.5], [3.5, 3.5]],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_instantiation() {
        let poly = Polygon::new(square()).unwrap();
        let coords = poly.exterior().coords().unwrap();
        assert_eq!(coords[0], Coordinate::new(0.0, 0.0));
        assert_eq!(coords[coords.len() - 1], Coordinate::new(0.0, 0.0));
        assert!(poly.interiors().is_empty());

        // open shells are closed
        let open = Polygon::new(vec![[0, 0], [0, 1], [1, 1]]).unwrap();
        assert_eq!(open.exterior().len(), 4);
    }

    #[test]
    fn test_paired_forms() {
        let poly = holed();
        assert_eq!(poly.exterior().len(), 5);
        assert_eq!(poly.interiors().len(), 2);
        assert!(poly.interiors().iter().all(LinearRing::is_closed));

        let shim = Polygon::new((
            vec![[0, 0], [0, 4], [4, 4], [4, 0]],
            vec![
                vec![[1.0, 1.0], [1.0, 2.0], [2.0, 2.0]],
                vec![[3.0, 3.0], [3.0, 3.5], [3.5, 3.5]],
            ],
        ))
        .unwrap();
        assert_eq!(shim, poly);

        let shell_only = Polygon::from_paired_sequence(vec![square()]).unwrap();
        assert!(shell_only.interiors().is_empty());

        match Polygon::from_paired_sequence(vec![square(), square(), square()]) {
            Err(GeometryError::ShapeError(_)) => (),
            other => panic!("Expected a shape error, got {other:?}"),
        }

        // no shell at all is never read as an empty shell
        match Polygon::from_paired_sequence(Vec::<Vec<[f64; 2]>>::new()) {
            Err(GeometryError::ShapeError(_)) => (),
            other => panic!("Expected a shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_mappings() {
        let poly = holed();
        let copy = Polygon::new(&poly).unwrap();
        assert_eq!(copy, poly);

        // holes are ignored when the shell is already a polygon
        let ignored = Polygon::from_exterior_and_holes(&poly, vec![square()]).unwrap();
        assert_eq!(ignored.interiors().len(), 2);

        let ring = LinearRing::new(square()).unwrap();
        let from_ring = Polygon::new(&ring).unwrap();
        assert_eq!(from_ring.exterior(), &ring);

        let hole = LinearRing::new(vec![[0.2, 0.2], [0.2, 0.4], [0.4, 0.4]]).unwrap();
        let with_ring_hole =
            Polygon::from_exterior_and_holes(&ring, vec![GeomInput::from(&hole)]).unwrap();
        assert_eq!(with_ring_hole.interiors()[0], hole);
    }

    #[test]
    fn test_invalid_inputs() {
        let line = LineString::new(square()).unwrap();
        match Polygon::new(&line) {
            Err(GeometryError::TypeMismatch { found, .. }) => assert_eq!(found, "LineString"),
            other => panic!("Expected a type mismatch, got {other:?}"),
        }

        match Polygon::from_exterior_and_holes(square(), vec![GeomInput::from(&line)]) {
            Err(GeometryError::TypeMismatch { expected, .. }) => assert_eq!(expected, "LinearRing"),
            other => panic!("Expected a type mismatch, got {other:?}"),
        }

        match Polygon::new([1.0, 2.0]) {
            Err(GeometryError::ShapeError(_)) => (),
            other => panic!("Expected a shape error, got {other:?}"),
        }

        match Polygon::new(Vec::<[f64; 2]>::new()) {
            Err(GeometryError::ShapeError(_)) => (),
            other => panic!("Expected a shape error, got {other:?}"),
        }

        assert!(Polygon::new(5.0).is_err());
        assert!(Polygon::from_rings(Vec::new()).is_err());
    }

    #[test]
    fn test_geo_interface() {
        let poly = holed();
        match poly.geo_interface() {
            GeoInterface::Polygon(rings) => {
                assert_eq!(rings.len(), 3);
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[1][0], rings[1][3]);
            }
            other => panic!("Expected a polygon mapping, got {other:?}"),
        }

        let plain = Polygon::new(square()).unwrap();
        match plain.geo_interface() {
            GeoInterface::Polygon(rings) => assert_eq!(rings.len(), 1),
            other => panic!("Expected a polygon mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_polygon_wkt_not_implemented() {
        match holed().to_wkt() {
            Err(GeometryError::NotImplemented(_)) => (),
            other => panic!("Expected not implemented, got {other:?}"),
        }
    }

    #[test]
    fn test_multipolygon() {
        let mp = MultiPolygon::new(vec![
            GeomInput::from((square(), Vec::<Vec<[f64; 2]>>::new())),
            GeomInput::from(holed()),
        ])
        .unwrap();
        assert_eq!(mp.len(), 2);
        assert!(mp.geoms()[0].interiors().is_empty());
        assert_eq!(mp.geoms()[1].interiors().len(), 2);

        let single = MultiPolygon::new(holed()).unwrap();
        assert_eq!(single.len(), 1);

        match mp.geo_interface() {
            GeoInterface::MultiPolygon(polys) => {
                assert_eq!(polys.len(), 2);
                assert_eq!(polys[1].len(), 3);
            }
            other => panic!("Expected a multipolygon mapping, got {other:?}"),
        }

        let rebuilt = match mp.geo_interface() {
            GeoInterface::MultiPolygon(polys) => MultiPolygon::from_coordinates(polys).unwrap(),
            other => panic!("Expected a multipolygon mapping, got {other:?}"),
        };
        assert_eq!(rebuilt, mp);
        assert!(mp.to_wkt().is_err());
    }

    #[test]
    fn test_multipolygon_invalid() {
        let mp = MultiPolygon::new(holed()).unwrap();
        match MultiPolygon::new(&mp) {
            Err(GeometryError::NotImplemented(_)) => (),
            other => panic!("Expected not implemented, got {other:?}"),
        }

        match MultiPolygon::new(&Point::new(0.0, 0.0)) {
            Err(GeometryError::TypeMismatch { .. }) => (),
            other => panic!("Expected a type mismatch, got {other:?}"),
        }

        match MultiPolygon::new(vec![1.0, 2.0]) {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }

        match MultiPolygon::new("text") {
            Err(GeometryError::ValueError(_)) => (),
            other => panic!("Expected a value error, got {other:?}"),
        }
    }
}
