use crate::core::{GeomResult, GeometryError};
use crate::geo_interface::{Geometry, GeometryType};
use crate::linestring::{LineString, LinearRing};
use crate::points::{Coordinate, Point};
use regex::Regex;
use std::sync::OnceLock;

const WKT_PATTERN: &str = concat!(
    r"(?i)^(SRID=(?P<srid>\d+);)?",
    r"(?P<wkt>(?P<type>POINT|LINESTRING|LINEARRING|POLYGON|",
    r"MULTIPOINT|MULTILINESTRING|MULTIPOLYGON|GEOMETRYCOLLECTION)",
    r"[ACEGIMLONPSRUTYZ\d,\.\-\(\) ]+)$",
);

static WKT_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, PartialEq)]
enum WktType {
    Point,
    LineString,
    LinearRing,
}

// Get the validating WKT regex once to avoid recompilation (thread-safe)
fn wkt_re() -> &'static Regex {
    WKT_RE.get_or_init(|| Regex::new(WKT_PATTERN).expect("WKT pattern is a valid regex"))
}

/// Parts of a WKT string recognized by [`match_wkt`]
#[derive(Debug, PartialEq)]
pub struct WktMatch<'a> {
    /// Spatial reference id from an `SRID=<id>;` prefix
    pub srid: Option<u32>,
    /// Geometry keyword as written in the input
    pub geometry_type: &'a str,
    /// The WKT text without the SRID prefix
    pub wkt: &'a str,
}

/// Check that a string looks like (optionally SRID prefixed) WKT
///
/// This only validates the overall format, case-insensitively, and is independent
/// of [`from_wkt`] which neither requires nor understands the SRID prefix.
///
/// Example
/// ```rust
/// use geoif::serialization::match_wkt;
/// let m = match_wkt("SRID=4326;POINT (1 2)").unwrap();
/// assert_eq!(m.srid, Some(4326));
/// assert_eq!(m.geometry_type, "POINT");
/// assert_eq!(m.wkt, "POINT (1 2)");
/// assert!(match_wkt("CIRCLE (1 2, 3)").is_none());
/// ```
pub fn match_wkt(text: &str) -> Option<WktMatch<'_>> {
    let caps = wkt_re().captures(text)?;
    // an SRID too large for u32 rejects the match rather than being dropped
    let srid = match caps.name("srid") {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };
    Some(WktMatch {
        srid,
        geometry_type: caps.name("type")?.as_str(),
        wkt: caps.name("wkt")?.as_str(),
    })
}

/// Parse a WKT string and return the parsed geometry object
///
/// Only `POINT`, `LINESTRING` and `LINEARRING` are understood; the keyword must be
/// upper case. Any other geometry is not implemented.
///
/// Examples
/// ```rust
/// use geoif::{Geometry, Point};
/// use geoif::serialization;
///
/// match serialization::from_wkt("POINT (1.0 -1.0)") {
///     Ok(Geometry::Point(pt)) => assert_eq!(pt, Point::new(1.0, -1.0)),
///     other => panic!("Expected a point, got {other:?}"),
/// }
///
/// match serialization::from_wkt("LINESTRING (0 0, 1 0, 1 1)") {
///     Ok(Geometry::LineString(line)) => assert_eq!(line.len(), 3),
///     other => panic!("Expected a line, got {other:?}"),
/// }
///
/// assert!(serialization::from_wkt("POLYGON ((0 0, 0 1, 1 1, 0 0))").is_err());
/// ```
pub fn from_wkt(text: &str) -> GeomResult<Geometry> {
    let wkt = text.trim();
    let wkt_type = identify_type(wkt)?;
    log::debug!("Parsing WKT as {wkt_type:?}");
    let body = coordinate_body(wkt)?;
    match wkt_type {
        WktType::Point => {
            let tokens: Vec<&str> = body.split_whitespace().collect();
            Ok(Geometry::Point(Point::try_new(tokens)?))
        }
        WktType::LineString => Ok(Geometry::LineString(LineString::new(
            coordinate_tokens(body),
        )?)),
        WktType::LinearRing => Ok(Geometry::LinearRing(LinearRing::new(
            coordinate_tokens(body),
        )?)),
    }
}

/// Identifies the type of geometry at the start of a WKT string
fn identify_type(wkt: &str) -> GeomResult<WktType> {
    if wkt.starts_with("POINT") {
        Ok(WktType::Point)
    } else if wkt.starts_with("LINESTRING") {
        Ok(WktType::LineString)
    } else if wkt.starts_with("LINEARRING") {
        Ok(WktType::LinearRing)
    } else {
        let keyword = wkt.split(['(', ' ']).next().unwrap_or_default();
        Err(GeometryError::NotImplemented(format!(
            "parsing WKT geometry {keyword:?}"
        )))
    }
}

/// The text between the first opening and the first closing parenthesis
fn coordinate_body(wkt: &str) -> GeomResult<&str> {
    match (wkt.find('('), wkt.find(')')) {
        (Some(open), Some(close)) if open < close => Ok(&wkt[open + 1..close]),
        (None, _) => Err(GeometryError::ParsingError(String::from(
            "Expected '(' to introduce coordinates",
        ))),
        _ => Err(GeometryError::ParsingError(String::from(
            "Expected ')' to close coordinates",
        ))),
    }
}

// Split "x1 y1, x2 y2" into per-coordinate value tokens
fn coordinate_tokens(body: &str) -> Vec<Vec<&str>> {
    body.split(',')
        .map(|c| c.split_whitespace().collect())
        .collect()
}

/// Render a single value, always with a fractional part or exponent
fn format_value(value: f64) -> String {
    format!("{value:?}")
}

fn coordinate_text(coord: &Coordinate) -> String {
    coord
        .as_vec()
        .into_iter()
        .map(format_value)
        .collect::<Vec<_>>()
        .join(" ")
}

/// WKT text of a point at the given coordinate
pub(crate) fn write_point(coord: &Coordinate) -> String {
    format!(
        "{} ({})",
        GeometryType::Point.as_str().to_uppercase(),
        coordinate_text(coord)
    )
}

/// WKT text of a line-like geometry, e.g. `LINESTRING (0.0 0.0, 1.0 1.0)`
pub(crate) fn write_coordinate_list(geom_type: GeometryType, coords: &[Coordinate]) -> String {
    let body = coords
        .iter()
        .map(coordinate_text)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} ({body})", geom_type.as_str().to_uppercase())
}
