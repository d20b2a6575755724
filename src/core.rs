use super::geo_interface::{GeometryType, HasGeoInterface};
use thiserror::Error;

const ATOL: f64 = 1e-12;
const RTOL: f64 = 1e-9;

/// Errors raised while building, converting or serializing geometries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The declared type of a geometry mapping is not accepted by the receiver.
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },
    /// A sequence had an unacceptable length or nesting.
    #[error("invalid shape: {0}")]
    ShapeError(String),
    /// A value could not be coerced or violates a geometric invariant.
    #[error("invalid value: {0}")]
    ValueError(String),
    /// The operation exists but is not supported.
    #[error("not implemented: {0}")]
    NotImplemented(String),
    /// Malformed WKT text.
    #[error("failed to parse WKT: {0}")]
    ParsingError(String),
}

impl GeometryError {
    pub(crate) fn type_mismatch(expected: &str, found: impl ToString) -> Self {
        GeometryError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

pub type GeomResult<T> = Result<T, GeometryError>;

/// Trait with common functionality for all geometric objects
pub trait GeometricObject: HasGeoInterface {
    /// The kind of the geometry.
    fn geom_type(&self) -> GeometryType;

    /// WKT representation of the geometry.
    ///
    /// Only points and line strings (including rings) can be written, every other
    /// kind fails with [`GeometryError::NotImplemented`].
    fn to_wkt(&self) -> GeomResult<String> {
        Err(GeometryError::NotImplemented(format!(
            "WKT output for {}",
            self.geom_type()
        )))
    }
}

/// Macro to implement the Display trait for Geometric Object types that can be written as WKT
macro_rules! display_for_geom {
    ($type:ty) => {
        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                match $crate::core::GeometricObject::to_wkt(self) {
                    Ok(txt) => write!(f, "{txt}"),
                    Err(_) => Err(std::fmt::Error),
                }
            }
        }
    };
}

pub(crate) use display_for_geom;

/// Return whether two numbers are approximately equal.
///
/// Determines if the given numbers are close with the given absolute and relative tolerances.
///
/// Examples:
/// ```rust
/// use geoif;
///
/// println!("Close: {}", geoif::is_close(0.0, 0.0, 1e-10, 1e-10));
/// ```
pub fn is_close(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    assert!(rtol >= 0.0 && atol >= 0.0);
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= (atol + rtol * scale)
}

/// Determine if two values are approximately equal to one another.
///
/// Determine if two floating point values are approximately equal. This is equivalent to calling
/// `is_close` with relative tolerance of `1e-9` and absolute tolerance of `1e-12`.
///
/// Example:
/// ```rust
/// use geoif;
/// let x1 = 0.123;
/// let x2 = 0.123 + 1e-14;
///
/// assert!(geoif::approx(x1, x2));
/// ```
pub fn approx(a: f64, b: f64) -> bool {
    is_close(a, b, RTOL, ATOL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx() {
        assert!(approx(1.0, 1.0));
        assert!(approx(0.0, 1e-13));
        assert!(approx(1e6, 1e6 + 1e-4));
        assert!(!approx(1.0, 1.0 + 1e-6));
        assert!(!approx(0.0, 1e-10));
    }

    #[test]
    fn test_error_messages() {
        let err = GeometryError::type_mismatch("Point", "Polygon");
        assert_eq!(err.to_string(), "type mismatch: expected Point, got Polygon");

        let err = GeometryError::NotImplemented(String::from("WKT output for Polygon"));
        assert_eq!(err.to_string(), "not implemented: WKT output for Polygon");
    }
}
