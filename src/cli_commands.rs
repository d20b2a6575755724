use geoif::{GeoInterface, GeomInput, GeometricObject, Geometry, HasGeoInterface, MultiPoint};
use std::fs::File;
use std::io::Write;

/// Parse an input string and print some details about the shape
pub fn parse_show_detail(input: String) -> Result<(), String> {
    match geoif::from_wkt(&input) {
        Err(e) => Err(format!("Failed to parse WKT: {}", e)),
        Ok(Geometry::Point(pt)) => {
            println!("Parsed a Geometry of Type Point!");
            match pt.z() {
                Ok(z) => println!("The point coordinates are: ({}, {}, {z})", pt.x(), pt.y()),
                Err(_) => println!("The point coordinates are: ({}, {})", pt.x(), pt.y()),
            }
            Ok(())
        }
        Ok(Geometry::LineString(line)) => {
            println!("Parsed a Geometry of Type LineString!");
            println!("The line contains {} total vertices.", line.len());
            println!("Raw value: {line:?}");
            Ok(())
        }
        Ok(Geometry::LinearRing(ring)) => {
            println!("Parsed a Geometry of Type LinearRing!");
            println!(
                "The ring contains {} distinct vertices.",
                ring.len().saturating_sub(1)
            );
            println!("Raw value: {ring:?}");
            Ok(())
        }
        Ok(other) => {
            println!("Parsed a Geometry of Type {}!", other.geom_type());
            Ok(())
        }
    }
}

/// Parse a WKT string and print its geometry mapping as JSON
pub fn wkt_to_json(input: String, pretty: bool) -> Result<(), String> {
    let geom = geoif::from_wkt(&input).map_err(|e| format!("Failed to parse WKT: {e}"))?;
    let value = geom
        .geo_interface()
        .to_json()
        .map_err(|e| format!("Failed to serialize geometry: {e}"))?;
    let txt = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(|e| format!("Failed to serialize geometry: {e}"))?;
    println!("{txt}");
    Ok(())
}

/// Build a geometry from a JSON mapping and print it as WKT
pub fn json_to_wkt(input: String) -> Result<(), String> {
    let value: serde_json::Value =
        serde_json::from_str(&input).map_err(|e| format!("Invalid JSON: {e}"))?;
    let geom = geoif::as_shape_json(&value).map_err(|e| format!("Invalid geometry: {e}"))?;
    match geom.to_wkt() {
        Ok(txt) => {
            println!("{txt}");
            Ok(())
        }
        Err(e) => Err(format!(
            "Cannot write a {} as WKT: {e}",
            geom.geom_type()
        )),
    }
}

/// Collect the distinct vertices of a JSON geometry, and optionally save the result
pub fn unique_vertices(input: String, output_path: Option<String>) -> Result<(), String> {
    let value: serde_json::Value =
        serde_json::from_str(&input).map_err(|e| format!("Invalid JSON: {e}"))?;
    let geom_input = GeomInput::try_from(&value).map_err(|e| format!("Invalid geometry: {e}"))?;
    let mut points = match geom_input {
        GeomInput::Geometry(GeoInterface::MultiPoint(coords)) => {
            MultiPoint::from_coordinates(coords)
        }
        other => MultiPoint::new(other).map_err(|e| format!("Invalid geometry: {e}"))?,
    };
    let total = points.len();
    points.unique();

    let txt = points
        .geo_interface()
        .to_json_string()
        .map_err(|e| format!("Failed to serialize points: {e}"))?;
    match output_path {
        None => {
            println!("Kept {} of {total} vertices", points.len());
            println!("{txt}");
            Ok(())
        }
        Some(ref fp) => {
            let mut file = match File::create(fp) {
                Ok(f) => f,
                Err(e) => return Err(format!("Failed to create file: {}", e)),
            };
            match file.write_all(txt.as_bytes()) {
                Err(_) => Err(String::from("Failed to write to file!")),
                Ok(_) => {
                    println!("Points saved to file: '{fp}'");
                    Ok(())
                }
            }
        }
    }
}
