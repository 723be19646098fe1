//! District GeoJSON fixtures laid out on the dummy HIWAT grid.
//!
//! The dummy grid spans lon 88.0–93.5 and lat 20.5–26.5 with 20 cells per
//! side, so cell centres are about 0.29° apart in x and 0.32° in y.

use serde_json::{json, Value};

/// Names of the districts in [`districts_geojson`], sorted and de-duplicated.
pub const DISTRICT_NAMES: [&str; 4] = ["Dhaka", "Faraway", "Sliver", "Sylhet"];

/// A district well inside the dummy grid covering 4x5 cell centres.
pub const DHAKA_BOUNDS: (f64, f64, f64, f64) = (90.0, 23.0, 91.0, 24.5);

/// A district inside the grid, stored as a MultiPolygon.
pub const SYLHET_BOUNDS: (f64, f64, f64, f64) = (91.5, 24.2, 92.5, 25.2);

/// A district entirely outside the grid.
pub const FARAWAY_BOUNDS: (f64, f64, f64, f64) = (10.0, 10.0, 11.0, 11.0);

/// A district inside the grid extent that contains no cell centre.
pub const SLIVER_BOUNDS: (f64, f64, f64, f64) = (89.0, 22.0, 89.05, 22.05);

/// Closed ring for an axis-aligned rectangle.
pub fn rectangle_ring(bounds: (f64, f64, f64, f64)) -> Value {
    let (min_x, min_y, max_x, max_y) = bounds;
    json!([
        [min_x, min_y],
        [max_x, min_y],
        [max_x, max_y],
        [min_x, max_y],
        [min_x, min_y]
    ])
}

/// A Polygon feature with a single string property.
pub fn polygon_feature(field: &str, name: &str, bounds: (f64, f64, f64, f64)) -> Value {
    json!({
        "type": "Feature",
        "properties": { field: name },
        "geometry": {
            "type": "Polygon",
            "coordinates": [rectangle_ring(bounds)]
        }
    })
}

/// A MultiPolygon feature with a single string property.
pub fn multipolygon_feature(field: &str, name: &str, bounds: (f64, f64, f64, f64)) -> Value {
    json!({
        "type": "Feature",
        "properties": { field: name },
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": [[rectangle_ring(bounds)]]
        }
    })
}

/// Wrap features in a FeatureCollection.
pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// The standard district set, with names stored under `field`.
///
/// Sylhet is padded with whitespace and Dhaka appears twice, so loaders are
/// exercised on trimming and de-duplication.
pub fn districts_geojson_with_field(field: &str) -> String {
    feature_collection(vec![
        polygon_feature(field, "Dhaka", DHAKA_BOUNDS),
        multipolygon_feature(field, "  Sylhet ", SYLHET_BOUNDS),
        polygon_feature(field, "Faraway", FARAWAY_BOUNDS),
        polygon_feature(field, "Sliver", SLIVER_BOUNDS),
        polygon_feature(field, "Dhaka", DHAKA_BOUNDS),
    ])
    .to_string()
}

/// The standard district set with a `name` property.
pub fn districts_geojson() -> String {
    districts_geojson_with_field("name")
}

/// Project lon/lat degrees to Web Mercator metres.
pub fn to_web_mercator(lon: f64, lat: f64) -> (f64, f64) {
    const R: f64 = 6_378_137.0;
    let x = R * lon.to_radians();
    let y = R * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

/// Dhaka only, in EPSG:3857 with a legacy `crs` member.
pub fn web_mercator_districts_geojson() -> String {
    let (min_x, min_y) = to_web_mercator(DHAKA_BOUNDS.0, DHAKA_BOUNDS.1);
    let (max_x, max_y) = to_web_mercator(DHAKA_BOUNDS.2, DHAKA_BOUNDS.3);
    json!({
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::3857" } },
        "features": [polygon_feature("name", "Dhaka", (min_x, min_y, max_x, max_y))]
    })
    .to_string()
}

/// A collection declaring a CRS nobody supports.
pub fn unsupported_crs_geojson() -> String {
    json!({
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "EPSG:32646" } },
        "features": [polygon_feature("name", "Dhaka", DHAKA_BOUNDS)]
    })
    .to_string()
}

/// Features carrying only an unrelated property.
pub fn unnamed_districts_geojson() -> String {
    feature_collection(vec![polygon_feature("code", "BD-13", DHAKA_BOUNDS)]).to_string()
}

/// GADM-style level-2 export with extra properties and a repeated feature.
pub fn gadm_level2_geojson() -> String {
    let feature = |name: &str, bounds| {
        json!({
            "type": "Feature",
            "properties": {
                "GID_2": format!("BGD.{}", name),
                "NAME_1": "Division",
                "NAME_2": name,
                "TYPE_2": "Zila"
            },
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [[rectangle_ring(bounds)]]
            }
        })
    };
    feature_collection(vec![
        feature("Dhaka", DHAKA_BOUNDS),
        feature("Sylhet", SYLHET_BOUNDS),
        feature("Dhaka", DHAKA_BOUNDS),
    ])
    .to_string()
}
