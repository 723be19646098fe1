//! Loading and querying district boundaries.

use std::path::Path;

use geo::{BoundingRect, Coord, MapCoords, MultiPolygon};
use geojson::{Feature, GeoJson, JsonObject};
use hiwat_common::{BoundingBox, CrsCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{DistrictError, DistrictResult};

/// Property names accepted as the district name, in priority order.
///
/// Matching against the source's property keys is case-insensitive.
pub const NAME_FIELD_CANDIDATES: [&str; 4] = ["name", "district", "zilla", "adm2_en"];

/// A named district boundary in EPSG:4326.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictPolygon {
    name: String,
    geometry: MultiPolygon<f64>,
}

impl DistrictPolygon {
    pub fn new(name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            geometry,
        }
    }

    /// The trimmed display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Bounding box in degrees, `None` for an empty geometry.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.geometry.bounding_rect().map(|rect| {
            BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
        })
    }
}

/// The set of district polygons, in source order.
#[derive(Debug, Clone, Default)]
pub struct DistrictRegistry {
    districts: Vec<DistrictPolygon>,
}

impl DistrictRegistry {
    pub fn new(districts: Vec<DistrictPolygon>) -> Self {
        Self { districts }
    }

    /// Read a GeoJSON file of district boundaries.
    pub fn load<P: AsRef<Path>>(path: P) -> DistrictResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DistrictError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_geojson_str(&text)?;
        info!(
            path = %path.display(),
            districts = registry.len(),
            "Loaded district boundaries"
        );
        Ok(registry)
    }

    /// Parse a FeatureCollection or a single Feature.
    ///
    /// A legacy `crs` member naming EPSG:3857 is reprojected to degrees; no
    /// member at all means EPSG:4326.
    pub fn from_geojson_str(text: &str) -> DistrictResult<Self> {
        let geojson: GeoJson = text.parse()?;
        let (features, foreign_members) = match geojson {
            GeoJson::FeatureCollection(fc) => (fc.features, fc.foreign_members),
            GeoJson::Feature(mut feature) => {
                let members = feature.foreign_members.take();
                (vec![feature], members)
            }
            GeoJson::Geometry(_) => return Err(missing_name_field()),
        };

        let crs = source_crs(foreign_members.as_ref())?;
        let field = find_name_field(&features).ok_or_else(missing_name_field)?;
        debug!(field = %field, crs = %crs, features = features.len(), "Reading districts");

        let mut districts = Vec::with_capacity(features.len());
        for (index, feature) in features.into_iter().enumerate() {
            let Some(name) = feature_name(&feature, &field) else {
                warn!(index, field = %field, "Skipping district feature without a name");
                continue;
            };
            let Some(geometry) = feature_geometry(feature) else {
                warn!(index, name = %name, "Skipping district without a polygon geometry");
                continue;
            };
            let geometry = to_geographic(geometry, crs);
            districts.push(DistrictPolygon::new(name, geometry));
        }

        Ok(Self::new(districts))
    }

    /// Look up a district by name, ignoring case.
    ///
    /// The first matching feature wins when a name appears more than once.
    pub fn find(&self, name: &str) -> DistrictResult<&DistrictPolygon> {
        let wanted = name.to_lowercase();
        self.districts
            .iter()
            .find(|d| d.name.to_lowercase() == wanted)
            .ok_or_else(|| DistrictError::NotFound(name.to_string()))
    }

    /// Sorted, de-duplicated district names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.districts.iter().map(|d| d.name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &DistrictPolygon> {
        self.districts.iter()
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}

fn missing_name_field() -> DistrictError {
    DistrictError::MissingNameField {
        candidates: NAME_FIELD_CANDIDATES.join("/"),
    }
}

/// CRS named by a legacy `{"crs": {"type": "name", "properties": {"name": ...}}}`.
fn source_crs(foreign_members: Option<&JsonObject>) -> DistrictResult<CrsCode> {
    let name = foreign_members
        .and_then(|m| m.get("crs"))
        .and_then(|crs| crs.get("properties"))
        .and_then(|props| props.get("name"))
        .and_then(Value::as_str);

    match name {
        Some(name) => Ok(CrsCode::parse(name)?),
        None => Ok(CrsCode::Epsg4326),
    }
}

/// The property key to read names from, taken from the first candidate present
/// on any feature.
fn find_name_field(features: &[Feature]) -> Option<String> {
    NAME_FIELD_CANDIDATES.iter().find_map(|candidate| {
        features
            .iter()
            .filter_map(|f| f.properties.as_ref())
            .flat_map(|props| props.keys())
            .find(|key| key.to_lowercase() == *candidate)
            .cloned()
    })
}

fn feature_name(feature: &Feature, field: &str) -> Option<String> {
    let value = feature.properties.as_ref()?.get(field)?;
    let name = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    Some(name)
}

fn feature_geometry(feature: Feature) -> Option<MultiPolygon<f64>> {
    let geometry: geo::Geometry<f64> = feature.geometry?.try_into().ok()?;
    match geometry {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

fn to_geographic(geometry: MultiPolygon<f64>, crs: CrsCode) -> MultiPolygon<f64> {
    if crs.is_geographic() {
        return geometry;
    }
    geometry.map_coords(|c| {
        let (x, y) = crs.to_geographic(c.x, c.y);
        Coord { x, y }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(properties: Value) -> Feature {
        Feature::from_json_value(json!({
            "type": "Feature",
            "properties": properties,
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_name_field_priority() {
        let features = vec![feature(json!({"ADM2_EN": "a", "District": "b"}))];
        assert_eq!(find_name_field(&features).as_deref(), Some("District"));

        let features = vec![feature(json!({"zilla": "a", "NAME": "b"}))];
        assert_eq!(find_name_field(&features).as_deref(), Some("NAME"));

        let features = vec![feature(json!({"code": "a"}))];
        assert_eq!(find_name_field(&features), None);
    }

    #[test]
    fn test_name_field_found_on_later_feature() {
        let features = vec![feature(json!({})), feature(json!({"zilla": "Khulna"}))];
        assert_eq!(find_name_field(&features).as_deref(), Some("zilla"));
    }

    #[test]
    fn test_feature_name_stringifies() {
        let f = feature(json!({"name": "  Bogura  ", "code": 42, "empty": null}));
        assert_eq!(feature_name(&f, "name").as_deref(), Some("Bogura"));
        assert_eq!(feature_name(&f, "code").as_deref(), Some("42"));
        assert_eq!(feature_name(&f, "empty"), None);
        assert_eq!(feature_name(&f, "missing"), None);
    }

    #[test]
    fn test_source_crs() {
        assert_eq!(source_crs(None).unwrap(), CrsCode::Epsg4326);

        let members = json!({"crs": {"type": "name", "properties": {"name": "EPSG:3857"}}});
        let members = members.as_object().unwrap();
        assert_eq!(source_crs(Some(members)).unwrap(), CrsCode::Epsg3857);

        let members = json!({"crs": {"type": "name", "properties": {"name": "EPSG:32646"}}});
        let members = members.as_object().unwrap();
        assert!(source_crs(Some(members)).is_err());
    }

    #[test]
    fn test_polygon_promoted_to_multipolygon() {
        let f = feature(json!({"name": "x"}));
        let mp = feature_geometry(f).unwrap();
        assert_eq!(mp.0.len(), 1);
    }

    #[test]
    fn test_point_geometry_rejected() {
        let f = Feature::from_json_value(json!({
            "type": "Feature",
            "properties": {"name": "x"},
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
        }))
        .unwrap();
        assert!(feature_geometry(f).is_none());
    }
}
