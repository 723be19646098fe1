//! Reduce administrative boundary files to what the calendar needs.
//!
//! GADM level-2 exports carry a dozen properties per feature; the calendar
//! only reads a district name and the polygon. Duplicated features (same name
//! and same geometry) are dropped.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};
use serde_json::Value;
use tracing::{info, warn};

/// Name property of GADM level-2 (district) boundaries.
pub const DEFAULT_NAME_FIELD: &str = "NAME_2";

/// Property the cleaned file stores names under.
const OUTPUT_NAME_FIELD: &str = "name";

/// Counts from one cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub features_in: usize,
    pub features_out: usize,
    /// Distinct non-null names.
    pub unique_names: usize,
}

/// Keep only `field` (renamed to `name`) and the geometry of every feature,
/// dropping exact duplicates.
pub fn clean_districts(text: &str, field: &str) -> Result<(FeatureCollection, CleanReport)> {
    let geojson: GeoJson = text.parse().context("Invalid GeoJSON")?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        bail!("Expected a FeatureCollection");
    };

    let features_in = collection.features.len();
    let mut seen: Vec<(Value, Option<Geometry>)> = Vec::with_capacity(features_in);
    let mut missing = 0usize;

    for feature in collection.features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(field))
            .cloned()
            .unwrap_or(Value::Null);
        if name.is_null() {
            missing += 1;
        }
        let key = (name, feature.geometry);
        if !seen.contains(&key) {
            seen.push(key);
        }
    }

    if missing > 0 {
        warn!(field, missing, "Features without a name value");
    }

    let unique_names = seen
        .iter()
        .filter_map(|(name, _)| (!name.is_null()).then(|| name.to_string()))
        .collect::<BTreeSet<_>>()
        .len();

    let features: Vec<Feature> = seen
        .into_iter()
        .map(|(name, geometry)| {
            let mut properties = JsonObject::new();
            properties.insert(OUTPUT_NAME_FIELD.to_string(), name);
            Feature {
                bbox: None,
                geometry,
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    // Carry the legacy CRS member so projected sources stay readable
    let foreign_members = collection
        .foreign_members
        .and_then(|members| members.get("crs").cloned())
        .map(|crs| {
            let mut members = JsonObject::new();
            members.insert("crs".to_string(), crs);
            members
        });

    let report = CleanReport {
        features_in,
        features_out: features.len(),
        unique_names,
    };

    Ok((
        FeatureCollection {
            bbox: None,
            features,
            foreign_members,
        },
        report,
    ))
}

/// Clean `input` into `output`.
pub fn clean_districts_file(input: &Path, output: &Path, field: &str) -> Result<CleanReport> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let (collection, report) = clean_districts(&text, field)
        .with_context(|| format!("Failed to clean {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, GeoJson::FeatureCollection(collection).to_string())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        features_in = report.features_in,
        features_out = report.features_out,
        "Cleaned district boundaries"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square(offset: f64) -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[
                [offset, 0.0], [offset + 1.0, 0.0], [offset + 1.0, 1.0], [offset, 0.0]
            ]]
        })
    }

    fn collection(features: Vec<Value>) -> String {
        json!({"type": "FeatureCollection", "features": features}).to_string()
    }

    fn feature(props: Value, geometry: Value) -> Value {
        json!({"type": "Feature", "properties": props, "geometry": geometry})
    }

    #[test]
    fn test_keeps_only_name() {
        let text = collection(vec![feature(
            json!({"NAME_2": "Bogra", "GID_2": "BGD.1", "NAME_1": "Rajshahi"}),
            square(0.0),
        )]);

        let (fc, report) = clean_districts(&text, DEFAULT_NAME_FIELD).unwrap();

        let props = fc.features[0].properties.as_ref().unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props["name"], "Bogra");
        assert!(fc.features[0].geometry.is_some());
        assert_eq!(report.unique_names, 1);
    }

    #[test]
    fn test_same_name_different_geometry_is_kept() {
        let text = collection(vec![
            feature(json!({"NAME_2": "Bogra"}), square(0.0)),
            feature(json!({"NAME_2": "Bogra"}), square(5.0)),
            feature(json!({"NAME_2": "Bogra"}), square(0.0)),
        ]);

        let (fc, report) = clean_districts(&text, DEFAULT_NAME_FIELD).unwrap();

        assert_eq!(fc.features.len(), 2);
        assert_eq!(
            report,
            CleanReport {
                features_in: 3,
                features_out: 2,
                unique_names: 1
            }
        );
    }

    #[test]
    fn test_missing_names_are_not_counted() {
        let text = collection(vec![
            feature(json!({"NAME_2": null}), square(0.0)),
            feature(json!({"other": "x"}), square(1.0)),
        ]);

        let (fc, report) = clean_districts(&text, DEFAULT_NAME_FIELD).unwrap();

        assert_eq!(fc.features.len(), 2);
        assert_eq!(report.unique_names, 0);
        assert!(fc.features[0].properties.as_ref().unwrap()["name"].is_null());
    }

    #[test]
    fn test_crs_member_is_carried() {
        let text = json!({
            "type": "FeatureCollection",
            "crs": {"type": "name", "properties": {"name": "EPSG:3857"}},
            "name": "gadm41_BGD_2",
            "features": [feature(json!({"NAME_2": "Bogra"}), square(0.0))]
        })
        .to_string();

        let (fc, _) = clean_districts(&text, DEFAULT_NAME_FIELD).unwrap();

        let members = fc.foreign_members.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members["crs"]["properties"]["name"], "EPSG:3857");
    }

    #[test]
    fn test_rejects_non_collections() {
        let text = feature(json!({"NAME_2": "Bogra"}), square(0.0)).to_string();
        assert!(clean_districts(&text, DEFAULT_NAME_FIELD).is_err());
        assert!(clean_districts("not json", DEFAULT_NAME_FIELD).is_err());
    }
}
