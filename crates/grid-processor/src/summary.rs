//! Day-1 district summaries.

use std::collections::BTreeSet;

use chrono::{SecondsFormat, Utc};
use districts::{DistrictPolygon, DistrictRegistry};
use netcdf_parser::{GridVariable, GriddedDataset};
use serde::Serialize;
use tracing::{debug, warn};

use crate::clip::{ClipMean, DistrictMask};
use crate::config::VariableNames;
use crate::error::{GridProcessorError, Result};
use crate::reduce::{reduce_window, TimeReduction};

/// Number of hourly steps in the day-1 window.
pub const DAY1_WINDOW: usize = 24;

/// Kelvin to Celsius offset, applied to temperatures unconditionally.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Per-district day-1 calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictSummary {
    pub district: String,
    /// RFC 3339 UTC timestamp of when the summary was computed.
    pub generated_at: String,
    pub total_rain_mm: f64,
    pub max_prob_lightning_pct: Option<f64>,
    pub max_prob_hail_pct: Option<f64>,
    pub max_prob_wind20kt_pct: Option<f64>,
    pub mean_temp_c: Option<f64>,
    pub hourly: Vec<HourlyRecord>,
    /// Some clip fell back to the whole-grid mean.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

/// One hour of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub time: String,
    pub rain_mm: f64,
    pub lightning_prob: Option<f64>,
    pub hail_prob: Option<f64>,
    pub wind20kt_prob: Option<f64>,
    pub temp_c: Option<f64>,
}

/// Summarize `dataset` over the district called `district_name`.
///
/// Rainfall is required; any other variable missing from the dataset leaves
/// its fields `None`.
pub fn summarize(
    dataset: &GriddedDataset,
    registry: &DistrictRegistry,
    district_name: &str,
    names: &VariableNames,
) -> Result<DistrictSummary> {
    let district = registry.find(district_name)?;
    summarize_district(dataset, district, names)
}

/// Summarize `dataset` over an already resolved district.
pub fn summarize_district(
    dataset: &GriddedDataset,
    district: &DistrictPolygon,
    names: &VariableNames,
) -> Result<DistrictSummary> {
    debug!(variables = ?dataset.variable_names(), "Available variables");

    let rain = dataset
        .variable(&names.rain)
        .ok_or_else(|| GridProcessorError::missing_variable(&names.rain))?;
    let lightning = dataset.variable(&names.lightning);
    let hail = dataset.variable(&names.hail);
    let wind = dataset.variable(&names.wind20kt);
    let temp = dataset.variable(&names.mean_temp);

    let mut clipper = Clipper {
        mask: DistrictMask::new(dataset.x(), dataset.y(), district.geometry()),
        district: district.name(),
        warned: BTreeSet::new(),
    };

    let total_rain_mm = clipper.window(rain, TimeReduction::Sum);
    let max_prob_lightning_pct = lightning.map(|v| clipper.max_percent(v));
    let max_prob_hail_pct = hail.map(|v| clipper.max_percent(v));
    let max_prob_wind20kt_pct = wind.map(|v| clipper.max_percent(v));
    let mean_temp_c =
        temp.map(|v| round2(clipper.window(v, TimeReduction::Mean) - KELVIN_OFFSET));

    // Static variables repeat their single slice across the time axis
    let hours = dataset.time_steps().min(DAY1_WINDOW);
    let hourly = (0..hours)
        .map(|t| HourlyRecord {
            time: dataset.time().label(t),
            rain_mm: clipper.hour(rain, t),
            lightning_prob: lightning.map(|v| clipper.hour(v, t)),
            hail_prob: hail.map(|v| clipper.hour(v, t)),
            wind20kt_prob: wind.map(|v| clipper.hour(v, t)),
            temp_c: temp.map(|v| clipper.hour(v, t) - KELVIN_OFFSET),
        })
        .collect();

    debug!(
        district = district.name(),
        hours,
        degraded = clipper.is_degraded(),
        "Summarized district"
    );

    Ok(DistrictSummary {
        district: district.name().to_string(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        total_rain_mm,
        max_prob_lightning_pct,
        max_prob_hail_pct,
        max_prob_wind20kt_pct,
        mean_temp_c,
        hourly,
        degraded: clipper.is_degraded(),
    })
}

/// A fraction (≤ 1) becomes a percentage; larger values are taken as
/// percentages already. Both are rounded to 2 decimals.
pub fn to_percent(value: f64) -> f64 {
    if value <= 1.0 {
        round2(value * 100.0)
    } else {
        round2(value)
    }
}

/// Round half away from zero to 2 decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clips variables to one district and remembers which ones fell back.
struct Clipper<'a> {
    mask: DistrictMask,
    district: &'a str,
    warned: BTreeSet<String>,
}

impl Clipper<'_> {
    /// Reduce the day-1 window across time, then clip and average.
    fn window(&mut self, var: &GridVariable, reduction: TimeReduction) -> f64 {
        let reduced = reduce_window(var, DAY1_WINDOW, reduction);
        let result = self.mask.clip_mean(&reduced, var.crs());
        self.record(var, result)
    }

    fn max_percent(&mut self, var: &GridVariable) -> f64 {
        to_percent(self.window(var, TimeReduction::Max))
    }

    /// Clip and average one time step. Variables without a time axis repeat
    /// their single step.
    fn hour(&mut self, var: &GridVariable, t: usize) -> f64 {
        let step = t.min(var.time_steps().saturating_sub(1));
        let result = self.mask.clip_mean(var.slice(step), var.crs());
        self.record(var, result)
    }

    fn record(&mut self, var: &GridVariable, result: ClipMean) -> f64 {
        if let Some(reason) = result.fallback {
            if self.warned.insert(var.name().to_string()) {
                warn!(
                    district = self.district,
                    variable = var.name(),
                    reason = %reason,
                    "Clip failed, using whole-grid mean"
                );
            }
        }
        result.value
    }

    fn is_degraded(&self) -> bool {
        !self.warned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_percent_fraction() {
        assert_eq!(to_percent(0.0), 0.0);
        assert_eq!(to_percent(0.4567), 45.67);
        assert_eq!(to_percent(1.0), 100.0);
    }

    #[test]
    fn test_to_percent_already_percent() {
        assert_eq!(to_percent(1.004), 1.0);
        assert_eq!(to_percent(37.123), 37.12);
    }

    #[test]
    fn test_to_percent_nan_passes_through() {
        assert!(to_percent(f64::NAN).is_nan());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(24.8549), 24.85);
        assert_eq!(round2(-0.004), -0.0);
        assert_eq!(round2(25.0), 25.0);
    }

    #[test]
    fn test_degraded_flag_is_omitted_when_false() {
        let summary = DistrictSummary {
            district: "Dhaka".to_string(),
            generated_at: "2025-10-03T00:00:00.000000+00:00".to_string(),
            total_rain_mm: 1.5,
            max_prob_lightning_pct: None,
            max_prob_hail_pct: Some(12.5),
            max_prob_wind20kt_pct: None,
            mean_temp_c: None,
            hourly: vec![],
            degraded: false,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("degraded").is_none());
        assert!(json["max_prob_lightning_pct"].is_null());

        let json = serde_json::to_value(DistrictSummary {
            degraded: true,
            ..summary
        })
        .unwrap();
        assert_eq!(json["degraded"], true);
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let record = HourlyRecord {
            time: "2025-10-03T00:00:00".to_string(),
            rain_mm: f64::NAN,
            lightning_prob: Some(f64::NAN),
            hail_prob: None,
            wind20kt_prob: None,
            temp_c: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["rain_mm"].is_null());
        assert!(json["lightning_prob"].is_null());
    }
}
