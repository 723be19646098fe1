//! CF-convention time coordinate decoding.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Output format for decoded timestamps (ISO-8601 without offset).
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The time coordinate of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    /// Raw coordinate values, in `units`.
    pub values: Vec<f64>,
    /// CF units string such as `hours since 2025-10-03 00:00:00`.
    pub units: Option<String>,
}

impl TimeAxis {
    pub fn new(values: Vec<f64>, units: Option<String>) -> Self {
        Self { values, units }
    }

    /// A single unlabelled step, used for files without a time dimension.
    pub fn single() -> Self {
        Self::new(vec![0.0], None)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Decode the timestamp of step `index`.
    pub fn datetime(&self, index: usize) -> Option<NaiveDateTime> {
        let value = *self.values.get(index)?;
        let (step, epoch) = parse_cf_units(self.units.as_deref()?)?;
        offset(epoch, step, value)
    }

    /// Label for step `index`: ISO-8601 when decodable, the raw value otherwise.
    pub fn label(&self, index: usize) -> String {
        match self.datetime(index) {
            Some(dt) => dt.format(ISO_FORMAT).to_string(),
            None => self
                .values
                .get(index)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStep {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeStep {
    fn parse(unit: &str) -> Option<Self> {
        match unit.to_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(TimeStep::Seconds),
            "min" | "mins" | "minute" | "minutes" => Some(TimeStep::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(TimeStep::Hours),
            "d" | "day" | "days" => Some(TimeStep::Days),
            _ => None,
        }
    }

    fn seconds(&self) -> f64 {
        match self {
            TimeStep::Seconds => 1.0,
            TimeStep::Minutes => 60.0,
            TimeStep::Hours => 3600.0,
            TimeStep::Days => 86400.0,
        }
    }
}

/// Parse a `"<unit> since <epoch>"` string.
pub fn parse_cf_units(units: &str) -> Option<(TimeStep, NaiveDateTime)> {
    let (unit, epoch) = units.split_once(" since ")?;
    let step = TimeStep::parse(unit.trim())?;
    let epoch = parse_epoch(epoch)?;
    Some((step, epoch))
}

fn parse_epoch(epoch: &str) -> Option<NaiveDateTime> {
    let epoch = epoch
        .trim()
        .trim_end_matches('Z')
        .trim_end_matches(" UTC")
        .trim();

    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(epoch, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(epoch, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn offset(epoch: NaiveDateTime, step: TimeStep, value: f64) -> Option<NaiveDateTime> {
    let millis = (value * step.seconds() * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = Duration::try_milliseconds(millis as i64)?;
    epoch.checked_add_signed(delta)
}
