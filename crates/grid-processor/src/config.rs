//! Names of the forecast variables read by the aggregator.

use serde::{Deserialize, Serialize};

/// Dataset variable names for each summarized quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableNames {
    /// Hourly rainfall (required).
    pub rain: String,

    /// Lightning probability.
    pub lightning: String,

    /// Hail threat probability.
    pub hail: String,

    /// Probability of 10 m wind above 20 kt.
    pub wind20kt: String,

    /// Mean air temperature in Kelvin.
    pub mean_temp: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            rain: "Total_precipitation_surface_43_Hour_Accumulation".to_string(),
            lightning: "Probability_of_lightning_surface".to_string(),
            hail: "Probability_of_hail_threat_surface".to_string(),
            wind20kt: "Probability_of_max_10m_wind_speed_gt_20kt_surface".to_string(),
            mean_temp: "Mean_air_temperature_surface".to_string(),
        }
    }
}

impl VariableNames {
    /// Load overrides from `VAR_RAIN`, `VAR_LIGHTNING`, `VAR_HAIL`,
    /// `VAR_WIND20KT` and `VAR_MEAN_TEMP`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut names = Self::default();

        let fields: [(&str, &mut String); 5] = [
            ("VAR_RAIN", &mut names.rain),
            ("VAR_LIGHTNING", &mut names.lightning),
            ("VAR_HAIL", &mut names.hail),
            ("VAR_WIND20KT", &mut names.wind20kt),
            ("VAR_MEAN_TEMP", &mut names.mean_temp),
        ];
        for (key, field) in fields {
            if let Some(val) = lookup(key) {
                *field = val;
            }
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let names = VariableNames::default();
        assert_eq!(names.rain, "Total_precipitation_surface_43_Hour_Accumulation");
        assert_eq!(names.mean_temp, "Mean_air_temperature_surface");
    }

    #[test]
    fn test_lookup_overrides() {
        let names = VariableNames::from_lookup(|key| match key {
            "VAR_RAIN" => Some("rain".to_string()),
            "VAR_HAIL" => Some("hail".to_string()),
            _ => None,
        });
        assert_eq!(names.rain, "rain");
        assert_eq!(names.hail, "hail");
        assert_eq!(names.lightning, VariableNames::default().lightning);
    }
}
