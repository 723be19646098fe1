//! Forecast run file naming: `<prefix>_<YYYYMMDDHHMM>_hourly_latlon.<ext>`.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

const STAMP_FORMAT: &str = "%Y%m%d%H%M";
const SUFFIX: &str = "_hourly_latlon";

/// Product prefix of HIWAT ensemble files.
pub const HIWAT_PREFIX: &str = "hkhEnsemble";

/// A recognised run file in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFile {
    pub path: PathBuf,
    pub prefix: String,
    /// Model initialisation time (UTC).
    pub run_time: NaiveDateTime,
}

/// Split a run file name into prefix and run time.
pub fn parse_run_file_name(name: &str) -> Option<(String, NaiveDateTime)> {
    let (stem, _ext) = name.rsplit_once('.')?;
    let stem = stem.strip_suffix(SUFFIX)?;
    let (prefix, stamp) = stem.rsplit_once('_')?;
    if prefix.is_empty() || stamp.len() != 12 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let run_time = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()?;
    Some((prefix.to_string(), run_time))
}

/// Build the NetCDF file name for a run.
pub fn run_file_name(prefix: &str, run_time: NaiveDateTime) -> String {
    format!("{}_{}{}.nc", prefix, run_time.format(STAMP_FORMAT), SUFFIX)
}

impl RunFile {
    /// Recognise `path` by its file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let (prefix, run_time) = parse_run_file_name(name)?;
        Some(Self {
            path: path.to_path_buf(),
            prefix,
            run_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn run_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_hiwat_name() {
        let (prefix, time) =
            parse_run_file_name("hkhEnsemble_202510030000_hourly_latlon.nc").unwrap();
        assert_eq!(prefix, "hkhEnsemble");
        assert_eq!(time, run_time());
    }

    #[test]
    fn test_run_file_name() {
        assert_eq!(
            run_file_name(HIWAT_PREFIX, run_time()),
            "hkhEnsemble_202510030000_hourly_latlon.nc"
        );
    }

    #[test]
    fn test_prefix_may_contain_underscores() {
        let (prefix, _) =
            parse_run_file_name("hkh_ensemble_v2_202510031200_hourly_latlon.nc4").unwrap();
        assert_eq!(prefix, "hkh_ensemble_v2");
    }

    #[test]
    fn test_unrecognised_names() {
        for name in [
            "hkhEnsemble_202510030000_hourly_latlon",
            "hkhEnsemble_202510030000.nc",
            "hkhEnsemble_2025100300_hourly_latlon.nc",
            "hkhEnsemble_202513030000_hourly_latlon.nc",
            "_202510030000_hourly_latlon.nc",
            "notes.txt",
        ] {
            assert!(parse_run_file_name(name).is_none(), "{name}");
        }
    }

    #[test]
    fn test_from_path() {
        let run = RunFile::from_path(Path::new("/data/hkhEnsemble_202510030000_hourly_latlon.nc"))
            .unwrap();
        assert_eq!(run.prefix, "hkhEnsemble");
        assert_eq!(run.path, PathBuf::from("/data/hkhEnsemble_202510030000_hourly_latlon.nc"));
    }
}
