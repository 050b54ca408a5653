//! Time-series acquisition behind a pluggable provider, keyed by the data
//! source configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::{
    config::DataSourceConfig,
    foundation::error::{ChartError, ChartResult},
    model::{RawPoint, TimeSeries},
};

pub trait DataProvider {
    /// Load every series the source names. Series order follows first
    /// appearance in the underlying data.
    fn load(&self, source: &DataSourceConfig) -> ChartResult<Vec<TimeSeries>>;
}

/// Reads `series,date,value` CSV rows (ISO dates, one cumulative value per
/// row) from the file the data source names, relative to a base directory.
#[derive(Clone, Debug)]
pub struct CsvDataProvider {
    base_dir: PathBuf,
}

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    series: String,
    date: NaiveDate,
    value: f64,
}

impl CsvDataProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl DataProvider for CsvDataProvider {
    fn load(&self, source: &DataSourceConfig) -> ChartResult<Vec<TimeSeries>> {
        let path = self.base_dir.join(&source.file);
        let mut reader = csv::Reader::from_path(&path)
            .with_context(|| format!("open data file '{}'", path.display()))?;

        let mut grouped: Vec<(String, Vec<RawPoint>)> = Vec::new();
        for row in reader.deserialize() {
            let row: CsvRow =
                row.with_context(|| format!("parse data file '{}'", path.display()))?;
            let point = RawPoint {
                date: row.date,
                value: row.value,
            };
            match grouped.iter_mut().find(|(name, _)| *name == row.series) {
                Some((_, points)) => points.push(point),
                None => grouped.push((row.series, vec![point])),
            }
        }

        grouped
            .into_iter()
            .map(|(name, points)| TimeSeries::new(name, points))
            .collect()
    }
}

/// Narrow a data source to the series whose codes are listed. Unknown codes
/// fail resolution rather than silently rendering fewer series.
pub fn filter_series(source: &DataSourceConfig, codes: &[String]) -> ChartResult<DataSourceConfig> {
    for code in codes {
        if !source.series.iter().any(|s| &s.code == code) {
            return Err(ChartError::config(format!(
                "series not found in data source: {code}"
            )));
        }
    }
    let mut filtered = source.clone();
    filtered.series.retain(|s| codes.contains(&s.code));
    Ok(filtered)
}

/// Convenience used at startup to build a provider rooted next to the
/// configuration file.
pub fn provider_for_config(config_path: &Path) -> CsvDataProvider {
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    CsvDataProvider::new(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeriesConfig;
    use std::io::Write as _;

    fn source(file: &Path) -> DataSourceConfig {
        DataSourceConfig {
            title: "t".into(),
            file: file.to_path_buf(),
            series: vec![
                SeriesConfig {
                    name: "Alpha".into(),
                    code: "AL".into(),
                    color: "#111111".into(),
                },
                SeriesConfig {
                    name: "Beta".into(),
                    code: "BE".into(),
                    color: "#222222".into(),
                },
            ],
        }
    }

    fn write_csv(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("data.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "series,date,value").unwrap();
        write!(f, "{body}").unwrap();
        path
    }

    #[test]
    fn loads_and_groups_series_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(
            dir.path(),
            "Beta,2024-03-01,5\nAlpha,2024-03-01,1\nBeta,2024-03-02,9\n",
        );
        let provider = CsvDataProvider::new(dir.path());
        let series = provider
            .load(&source(Path::new("data.csv")))
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Beta");
        assert_eq!(series[0].points().len(), 2);
        assert_eq!(series[1].name, "Alpha");
        assert_eq!(series[1].points()[0].value, 1.0);
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "Alpha,2024-03-05,5\nAlpha,2024-03-01,1\n");
        let provider = CsvDataProvider::new(dir.path());
        let err = provider.load(&source(Path::new("data.csv"))).unwrap_err();
        assert!(err.to_string().contains("not ordered by date"));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvDataProvider::new(dir.path());
        let err = provider
            .load(&source(Path::new("absent.csv")))
            .unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn filter_keeps_only_named_codes() {
        let src = source(Path::new("data.csv"));
        let filtered = filter_series(&src, &["BE".to_string()]).unwrap();
        assert_eq!(filtered.series.len(), 1);
        assert_eq!(filtered.series[0].code, "BE");
    }

    #[test]
    fn filter_rejects_unknown_codes() {
        let src = source(Path::new("data.csv"));
        let err = filter_series(&src, &["XX".to_string()]).unwrap_err();
        assert!(err.to_string().contains("series not found in data source: XX"));
    }
}
