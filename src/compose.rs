//! Merge per-season metric files into model-ready datasets.

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::assemble::clean_team_column;
use crate::cli::YearRange;
use crate::config::{load_yaml, year_file};
use crate::error::{Result, ScrapeError};
use crate::frame::{self, JoinKind};
use crate::metrics::{four_factors, nrtg, srs};

pub const TRAIN_FILE: &str = "train_data.csv";
pub const TEST_FILE: &str = "test_data.csv";
pub const DATA_FILE: &str = "data.csv";
/// Per-season merged file, `data_{year}.csv`.
pub const YEAR_STEM: &str = "data";

/// Carries the first source's row order through the joins.
const ROW_ORDER: &str = "__row";

static SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})\s*-\s*(\d{4})\s*$").expect("year span regex"));

/// One per-season input file and the columns taken from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub stem: String,
    pub columns: Vec<String>,
}

impl Source {
    fn new(stem: &str, columns: &[&str]) -> Self {
        Self {
            stem: stem.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Merged in order; every source must carry `Team`.
    pub sources: Vec<Source>,
    pub features: Vec<String>,
    pub responses: Vec<String>,
    pub join: JoinKind,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        let s = |v: &[&str]| v.iter().map(|c| c.to_string()).collect();
        Self {
            sources: vec![
                Source::new(four_factors::STEM, &["Team", four_factors::FOUR_FACTOR_SCORE]),
                Source::new(nrtg::STEM, &["Team", "W", "L", "W/L%", nrtg::NRTG_NORM]),
                Source::new(srs::STEM, &["Team", srs::SRS_NORM]),
            ],
            features: s(&[four_factors::FOUR_FACTOR_SCORE, nrtg::NRTG_NORM, srs::SRS_NORM]),
            responses: s(&["W", "L", "W/L%"]),
            join: JoinKind::Inner,
        }
    }
}

impl ComposeConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let cfg: Self = load_yaml(path.as_ref())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(ScrapeError::config("compose config lists no sources"));
        }
        if let Some(bad) = self.sources.iter().find(|s| !s.columns.iter().any(|c| c == "Team")) {
            return Err(ScrapeError::config(format!(
                "source '{}' must select the Team column",
                bad.stem
            )));
        }
        Ok(())
    }

    /// Features first, then responses.
    pub fn output_columns(&self) -> Vec<&str> {
        self.features
            .iter()
            .chain(&self.responses)
            .map(String::as_str)
            .collect()
    }
}

/// Parse `"2000-2020"` into a validated range.
pub fn parse_span(text: &str) -> Result<YearRange> {
    let caps = SPAN
        .captures(text)
        .ok_or_else(|| ScrapeError::config(format!("year span '{}' is not START-END", text)))?;
    let year = |i: usize| -> Result<i32> {
        caps[i]
            .parse()
            .map_err(|e| ScrapeError::config(format!("year span '{}': {}", text, e)))
    };
    YearRange::new(year(1)?, year(2)?)
}

/// Merge every configured source for one season on the cleaned `Team`.
///
/// Rows keep the order of the first source. Any absent source fails the
/// whole season with `MissingFile`.
#[instrument(level = "debug", skip(data_dir, config))]
pub fn merge_year(data_dir: &Path, year: i32, config: &ComposeConfig) -> Result<DataFrame> {
    let mut merged: Option<LazyFrame> = None;
    for source in &config.sources {
        let mut df = frame::select(&frame::read_csv(year_file(data_dir, year, &source.stem))?, &source.columns)?;
        clean_team_column(&mut df)?;
        let lf = df.lazy();
        merged = Some(match merged {
            None => lf.with_row_index(ROW_ORDER, None),
            Some(acc) => acc.join(lf, [col("Team")], [col("Team")], JoinArgs::new(config.join.into())),
        });
    }
    let merged = merged.ok_or_else(|| ScrapeError::config("compose config lists no sources"))?;
    let df = merged
        .sort([ROW_ORDER], SortMultipleOptions::default())
        .collect()?
        .drop(ROW_ORDER)?;
    Ok(df)
}

/// Merged season projected onto features and responses, optionally also
/// persisting the full merge (with `Team`) as `data_{year}.csv`.
pub fn assemble_year(data_dir: &Path, year: i32, config: &ComposeConfig, write: bool) -> Result<DataFrame> {
    let mut merged = merge_year(data_dir, year, config)?;
    if write {
        let path = year_file(data_dir, year, YEAR_STEM);
        frame::write_csv(&mut merged, &path)?;
        info!(year, rows = merged.height(), path = %path.display(), "season dataset written");
    }
    frame::select(&merged, &config.output_columns())
}

/// Stack the seasons of `years`; seasons with missing inputs are skipped.
pub fn compose_range(
    data_dir: &Path,
    years: YearRange,
    config: &ComposeConfig,
    write: bool,
) -> Result<Option<DataFrame>> {
    let mut frames = Vec::new();
    for year in years {
        match assemble_year(data_dir, year, config, write) {
            Ok(df) => frames.push(df),
            Err(err) if err.is_recoverable() => {
                warn!(year, error = %err, "failed to assemble season, skipping");
            }
            Err(err) => return Err(err),
        }
    }
    if frames.is_empty() {
        return Ok(None);
    }
    frame::stack(frames).map(Some)
}

/// Which datasets to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetPlan {
    /// `train_data.csv` and `test_data.csv`.
    TrainTest { train: YearRange, test: YearRange },
    /// One `data.csv` over the whole span.
    Single(YearRange),
}

/// Build the planned datasets under `data_dir`; returns the files written.
pub fn build(plan: DatasetPlan, data_dir: &Path, config: &ComposeConfig, write: bool) -> Result<Vec<PathBuf>> {
    let targets: Vec<(YearRange, &str)> = match plan {
        DatasetPlan::TrainTest { train, test } => vec![(train, TRAIN_FILE), (test, TEST_FILE)],
        DatasetPlan::Single(range) => vec![(range, DATA_FILE)],
    };

    let mut written = Vec::new();
    for (range, file) in targets {
        match compose_range(data_dir, range, config, write)? {
            Some(mut df) => {
                let path = data_dir.join(file);
                frame::write_csv(&mut df, &path)?;
                info!(rows = df.height(), path = %path.display(), "dataset saved");
                written.push(path);
            }
            None => warn!(
                file,
                start = range.start(),
                end = range.end(),
                "no seasons assembled, nothing to save"
            ),
        }
    }
    Ok(written)
}
