//! Per-season derived metrics, normalized so seasons are comparable.
//!
//! Each metric reads a scraped table from `data/{year}/` and writes its own
//! `{metric}_{year}.csv` next to it. Four factors drop the league average
//! row before normalizing; the rating metrics keep it.

pub mod four_factors;
pub mod nrtg;
pub mod srs;

use clap::ValueEnum;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::Result;
use crate::frame;

pub const LEAGUE_AVERAGE: &str = "League Average";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormMethod {
    /// `(x - mean) / sample std`
    #[default]
    #[value(name = "zscore")]
    ZScore,
    /// `(x - min) / (max - min)`
    #[value(name = "min-max")]
    MinMax,
    /// `x - mean`
    #[value(name = "centered")]
    Centered,
}

impl NormMethod {
    /// Normalize present values; missing stay missing, degenerate spreads
    /// (zero std, max == min) give missing.
    pub fn apply(self, xs: &[Option<f64>]) -> Vec<Option<f64>> {
        let Some(m) = mean(xs) else {
            return vec![None; xs.len()];
        };
        let f: Box<dyn Fn(f64) -> f64> = match self {
            NormMethod::ZScore => {
                let sd = sample_std(xs).unwrap_or(f64::NAN);
                Box::new(move |x| (x - m) / sd)
            }
            NormMethod::MinMax => {
                let present = xs.iter().flatten().copied();
                let lo = present.clone().fold(f64::INFINITY, f64::min);
                let hi = present.fold(f64::NEG_INFINITY, f64::max);
                Box::new(move |x| (x - lo) / (hi - lo))
            }
            NormMethod::Centered => Box::new(move |x| x - m),
        };
        xs.iter()
            .map(|x| x.map(&f).filter(|v| v.is_finite()))
            .collect()
    }
}

pub fn mean(xs: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = xs.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

/// Sample standard deviation (n - 1), ignoring missing values.
pub fn sample_std(xs: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = xs.iter().flatten().copied().collect();
    if present.len() < 2 {
        return None;
    }
    let m = present.iter().sum::<f64>() / present.len() as f64;
    let var = present.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (present.len() - 1) as f64;
    Some(var.sqrt())
}

/// `x / std(x)`; missing when the spread is zero or undefined.
pub fn scale_by_std(xs: &[Option<f64>]) -> Vec<Option<f64>> {
    let sd = sample_std(xs).unwrap_or(f64::NAN);
    xs.iter()
        .map(|x| x.map(|x| x / sd).filter(|v| v.is_finite()))
        .collect()
}

pub fn win_pct(w: Option<f64>, l: Option<f64>) -> Option<f64> {
    match (w, l) {
        (Some(w), Some(l)) if w + l > 0.0 => Some(w / (w + l)),
        _ => None,
    }
}

/// Remove the league-wide summary row so it does not skew the spread.
pub fn drop_league_average(df: &DataFrame) -> Result<DataFrame> {
    frame::column(df, "Team")?;
    let out = df
        .clone()
        .lazy()
        .filter(col("Team").neq(lit(LEAGUE_AVERAGE)))
        .collect()?;
    Ok(out)
}

/// Run one metric stage over a span of years, skipping recoverable failures.
pub fn for_each_year<F>(
    stage: &str,
    years: impl IntoIterator<Item = i32>,
    mut run: F,
) -> Result<Vec<PathBuf>>
where
    F: FnMut(i32) -> Result<PathBuf>,
{
    let mut written = Vec::new();
    for year in years {
        match run(year) {
            Ok(path) => {
                info!(stage, year, path = %path.display(), "saved");
                written.push(path);
            }
            Err(err) if err.is_recoverable() => {
                warn!(stage, year, error = %err, "skipping year");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.map_or(false, |a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn zscore_uses_sample_std() {
        let z = NormMethod::ZScore.apply(&[Some(1.0), Some(2.0), Some(3.0), None]);
        assert!(close(z[0], -1.0));
        assert!(close(z[1], 0.0));
        assert!(close(z[2], 1.0));
        assert_eq!(z[3], None);
    }

    #[test]
    fn min_max_and_centered() {
        let xs = [Some(10.0), Some(20.0), Some(15.0)];
        let mm = NormMethod::MinMax.apply(&xs);
        assert!(close(mm[0], 0.0) && close(mm[1], 1.0) && close(mm[2], 0.5));
        let c = NormMethod::Centered.apply(&xs);
        assert!(close(c[0], -5.0) && close(c[1], 5.0) && close(c[2], 0.0));
    }

    #[test]
    fn degenerate_spread_gives_missing() {
        assert_eq!(NormMethod::ZScore.apply(&[Some(2.0), Some(2.0)]), vec![None, None]);
        assert_eq!(NormMethod::MinMax.apply(&[Some(2.0), Some(2.0)]), vec![None, None]);
        assert_eq!(scale_by_std(&[Some(4.0)]), vec![None]);
    }

    #[test]
    fn league_average_row_is_removed() -> anyhow::Result<()> {
        let df = df!(
            "Team" => ["A", LEAGUE_AVERAGE, "B"],
            "NRtg" => [3.0, 0.0, -3.0],
        )?;
        let out = drop_league_average(&df)?;
        assert_eq!(frame::str_values(&out, "Team")?, vec![Some("A".into()), Some("B".into())]);
        assert!(drop_league_average(&df.drop("Team")?).is_err());
        Ok(())
    }

    #[test]
    fn stage_loop_skips_recoverable_and_stops_on_config() {
        let written = for_each_year("test", 2000..=2002, |y| {
            if y == 2001 {
                Err(ScrapeError::MissingFile(PathBuf::from("adv_2001.csv")))
            } else {
                Ok(PathBuf::from(format!("{}", y)))
            }
        })
        .unwrap();
        assert_eq!(written.len(), 2);

        let err = for_each_year("test", 2000..=2002, |_| -> Result<PathBuf> {
            Err(ScrapeError::config("bad"))
        })
        .unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn win_pct_needs_both_counts() {
        assert!(close(win_pct(Some(60.0), Some(22.0)), 60.0 / 82.0));
        assert_eq!(win_pct(None, Some(22.0)), None);
    }
}
