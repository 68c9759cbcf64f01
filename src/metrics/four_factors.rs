//! Dean Oliver's four factors, normalized and folded into one score.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use super::{drop_league_average, win_pct, NormMethod};
use crate::assemble::TableKind;
use crate::config::{year_file, FourFactorWeights};
use crate::error::Result;
use crate::frame::{self, round_to};

pub const STEM: &str = "four_factors";
pub const OFFENSIVE_SCORE: &str = "Offensive Score";
pub const DEFENSIVE_SCORE: &str = "Defensive Score";
pub const FOUR_FACTOR_SCORE: &str = "Four-Factor Score";

const PLACES: i32 = 6;

/// Build the four-factor table from an advanced-stats frame.
pub fn compute(adv: &DataFrame, method: NormMethod, weights: &FourFactorWeights) -> Result<DataFrame> {
    let adv = drop_league_average(adv)?;

    let mut out = frame::select(&adv, &["Team", "W", "L"])?;
    let wins = frame::f64_values(&adv, "W")?;
    let losses = frame::f64_values(&adv, "L")?;
    let pct = wins
        .iter()
        .zip(&losses)
        .map(|(w, l)| win_pct(*w, *l).map(|p| round_to(p, PLACES)))
        .collect();
    out.with_column(frame::float_column("W/L%", pct))?;

    // 1) normalize each factor column independently
    for name in weights.factor_names() {
        let normalized: Vec<Option<f64>> = method
            .apply(&frame::f64_values(&adv, name)?)
            .into_iter()
            .map(|v| v.map(|v| round_to(v, PLACES)))
            .collect();
        out.with_column(frame::float_column(name, normalized))?;
    }

    // 2) weighted sums over the rounded factors
    let offensive = weighted_sum(&out, &weights.offensive)?;
    let defensive = weighted_sum(&out, &weights.defensive)?;
    let total: Vec<Option<f64>> = offensive
        .iter()
        .zip(&defensive)
        .map(|(o, d)| Some(round_to((*o)? + (*d)?, PLACES)))
        .collect();

    out.with_column(frame::float_column(OFFENSIVE_SCORE, offensive))?;
    out.with_column(frame::float_column(DEFENSIVE_SCORE, defensive))?;
    out.with_column(frame::float_column(FOUR_FACTOR_SCORE, total))?;
    Ok(out)
}

fn weighted_sum(df: &DataFrame, weights: &[(String, f64)]) -> Result<Vec<Option<f64>>> {
    let columns = weights
        .iter()
        .map(|(name, w)| -> Result<(Vec<Option<f64>>, f64)> { Ok((frame::f64_values(df, name)?, *w)) })
        .collect::<Result<Vec<_>>>()?;
    let scores = (0..df.height())
        .map(|i| {
            let mut acc = 0.0;
            for (values, w) in &columns {
                acc += values[i]? * w;
            }
            Some(round_to(acc, PLACES))
        })
        .collect();
    Ok(scores)
}

/// `adv_{year}.csv` → `four_factors_{year}.csv`.
#[instrument(level = "debug", skip(data_dir, weights))]
pub fn run_year(
    data_dir: &Path,
    year: i32,
    method: NormMethod,
    weights: &FourFactorWeights,
) -> Result<PathBuf> {
    let adv = frame::read_csv(year_file(data_dir, year, TableKind::Advanced.file_stem()))?;
    let mut out = compute(&adv, method, weights)?;
    let path = year_file(data_dir, year, STEM);
    frame::write_csv(&mut out, &path)?;
    debug!(rows = out.height(), "four factors computed");
    Ok(path)
}
