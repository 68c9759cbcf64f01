//! Net rating scaled by its spread within the season.
//!
//! The league average row stays in: it takes part in the spread and is
//! written out with the teams.

use polars::prelude::*;
use std::path::{Path, PathBuf};

use super::{scale_by_std, win_pct};
use crate::assemble::TableKind;
use crate::config::year_file;
use crate::error::Result;
use crate::frame::{self, round_to};

pub const STEM: &str = "nrtg";
pub const NRTG_NORM: &str = "NRtg_norm";

pub fn compute(adv: &DataFrame) -> Result<DataFrame> {
    let nrtg = frame::f64_values(adv, "NRtg")?;
    let wins = frame::f64_values(adv, "W")?;
    let losses = frame::f64_values(adv, "L")?;

    let mut out = frame::select(adv, &["Team", "W", "L"])?;
    let pct = wins
        .iter()
        .zip(&losses)
        .map(|(w, l)| win_pct(*w, *l).map(|p| round_to(p, 3)))
        .collect();
    out.with_column(frame::float_column("W/L%", pct))?;
    out.with_column(frame::float_column("NRtg", nrtg.clone()))?;
    out.with_column(frame::float_column(NRTG_NORM, scale_by_std(&nrtg)))?;
    Ok(out)
}

/// `adv_{year}.csv` → `nrtg_{year}.csv`.
pub fn run_year(data_dir: &Path, year: i32) -> Result<PathBuf> {
    let adv = frame::read_csv(year_file(data_dir, year, TableKind::Advanced.file_stem()))?;
    let mut out = compute(&adv)?;
    let path = year_file(data_dir, year, STEM);
    frame::write_csv(&mut out, &path)?;
    Ok(path)
}
