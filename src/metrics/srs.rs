//! Simple Rating System scaled by its spread within the season.
//!
//! SRS is centred on zero every season but its spread drifts, so dividing
//! by the season's std puts years on one scale.

use polars::prelude::*;
use std::path::{Path, PathBuf};

use super::scale_by_std;
use crate::assemble::TableKind;
use crate::config::year_file;
use crate::error::Result;
use crate::frame;

pub const STEM: &str = "srs";
pub const SRS_NORM: &str = "SRS_norm";

pub fn compute(standings: &DataFrame) -> Result<DataFrame> {
    let srs = frame::f64_values(standings, "SRS")?;
    let mut out = frame::select(standings, &["Team", "W", "L", "W/L%"])?;
    out.with_column(frame::float_column(SRS_NORM, scale_by_std(&srs)))?;
    Ok(out)
}

/// `standings_{year}.csv` → `srs_{year}.csv`.
pub fn run_year(data_dir: &Path, year: i32) -> Result<PathBuf> {
    let standings = frame::read_csv(year_file(data_dir, year, TableKind::Standings.file_stem()))?;
    let mut out = compute(&standings)?;
    let path = year_file(data_dir, year, STEM);
    frame::write_csv(&mut out, &path)?;
    Ok(path)
}
