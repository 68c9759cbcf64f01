//! Arguments shared by every binary.

use chrono::{Datelike, Utc};
use clap::Args;
use std::{ops::RangeInclusive, path::PathBuf};

use crate::error::{Result, ScrapeError};

/// First season the site publishes league pages for.
pub const FIRST_SEASON: i32 = 1947;

#[derive(Debug, Clone, Args)]
pub struct YearArgs {
    /// First season to process (season ending year)
    #[arg(long, default_value_t = 2024)]
    pub start_year: i32,

    /// Last season to process, inclusive
    #[arg(long, default_value_t = 2024)]
    pub end_year: i32,

    /// Single season; overrides --start-year/--end-year
    #[arg(long)]
    pub year: Option<i32>,
}

impl YearArgs {
    pub fn range(&self) -> Result<YearRange> {
        match self.year {
            Some(y) => YearRange::new(y, y),
            None => YearRange::new(self.start_year, self.end_year),
        }
    }
}

/// Where per-year files live; defaults to `./data`.
#[derive(Debug, Clone, Args)]
pub struct DataDirArg {
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

/// Inclusive, validated span of seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        let last = Utc::now().year() + 1;
        if start > end {
            return Err(ScrapeError::config(format!(
                "start year {} is after end year {}",
                start, end
            )));
        }
        for y in [start, end] {
            if !(FIRST_SEASON..=last).contains(&y) {
                return Err(ScrapeError::config(format!(
                    "year {} outside {}..={}",
                    y, FIRST_SEASON, last
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

impl IntoIterator for YearRange {
    type Item = i32;
    type IntoIter = RangeInclusive<i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.years()
    }
}
