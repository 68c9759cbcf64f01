//! Season fetch loop: one page per year, every requested table from it.

pub mod source;

pub use source::{HttpSource, PageSource};

use chrono::{DateTime, Utc};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    thread,
};
use tracing::{info, instrument, warn};

use crate::assemble::{assemble, TableKind};
use crate::config::{year_file, DisallowList, ScrapeConfig};
use crate::error::{Result, ScrapeError};
use crate::frame;

pub const SUMMARY_FILE: &str = "fetch_summary.json";

/// What happened to one (year, table) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Written { path: PathBuf, rows: usize },
    /// Assembled but not persisted (`--no-write`).
    Assembled { rows: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchRecord {
    pub year: i32,
    pub kind: TableKind,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: Vec<FetchRecord>,
}

impl FetchSummary {
    pub fn skipped(&self) -> impl Iterator<Item = &FetchRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Skipped { .. }))
    }

    pub fn succeeded(&self) -> usize {
        self.records.len() - self.skipped().count()
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        serde_json::to_writer_pretty(File::create(path)?, self).map_err(io::Error::from)?;
        Ok(())
    }
}

/// Walks years in order against a `PageSource`, writing one CSV per table.
pub struct SeasonFetcher<S: PageSource> {
    source: S,
    config: ScrapeConfig,
    disallow: DisallowList,
    requested: bool,
}

impl<S: PageSource> SeasonFetcher<S> {
    pub fn new(source: S, config: ScrapeConfig) -> Result<Self> {
        let disallow = config.disallow_list()?;
        Ok(Self {
            source,
            config,
            disallow,
            requested: false,
        })
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// `{data_dir}/{year}/{stem}_{year}.csv`
    pub fn output_path(&self, year: i32, kind: TableKind) -> PathBuf {
        year_file(&self.config.data_dir, year, kind.file_stem())
    }

    /// Fetch every year in `years` and assemble each of `kinds` from it.
    ///
    /// Recoverable failures are recorded and skipped; only configuration
    /// errors abort the run.
    #[instrument(level = "info", skip(self, years, kinds), fields(kinds = kinds.len()))]
    pub fn run(
        &mut self,
        years: impl IntoIterator<Item = i32>,
        kinds: &[TableKind],
        write: bool,
    ) -> Result<FetchSummary> {
        let started_at = Utc::now();
        let mut records = Vec::new();

        for year in years {
            // 1) build and vet the season URL
            let url = self.config.season_url(year)?;
            if !self.disallow.is_allowed(&url) {
                let err = ScrapeError::Disallowed(url.to_string());
                warn!(year, %url, "refusing disallowed url");
                records.extend(skip_all(year, kinds, &err));
                continue;
            }

            // 2) one request per season page
            self.wait_politely();
            let body = match self.source.fetch(&url) {
                Ok(body) => body,
                Err(err) => {
                    warn!(year, %url, error = %err, "season page unavailable");
                    records.extend(skip_all(year, kinds, &err));
                    continue;
                }
            };
            let page = Html::parse_document(&body);

            // 3) assemble and persist each requested table
            for &kind in kinds {
                let outcome = self.assemble_one(&page, year, kind, write);
                records.push(FetchRecord { year, kind, outcome });
            }
        }

        let summary = FetchSummary {
            started_at,
            finished_at: Utc::now(),
            records,
        };
        info!(
            succeeded = summary.succeeded(),
            skipped = summary.skipped().count(),
            "fetch run complete"
        );
        Ok(summary)
    }

    fn assemble_one(&self, page: &Html, year: i32, kind: TableKind, write: bool) -> Outcome {
        let mut df = match assemble(page, kind) {
            Ok(df) if df.height() == 0 => {
                warn!(year, %kind, "table has no rows, skipping");
                return Outcome::Skipped {
                    reason: "table has no rows".into(),
                };
            }
            Ok(df) => df,
            Err(err) => {
                warn!(year, %kind, error = %err, "skipping table");
                return Outcome::Skipped {
                    reason: err.to_string(),
                };
            }
        };

        let rows = df.height();
        if !write {
            info!(year, %kind, rows, "table assembled");
            return Outcome::Assembled { rows };
        }

        let path = self.output_path(year, kind);
        match frame::write_csv(&mut df, &path) {
            Ok(()) => {
                info!(year, %kind, rows, path = %path.display(), "table written");
                Outcome::Written { path, rows }
            }
            Err(err) => {
                warn!(year, %kind, path = %path.display(), error = %err, "write failed, skipping");
                Outcome::Skipped {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Sleep the crawl delay before every request but the first.
    fn wait_politely(&mut self) {
        if self.requested {
            thread::sleep(self.config.crawl_delay());
        }
        self.requested = true;
    }
}

fn skip_all<'a>(
    year: i32,
    kinds: &'a [TableKind],
    err: &'a ScrapeError,
) -> impl Iterator<Item = FetchRecord> + 'a {
    kinds.iter().map(move |&kind| FetchRecord {
        year,
        kind,
        outcome: Outcome::Skipped {
            reason: err.to_string(),
        },
    })
}
