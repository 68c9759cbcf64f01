//! Per-kind recipes that turn a season page into one clean table.
//!
//! Every kind follows the same path: locate, reconcile headers, extract rows,
//! then finish. Standings are the exception: the page splits them into an
//! Eastern and a Western half, and older seasons only publish the division
//! layout.

use clap::ValueEnum;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument, warn};

use crate::error::{Result, ScrapeError};
use crate::frame;
use crate::table::headers::{DIVISION_MARKER, FOUR_FACTOR_LABELS, SHOOTING_GROUPS};
use crate::table::{extract_rows, locate, reconcile, HeaderMode, TableSelector, TextRows};

/// Conference standings tag clinched teams with `*` and append the seed.
static TEAM_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\d+\)\s*$").expect("seed suffix regex"));

const CONFERENCE_HEADERS: &[&str] = &["Eastern Conference", "Western Conference"];

const SIMPLE: HeaderMode = HeaderMode::Simple {
    drop_containing: &[DIVISION_MARKER],
};
const ADVANCED: HeaderMode = HeaderMode::OffDef {
    skip: 5,
    labels: FOUR_FACTOR_LABELS,
};
const SHOOTING: HeaderMode = HeaderMode::Grouped {
    groups: SHOOTING_GROUPS,
    anchor: "Rk",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum TableKind {
    #[value(name = "standings")]
    #[serde(rename = "standings")]
    Standings,
    #[value(name = "per_game_team")]
    #[serde(rename = "per_game_team")]
    PerGameTeam,
    #[value(name = "per_game_opp")]
    #[serde(rename = "per_game_opp")]
    PerGameOpponent,
    #[value(name = "per_100_team")]
    #[serde(rename = "per_100_team")]
    Per100Team,
    #[value(name = "per_100_opp")]
    #[serde(rename = "per_100_opp")]
    Per100Opponent,
    #[value(name = "adv", alias = "advanced")]
    #[serde(rename = "adv")]
    Advanced,
    #[value(name = "shooting")]
    #[serde(rename = "shooting")]
    Shooting,
    #[value(name = "shooting_opp")]
    #[serde(rename = "shooting_opp")]
    ShootingOpponent,
}

impl TableKind {
    /// Every kind, in the order a full fetch writes them.
    pub fn all() -> &'static [TableKind] {
        &[
            TableKind::Standings,
            TableKind::Per100Team,
            TableKind::Per100Opponent,
            TableKind::Advanced,
            TableKind::Shooting,
            TableKind::ShootingOpponent,
            TableKind::PerGameTeam,
            TableKind::PerGameOpponent,
        ]
    }

    /// Prefix of the persisted file, `{stem}_{year}.csv`.
    pub fn file_stem(self) -> &'static str {
        match self {
            TableKind::Standings => "standings",
            TableKind::PerGameTeam => "per_game_team",
            TableKind::PerGameOpponent => "per_game_opp",
            TableKind::Per100Team => "per_100_team",
            TableKind::Per100Opponent => "per_100_opp",
            TableKind::Advanced => "adv",
            TableKind::Shooting => "shooting",
            TableKind::ShootingOpponent => "shooting_opp",
        }
    }

    pub fn file_name(self, year: i32) -> String {
        format!("{}_{}.csv", self.file_stem(), year)
    }

    fn layout(self) -> Layout {
        match self {
            TableKind::Standings => Layout {
                ids: &[],
                caption: None,
                mode: SIMPLE,
                drop: &[],
            },
            TableKind::PerGameTeam => Layout {
                ids: &["div_per_game-team", "per_game-team"],
                caption: Some("Team Per Game Stats"),
                mode: SIMPLE,
                drop: &[],
            },
            TableKind::PerGameOpponent => Layout {
                ids: &["div_per_game-opponent", "per_game-opponent"],
                caption: Some("Opponent Per Game Stats"),
                mode: SIMPLE,
                drop: &[],
            },
            TableKind::Per100Team => Layout {
                ids: &["div_per_poss-team", "per_poss-team"],
                caption: Some("Team Per 100 Poss Stats"),
                mode: SIMPLE,
                drop: &["MP"],
            },
            TableKind::Per100Opponent => Layout {
                ids: &["div_per_poss-opponent", "per_poss-opponent"],
                caption: Some("Opponent Per 100 Poss Stats"),
                mode: SIMPLE,
                drop: &["MP"],
            },
            TableKind::Advanced => Layout {
                ids: &["div_advanced-team", "advanced-team", "all_advanced_team", "all_advanced-team"],
                caption: Some("Advanced Stats"),
                mode: ADVANCED,
                drop: &[],
            },
            TableKind::Shooting => Layout {
                ids: &["div_shooting-team", "shooting-team", "all_shooting_team", "all_shooting-team"],
                caption: Some("Team Shooting"),
                mode: SHOOTING,
                drop: &[],
            },
            TableKind::ShootingOpponent => Layout {
                ids: &[
                    "div_shooting-opponent",
                    "shooting-opponent",
                    "all_shooting_opponent",
                    "all_shooting-opponent",
                ],
                caption: Some("Opponent Shooting"),
                mode: SHOOTING,
                drop: &[],
            },
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

struct Layout {
    ids: &'static [&'static str],
    caption: Option<&'static str>,
    mode: HeaderMode,
    drop: &'static [&'static str],
}

impl Layout {
    fn selectors(&self) -> Vec<TableSelector> {
        let mut out: Vec<TableSelector> = self
            .ids
            .iter()
            .map(|id| TableSelector::ContainerId(id.to_string()))
            .collect();
        if let Some(caption) = self.caption {
            out.push(TableSelector::Caption(caption.to_string()));
            out.push(TableSelector::Heading(caption.to_string()));
        }
        out
    }
}

/// Build the clean table for `kind` from a parsed season page.
#[instrument(level = "debug", skip(page))]
pub fn assemble(page: &Html, kind: TableKind) -> Result<DataFrame> {
    match kind {
        TableKind::Standings => assemble_standings(page),
        _ => {
            let layout = kind.layout();
            let table = extract_table(page, &layout.selectors(), &layout.mode)?;
            let mut df = finish(table)?;
            for name in layout.drop {
                if frame::has_column(&df, name) {
                    df = df.drop(name)?;
                }
            }
            Ok(df)
        }
    }
}

/// Strip clinch markers and seeds: `"Boston Celtics* (1)"` → `"Boston Celtics"`.
pub fn clean_team_name(raw: &str) -> String {
    let no_star = raw.replace('*', "");
    TEAM_MARKERS.replace(&no_star, "").trim().to_string()
}

/// Apply `clean_team_name` to the Team column; names that clean to nothing become null.
pub fn clean_team_column(df: &mut DataFrame) -> Result<()> {
    let cleaned: Vec<Option<String>> = frame::str_values(df, "Team")?
        .into_iter()
        .map(|t| t.map(|t| clean_team_name(&t)).filter(|t| !t.is_empty()))
        .collect();
    df.with_column(Column::new("Team".into(), cleaned))?;
    Ok(())
}

fn extract_table(page: &Html, selectors: &[TableSelector], mode: &HeaderMode) -> Result<TextRows> {
    let handle = locate(page, selectors)?;
    let raw = handle.raw();
    let schema = reconcile(&raw.headers, mode)?;
    debug!(matched_by = %handle.matched_by(), columns = schema.len(), "headers reconciled");
    Ok(extract_rows(&raw, &schema, mode.header_rows()))
}

/// Shared clean-up applied to every extracted table.
fn finish(mut table: TextRows) -> Result<DataFrame> {
    if table.rows.is_empty() {
        return Ok(DataFrame::empty());
    }

    // 1) drop spacer columns and columns with no data
    table.prune();

    // 2) the standings halves name their team column after the conference
    for header in CONFERENCE_HEADERS {
        table.rename(header, "Team");
    }

    // 3) clean team names and drop rows without one
    let mut df = table.into_frame()?;
    clean_team_column(&mut df)?;
    Ok(df.lazy().filter(col("Team").is_not_null()).collect()?)
}

fn assemble_standings(page: &Html) -> Result<DataFrame> {
    match standings_variant(page, "confs_standings") {
        Ok(df) => Ok(df),
        Err(conf_err) => {
            warn!(error = %conf_err, "conference standings unavailable, trying division layout");
            standings_variant(page, "divs_standings")
        }
    }
}

/// Both halves of one standings layout, or an error if either is absent.
fn standings_variant(page: &Html, base: &str) -> Result<DataFrame> {
    let mut stacked: Option<TextRows> = None;
    for side in ["E", "W"] {
        let selectors = [
            TableSelector::ContainerId(format!("{}_{}", base, side)),
            TableSelector::ContainerId(format!("all_{}_{}", base, side)),
        ];
        let mut half = extract_table(page, &selectors, &SIMPLE)?;
        for header in CONFERENCE_HEADERS {
            half.rename(header, "Team");
        }
        match stacked.as_mut() {
            Some(east) => east.append(half)?,
            None => stacked = Some(half),
        }
    }
    let table = stacked.ok_or_else(|| ScrapeError::NotFound(base.to_string()))?;
    recompute_games_behind(finish(table)?)
}

/// `GB = (max(W) - W) / 2`, replacing the page's per-conference values.
fn recompute_games_behind(mut df: DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df);
    }
    let wins = frame::f64_values(&df, "W")?;
    let Some(max) = wins.iter().flatten().copied().reduce(f64::max) else {
        return Err(ScrapeError::schema("standings have no numeric W values"));
    };
    let gb: Vec<Option<f64>> = wins.iter().map(|w| w.map(|w| (max - w) / 2.0)).collect();
    df.with_column(frame::float_column("GB", gb))?;
    Ok(df)
}
