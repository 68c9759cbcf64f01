//! Immutable run configuration handed to the fetcher, normalizers and composer.

use crate::error::{Result, ScrapeError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};
use url::Url;

/// Paths listed in the site's robots.txt.
pub const ROBOTS_DISALLOWED: &[&str] = &[
    "/basketball/",
    "/blazers/",
    "/dump/",
    "/fc/",
    "/my/",
    "/7103",
    "/play-index/*.cgi?*",
    "/play-index/plus/*.cgi?*",
    "/gamelog/",
    "/splits/",
    "/on-off/",
    "/lineups/",
    "/shooting/",
    "/req/",
    "/short/",
    "/nocdn/",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub crawl_delay_ms: u64,
    pub disallowed_paths: Vec<String>,
    pub data_dir: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.basketball-reference.com/".into(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into(),
            timeout_secs: 30,
            crawl_delay_ms: 3_000,
            disallowed_paths: ROBOTS_DISALLOWED.iter().map(|s| s.to_string()).collect(),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl ScrapeConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_yaml(path.as_ref())
    }

    pub fn crawl_delay(&self) -> Duration {
        Duration::from_millis(self.crawl_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Season page, e.g. `leagues/NBA_2024.html`.
    pub fn season_url(&self, year: i32) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::config(format!("base_url {}: {}", self.base_url, e)))?;
        base.join(&format!("leagues/NBA_{}.html", year))
            .map_err(|e| ScrapeError::config(format!("season url for {}: {}", year, e)))
    }

    pub fn disallow_list(&self) -> Result<DisallowList> {
        DisallowList::new(&self.disallowed_paths)
    }
}

/// robots.txt style path prefixes; `*` matches any run of characters.
#[derive(Debug, Clone)]
pub struct DisallowList {
    patterns: Vec<Regex>,
}

impl DisallowList {
    pub fn new<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        let patterns = paths
            .iter()
            .map(|p| {
                let escaped = regex::escape(p.as_ref()).replace(r"\*", ".*");
                Regex::new(&format!("^{}", escaped))
                    .map_err(|e| ScrapeError::config(format!("disallowed path {}: {}", p.as_ref(), e)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_allowed(&self, url: &Url) -> bool {
        let mut target = url.path().to_string();
        if let Some(q) = url.query() {
            target.push('?');
            target.push_str(q);
        }
        !self.patterns.iter().any(|re| re.is_match(&target))
    }
}

/// Weights of the normalized four factors in the composite score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FourFactorWeights {
    pub offensive: Vec<(String, f64)>,
    pub defensive: Vec<(String, f64)>,
}

impl Default for FourFactorWeights {
    fn default() -> Self {
        let w = |pairs: &[(&str, f64)]| pairs.iter().map(|(n, v)| (n.to_string(), *v)).collect();
        Self {
            offensive: w(&[
                ("Off eFG%", 0.40),
                ("Off TOV%", -0.25),
                ("ORB%", 0.20),
                ("Off FT/FGA%", 0.15),
            ]),
            defensive: w(&[
                ("Def eFG%", -0.40),
                ("Def TOV%", 0.25),
                ("DRB%", 0.20),
                ("Def FT/FGA%", -0.15),
            ]),
        }
    }
}

impl FourFactorWeights {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_yaml(path.as_ref())
    }

    /// Offensive factors first, then defensive, in configured order.
    pub fn factor_names(&self) -> Vec<&str> {
        self.offensive
            .iter()
            .chain(self.defensive.iter())
            .map(|(n, _)| n.as_str())
            .collect()
    }
}

/// Per-season file: `{data_dir}/{year}/{stem}_{year}.csv`.
pub fn year_file(data_dir: &Path, year: i32, stem: &str) -> PathBuf {
    data_dir
        .join(year.to_string())
        .join(format!("{}_{}.csv", stem, year))
}

pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| ScrapeError::config(format!("reading {}: {}", path.display(), e)))?;
    serde_yaml::from_str(&text)
        .map_err(|e| ScrapeError::config(format!("parsing {}: {}", path.display(), e)))
}
