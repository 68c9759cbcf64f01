//! Win-percentage regressors and the shared train/evaluate driver.
//!
//! Every trainer reads the composed datasets, so this module only ever
//! touches `train_data.csv`, `test_data.csv`, `data.csv` and
//! `data_{year}.csv`.

pub mod forest;
pub mod linear;
pub mod svr;

use anyhow::{bail, Context, Result};
use clap::Args;
use ndarray::{Array1, Array2};
use polars::prelude::*;
use std::{
    fmt,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::compose::{DATA_FILE, TEST_FILE, TRAIN_FILE, YEAR_STEM};
use crate::config::year_file;
use crate::frame::{self, round_to};
use crate::metrics::{four_factors, nrtg, srs};

pub const FEATURES: &[&str] = &[four_factors::FOUR_FACTOR_SCORE, nrtg::NRTG_NORM, srs::SRS_NORM];
pub const RESPONSE: &str = "W/L%";

/// Hyperparameters in, fitted model out.
pub trait Regressor {
    type Fitted: Predictor;

    fn name(&self) -> &'static str;
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Self::Fitted>;
}

pub trait Predictor {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub rmse: f64,
    pub r2: f64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root Mean Squared Error (RMSE): {:.3}", self.rmse)?;
        write!(f, "R^2 Score: {:.3}", self.r2)
    }
}

pub fn rmse(actual: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    let n = actual.len().max(1) as f64;
    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    (sse / n).sqrt()
}

/// Coefficient of determination; NaN when the actual values are constant.
pub fn r2(actual: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    let mean = actual.mean().unwrap_or(f64::NAN);
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return f64::NAN;
    }
    1.0 - ss_res / ss_tot
}

/// Rows of `frame` with every feature and the response present.
pub struct Design {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    /// Index into the source frame of each design row.
    pub rows: Vec<usize>,
}

pub fn design_matrix(df: &DataFrame, features: &[&str], response: &str) -> Result<Design> {
    let columns = features
        .iter()
        .map(|f| frame::f64_values(df, f))
        .collect::<crate::error::Result<Vec<_>>>()?;
    let target = frame::f64_values(df, response)?;

    let mut rows = Vec::new();
    let mut flat = Vec::new();
    let mut y = Vec::new();
    for i in 0..df.height() {
        let feats: Option<Vec<f64>> = columns.iter().map(|c| c[i]).collect();
        if let (Some(feats), Some(t)) = (feats, target[i]) {
            flat.extend(feats);
            y.push(t);
            rows.push(i);
        }
    }
    let dropped = df.height() - rows.len();
    if dropped > 0 {
        warn!(dropped, "rows with missing values left out of the design matrix");
    }
    if rows.is_empty() {
        bail!("no complete rows for features {:?} and response {}", features, response);
    }

    let x = Array2::from_shape_vec((rows.len(), features.len()), flat)
        .context("building design matrix")?;
    Ok(Design {
        x,
        y: Array1::from(y),
        rows,
    })
}

pub fn train<R: Regressor>(model: &R, df: &DataFrame) -> Result<R::Fitted> {
    let design = design_matrix(df, FEATURES, RESPONSE)?;
    info!(model = model.name(), rows = design.y.len(), "training");
    model.fit(&design.x, &design.y)
}

pub fn evaluate<P: Predictor>(fitted: &P, df: &DataFrame) -> Result<Metrics> {
    let design = design_matrix(df, FEATURES, RESPONSE)?;
    let predicted = fitted.predict(&design.x)?;
    Ok(Metrics {
        rmse: rmse(&design.y, &predicted),
        r2: r2(&design.y, &predicted),
    })
}

/// Per-team comparison of actual and predicted records for one season.
pub fn year_report<P: Predictor>(fitted: &P, season: &DataFrame) -> Result<(DataFrame, Metrics)> {
    let design = design_matrix(season, FEATURES, RESPONSE)?;
    let predicted = fitted.predict(&design.x)?;
    let teams = frame::str_values(season, "Team")?;
    let wins = frame::f64_values(season, "W")?;
    let losses = frame::f64_values(season, "L")?;

    let n = design.rows.len();
    let mut team = Vec::with_capacity(n);
    let mut actual_wins = Vec::with_capacity(n);
    let mut predicted_wins = Vec::with_capacity(n);
    for (k, &i) in design.rows.iter().enumerate() {
        let games = wins[i].zip(losses[i]).map(|(w, l)| w + l);
        team.push(teams[i].clone());
        actual_wins.push(wins[i]);
        predicted_wins.push(games.map(|g| round_to(g * predicted[k], 2)));
    }
    let report = DataFrame::new(vec![
        Column::new("Team".into(), team),
        frame::float_column("Actual Win%", design.y.iter().copied().map(Some).collect()),
        frame::float_column("Predicted Win%", predicted.iter().copied().map(Some).collect()),
        frame::float_column("Actual Wins", actual_wins),
        frame::float_column("Predicted Wins", predicted_wins),
    ])?;
    let metrics = Metrics {
        rmse: rmse(&design.y, &predicted),
        r2: r2(&design.y, &predicted),
    };
    Ok((report, metrics))
}

/// Command line shared by the trainer binaries.
#[derive(Debug, Clone, Args)]
pub struct EvalArgs {
    /// Train on data.csv and report predictions for this season's data_{year}.csv
    #[arg(long)]
    pub eval_year: Option<i32>,

    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

pub enum Evaluation {
    TestSet(Metrics),
    Season {
        year: i32,
        report: DataFrame,
        metrics: Metrics,
    },
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::TestSet(metrics) => {
                writeln!(f, "Model Evaluation on Test Set:")?;
                write!(f, "{}", metrics)
            }
            Evaluation::Season {
                year,
                report,
                metrics,
            } => {
                writeln!(f, "Evaluation Results for {}:", year)?;
                let table = render_table(report).map_err(|_| fmt::Error)?;
                writeln!(f, "{}", table)?;
                writeln!(f, "Metrics for {}:", year)?;
                write!(f, "{}", metrics)
            }
        }
    }
}

/// Train and score one regressor the way every trainer binary does.
pub fn run<R: Regressor>(model: &R, args: &EvalArgs) -> Result<Evaluation> {
    let load = |path: &Path| -> Result<DataFrame> {
        frame::read_csv(path).with_context(|| format!("loading {}", path.display()))
    };

    match args.eval_year {
        Some(year) => {
            let fitted = train(model, &load(&args.data_dir.join(DATA_FILE))?)?;
            let season = load(&year_file(&args.data_dir, year, YEAR_STEM))?;
            let (report, metrics) = year_report(&fitted, &season)?;
            Ok(Evaluation::Season {
                year,
                report,
                metrics,
            })
        }
        None => {
            let fitted = train(model, &load(&args.data_dir.join(TRAIN_FILE))?)?;
            let metrics = evaluate(&fitted, &load(&args.data_dir.join(TEST_FILE))?)?;
            Ok(Evaluation::TestSet(metrics))
        }
    }
}

/// Fixed-width text rendering of every row, floats to three places.
pub fn render_table(df: &DataFrame) -> Result<String> {
    let names = frame::column_names(df);
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(names.len());
    for name in &names {
        let values: Vec<String> = if frame::column(df, name)?.dtype().is_float() {
            frame::f64_values(df, name)?
                .into_iter()
                .map(|v| v.map_or_else(String::new, |n| format!("{:.3}", n)))
                .collect()
        } else {
            frame::str_values(df, name)?
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect()
        };
        cells.push(values);
    }
    let widths: Vec<usize> = names
        .iter()
        .zip(&cells)
        .map(|(name, vals)| vals.iter().map(String::len).chain([name.len()]).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for (name, w) in names.iter().zip(&widths) {
        out.push_str(&format!("{:>w$}  ", name, w = w));
    }
    for i in 0..df.height() {
        out.push('\n');
        for (values, w) in cells.iter().zip(&widths) {
            out.push_str(&format!("{:>w$}  ", values[i], w = w));
        }
    }
    Ok(out)
}
