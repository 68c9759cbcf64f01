//! Thin helpers over polars `DataFrame`s.
//!
//! Every stage persists flat CSV (header row + data rows). Scraped text is
//! typed once on the way in: a column whose cells all parse as numbers is
//! `Float64`, anything else stays `String`.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Cursor,
    path::Path,
};

use crate::error::{Result, ScrapeError};

/// How the composer treats left rows without a partner on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
}

impl From<JoinKind> for JoinType {
    fn from(kind: JoinKind) -> Self {
        match kind {
            JoinKind::Inner => JoinType::Inner,
            JoinKind::Left => JoinType::Left,
        }
    }
}

/// Build a frame from row-major text cells; short rows read as null.
pub fn from_rows(names: &[String], rows: &[Vec<Option<String>>]) -> Result<DataFrame> {
    let columns = names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let cells: Vec<Option<&str>> = rows
                .iter()
                .map(|row| {
                    row.get(j)
                        .and_then(|c| c.as_deref())
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                })
                .collect();
            let numbers: Option<Vec<Option<f64>>> = cells
                .iter()
                .map(|c| match c {
                    None => Some(None),
                    Some(s) => s.parse::<f64>().ok().map(Some),
                })
                .collect();
            match numbers {
                Some(values) => Column::new(name.as_str().into(), values),
                None => Column::new(name.as_str().into(), cells),
            }
        })
        .collect::<Vec<_>>();
    Ok(DataFrame::new(columns)?)
}

/// Read a persisted frame; an absent file is `MissingFile`.
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ScrapeError::MissingFile(path.to_path_buf()));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Parse CSV text held in memory.
pub fn parse_csv(text: &str) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(text.as_bytes()))
        .finish()?;
    Ok(df)
}

/// Write `df` to `path`, creating parent directories; nulls become empty fields.
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

pub fn column_names(df: &DataFrame) -> Vec<&str> {
    df.get_column_names().into_iter().map(|n| n.as_str()).collect()
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Like `DataFrame::column`, but a missing column is a schema mismatch.
pub fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| ScrapeError::schema(format!("column '{}' not found", name)))
}

/// Column values as floats; text that is not a number reads as missing.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

pub fn str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Float column with non-finite results stored as null.
pub fn float_column(name: &str, values: Vec<Option<f64>>) -> Column {
    let values: Vec<Option<f64>> = values
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    Column::new(name.into(), values)
}

/// Project onto `names`, in that order.
pub fn select<S: AsRef<str>>(df: &DataFrame, names: &[S]) -> Result<DataFrame> {
    for name in names {
        column(df, name.as_ref())?;
    }
    Ok(df.select(names.iter().map(|n| n.as_ref()))?)
}

/// Stack frames vertically; numeric columns widen to a common type.
pub fn stack(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let lazy: Vec<LazyFrame> = frames.into_iter().map(DataFrame::lazy).collect();
    let args = UnionArgs {
        to_supertypes: true,
        ..Default::default()
    };
    Ok(concat(lazy, args)?.collect()?)
}

/// Round half away from zero to `places` decimals.
pub fn round_to(x: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (x * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    fn cells(v: &[&str]) -> Vec<Option<String>> {
        v.iter()
            .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
            .collect()
    }

    #[test]
    fn scraped_columns_are_typed_by_content() -> Result<()> {
        let names: Vec<String> = ["Team", "W/L%", "GB"].iter().map(|s| s.to_string()).collect();
        let rows = vec![
            cells(&["Boston Celtics", " .780 ", "—"]),
            cells(&["New York Knicks", "", "14.0"]),
        ];
        let df = from_rows(&names, &rows)?;
        assert_eq!(df.column("Team")?.dtype(), &DataType::String);
        assert_eq!(df.column("W/L%")?.dtype(), &DataType::Float64);
        assert_eq!(df.column("GB")?.dtype(), &DataType::String);
        assert_eq!(f64_values(&df, "W/L%")?, vec![Some(0.78), None]);
        assert_eq!(f64_values(&df, "GB")?, vec![None, Some(14.0)]);
        Ok(())
    }

    #[test]
    fn short_rows_read_as_null() -> Result<()> {
        let names: Vec<String> = ["Team", "W"].iter().map(|s| s.to_string()).collect();
        let df = from_rows(&names, &[cells(&["A"])])?;
        assert_eq!(df.height(), 1);
        assert_eq!(f64_values(&df, "W")?, vec![None]);
        Ok(())
    }

    #[test]
    fn csv_round_trip_preserves_shape() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("2024").join("adv_2024.csv");
        let mut df = df!(
            "Team" => ["Boston Celtics", "Denver, CO"],
            "W" => [Some(64.0), Some(57.0)],
            "Arena" => [None, Some("Ball Arena")],
        )?;
        write_csv(&mut df, &path)?;
        let back = read_csv(&path)?;
        assert_eq!(column_names(&back), vec!["Team", "W", "Arena"]);
        assert_eq!(f64_values(&back, "W")?[0], Some(64.0));
        assert_eq!(str_values(&back, "Team")?[1].as_deref(), Some("Denver, CO"));
        assert_eq!(str_values(&back, "Arena")?[0], None);
        Ok(())
    }

    #[test]
    fn stack_widens_integer_columns() -> Result<()> {
        let a = parse_csv("Team,W\nA,60\n")?;
        let b = parse_csv("Team,W\nB,41.5\n")?;
        let stacked = stack(vec![a, b])?;
        assert_eq!(f64_values(&stacked, "W")?, vec![Some(60.0), Some(41.5)]);
        Ok(())
    }

    #[test]
    fn missing_column_is_a_schema_mismatch() -> Result<()> {
        let df = parse_csv("Team,W\nA,60\n")?;
        assert!(matches!(select(&df, &["Team", "L"]), Err(ScrapeError::SchemaMismatch(_))));
        assert!(matches!(f64_values(&df, "NRtg"), Err(ScrapeError::SchemaMismatch(_))));
        assert_eq!(select(&df, &["W"])?.width(), 1);
        Ok(())
    }

    #[test]
    fn missing_file_is_reported_as_such() {
        let err = read_csv("/nonexistent/adv_1900.csv").unwrap_err();
        assert!(matches!(err, ScrapeError::MissingFile(_)));
    }

    #[test]
    fn round_to_six_places() {
        assert_eq!(round_to(0.12345649, 6), 0.123456);
        assert_eq!(round_to(0.1234567, 6), 0.123457);
    }
}
