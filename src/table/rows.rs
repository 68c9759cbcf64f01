use polars::prelude::DataFrame;
use tracing::debug;

use super::{ColumnSchema, RawTable};
use crate::error::{Result, ScrapeError};
use crate::frame;

/// Body rows of one table, still as text, every row exactly `names.len()` wide.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRows {
    pub names: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl TextRows {
    pub fn rename(&mut self, from: &str, to: &str) {
        for name in self.names.iter_mut().filter(|n| n.as_str() == from) {
            *name = to.to_string();
        }
    }

    /// Drop spacer columns (empty name) and columns with no data at all.
    pub fn prune(&mut self) {
        let keep: Vec<bool> = (0..self.names.len())
            .map(|j| !self.names[j].is_empty() && self.rows.iter().any(|r| r[j].is_some()))
            .collect();
        fn retain<T>(cells: &mut Vec<T>, keep: &[bool]) {
            let mut j = 0;
            cells.retain(|_| {
                j += 1;
                keep[j - 1]
            });
        }
        retain(&mut self.names, &keep);
        for row in self.rows.iter_mut() {
            retain(row, &keep);
        }
    }

    /// Append the rows of a table with the same column names.
    pub fn append(&mut self, other: TextRows) -> Result<()> {
        if other.names != self.names {
            return Err(ScrapeError::schema(format!(
                "cannot stack {:?} under {:?}",
                other.names, self.names
            )));
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    pub fn into_frame(self) -> Result<DataFrame> {
        frame::from_rows(&self.names, &self.rows)
    }
}

/// Turn the body of a raw table into rows of exactly `schema.len()` cells.
///
/// The first `header_rows` rows repeat the header and are skipped. Caption
/// rows (a single spanning cell) and header rows repeated mid-table are
/// dropped.
pub fn extract_rows(raw: &RawTable, schema: &ColumnSchema, header_rows: usize) -> TextRows {
    let width = schema.len();
    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for row in raw.rows.iter().skip(header_rows) {
        if row.len() <= 1 || repeats_header(row, schema) {
            dropped += 1;
            continue;
        }
        rows.push(fit_row(row, width));
    }

    debug!(kept = rows.len(), dropped, width, "rows extracted");
    TextRows {
        names: schema.names().to_vec(),
        rows,
    }
}

/// Pad with missing cells or truncate so the row is exactly `width` long.
fn fit_row(row: &[Option<String>], width: usize) -> Vec<Option<String>> {
    let mut out: Vec<Option<String>> = row
        .iter()
        .take(width)
        .map(|c| c.clone().filter(|t| !t.is_empty()))
        .collect();
    out.resize(width, None);
    out
}

fn repeats_header(row: &[Option<String>], schema: &ColumnSchema) -> bool {
    let mut matched = 0;
    for (cell, name) in row.iter().zip(schema.names()) {
        match cell {
            Some(text) if text == name => matched += 1,
            Some(_) => return false,
            None => {}
        }
    }
    matched >= 2
}
