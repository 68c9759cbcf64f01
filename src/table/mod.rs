//! HTML table extraction: locate a table, reconcile its headers, extract rows.
//!
//! ```text
//! Html page ──locate──▶ TableHandle ──raw()──▶ RawTable
//!                                               │ headers ─reconcile─▶ ColumnSchema
//!                                               │ rows ────extract───▶ TextRows ──▶ DataFrame
//! ```

pub mod headers;
pub mod locate;
pub mod rows;

pub use headers::{reconcile, ColumnSchema, HeaderMode};
pub use locate::{locate, TableHandle, TableSelector};
pub use rows::{extract_rows, TextRows};

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector"));

/// One parsed `<table>`, before any reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Texts of every cell in the header rows, flattened in document order.
    pub headers: Vec<String>,
    /// Every `<tr>` in document order (header rows included); empty cells are `None`.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Header rows are the `<thead>` rows, or failing that the leading rows
    /// made only of `<th>` cells.
    pub fn from_element(table: ElementRef<'_>) -> Self {
        let mut headers = Vec::new();
        let mut rows = Vec::new();
        let mut saw_thead = false;
        let mut in_leading_header = true;

        for tr in table.select(&TR) {
            let cells: Vec<ElementRef<'_>> = tr
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|c| matches!(c.value().name(), "th" | "td"))
                .collect();

            let in_thead = tr
                .parent()
                .and_then(ElementRef::wrap)
                .map_or(false, |p| p.value().name() == "thead");
            saw_thead |= in_thead;

            let all_th = !cells.is_empty() && cells.iter().all(|c| c.value().name() == "th");
            let is_header = if saw_thead {
                in_thead
            } else {
                in_leading_header && all_th
            };
            if !is_header {
                in_leading_header = false;
            }

            let texts: Vec<String> = cells.iter().map(|c| cell_text(*c)).collect();
            if is_header {
                headers.extend(texts.iter().cloned());
            }
            rows.push(
                texts
                    .into_iter()
                    .map(|t| if t.is_empty() { None } else { Some(t) })
                    .collect(),
            );
        }

        Self { headers, rows }
    }
}

/// Visible text of a cell with whitespace runs collapsed.
pub fn cell_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_table(html: &str) -> RawTable {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("table").unwrap();
        RawTable::from_element(doc.select(&sel).next().unwrap())
    }

    #[test]
    fn thead_rows_become_headers() {
        let raw = first_table(
            r#"<table>
                <thead><tr><th>Rk</th><th>Team</th><th>W</th></tr></thead>
                <tbody>
                  <tr><th>1</th><td>Boston Celtics*</td><td>64</td></tr>
                  <tr><th>2</th><td>  New York
                        Knicks* </td><td></td></tr>
                </tbody>
            </table>"#,
        );
        assert_eq!(raw.headers, vec!["Rk", "Team", "W"]);
        assert_eq!(raw.rows.len(), 3);
        assert_eq!(raw.rows[2][1].as_deref(), Some("New York Knicks*"));
        assert_eq!(raw.rows[2][2], None);
    }

    #[test]
    fn leading_th_rows_are_headers_without_thead() {
        let raw = first_table(
            r#"<table>
                <tr><th></th><th colspan="2">Offense</th></tr>
                <tr><th>Team</th><th>eFG%</th><th>TOV%</th></tr>
                <tr><th>Team A</th><td>.550</td><td>12.1</td></tr>
            </table>"#,
        );
        assert_eq!(raw.headers, vec!["", "Offense", "Team", "eFG%", "TOV%"]);
        assert_eq!(raw.rows.len(), 3);
    }
}
