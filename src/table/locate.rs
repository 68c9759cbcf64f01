use std::fmt;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use super::{cell_text, RawTable};
use crate::error::{Result, ScrapeError};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("table selector"));
static CAPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("caption").expect("caption selector"));
static WITH_ID: Lazy<Selector> = Lazy::new(|| Selector::parse("[id]").expect("id selector"));

/// One way of finding a table on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelector {
    /// Element with this `id`: the table itself or its wrapper.
    ContainerId(String),
    /// Case-insensitive substring of the table's `<caption>`.
    Caption(String),
    /// Case-insensitive substring of the nearest preceding h2/h3/h4, for
    /// tables without a caption.
    Heading(String),
}

impl fmt::Display for TableSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSelector::ContainerId(id) => write!(f, "#{}", id),
            TableSelector::Caption(c) => write!(f, "caption~'{}'", c),
            TableSelector::Heading(h) => write!(f, "heading~'{}'", h),
        }
    }
}

/// A single located table, detached from the page it came from.
#[derive(Debug)]
pub struct TableHandle {
    fragment: Html,
    matched_by: TableSelector,
}

impl TableHandle {
    fn from_table(table: ElementRef<'_>, matched_by: &TableSelector) -> Self {
        Self::from_markup(&table.html(), matched_by)
    }

    fn from_markup(markup: &str, matched_by: &TableSelector) -> Self {
        Self {
            fragment: Html::parse_fragment(markup),
            matched_by: matched_by.clone(),
        }
    }

    pub fn matched_by(&self) -> &TableSelector {
        &self.matched_by
    }

    pub fn raw(&self) -> RawTable {
        self.fragment
            .select(&TABLE)
            .next()
            .map(RawTable::from_element)
            .unwrap_or_default()
    }
}

/// Try each selector in order and return the first table found.
pub fn locate(page: &Html, selectors: &[TableSelector]) -> Result<TableHandle> {
    for selector in selectors {
        if let Some(handle) = try_selector(page, selector) {
            debug!(%selector, "table located");
            return Ok(handle);
        }
        trace!(%selector, "no match");
    }
    let tried: Vec<String> = selectors.iter().map(|s| s.to_string()).collect();
    Err(ScrapeError::NotFound(tried.join(", ")))
}

fn try_selector(page: &Html, selector: &TableSelector) -> Option<TableHandle> {
    match selector {
        TableSelector::ContainerId(id) => by_container(page, id, selector),
        TableSelector::Caption(needle) => by_caption(page, needle, selector),
        TableSelector::Heading(needle) => by_heading(page, needle, selector),
    }
}

fn by_container(page: &Html, id: &str, selector: &TableSelector) -> Option<TableHandle> {
    let container = page
        .select(&WITH_ID)
        .find(|el| el.value().attr("id") == Some(id))?;

    if container.value().name() == "table" {
        return Some(TableHandle::from_table(container, selector));
    }
    if let Some(table) = container.select(&TABLE).next() {
        return Some(TableHandle::from_table(table, selector));
    }

    // Secondary tables ship inside an HTML comment until client-side JS
    // uncomments them.
    for node in container.descendants() {
        if let Some(comment) = node.value().as_comment() {
            let text: &str = comment;
            if !text.contains("<table") {
                continue;
            }
            let handle = TableHandle::from_markup(text, selector);
            if handle.fragment.select(&TABLE).next().is_some() {
                return Some(handle);
            }
        }
    }
    None
}

fn caption_of(table: ElementRef<'_>) -> Option<String> {
    table
        .select(&CAPTION)
        .next()
        .map(cell_text)
        .filter(|c| !c.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn by_caption(page: &Html, needle: &str, selector: &TableSelector) -> Option<TableHandle> {
    page.select(&TABLE)
        .find(|t| caption_of(*t).map_or(false, |c| contains_ci(&c, needle)))
        .map(|t| TableHandle::from_table(t, selector))
}

fn by_heading(page: &Html, needle: &str, selector: &TableSelector) -> Option<TableHandle> {
    let mut last_heading: Option<String> = None;
    for node in page.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        match el.value().name() {
            "h2" | "h3" | "h4" => last_heading = Some(cell_text(el)),
            "table" if caption_of(el).is_none() => {
                if last_heading.as_deref().map_or(false, |h| contains_ci(h, needle)) {
                    return Some(TableHandle::from_table(el, selector));
                }
            }
            _ => {}
        }
    }
    None
}
