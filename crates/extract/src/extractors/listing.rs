// ABOUTME: Fund listing page extraction: one entry per ticker_data row plus the next-page link.
// ABOUTME: Relative links are resolved against the configured site root.

use tracing::debug;

use crate::dom::page_index::{descendants, first_descendant, text};
use crate::dom::PageIndex;
use crate::error::ExtractError;
use crate::model::ListingEntry;
use crate::options::Options;

pub const LISTING_TABLE_CLASS: &str = "ticker_data";
pub const NEXT_PAGE_CLASS: &str = "next_page";

/// Extracts every fund row of a listing page, skipping the header row.
///
/// Fails when the listing table is missing or the configured base URL does
/// not parse, since no row link could then be made absolute.
pub fn listing_entries(
    page: &PageIndex,
    opts: &Options,
) -> Result<Vec<ListingEntry>, ExtractError> {
    let base = opts.base().map_err(|e| {
        ExtractError::listing("listing", format!("invalid base url {:?}", opts.base_url))
            .with_source(e.into())
    })?;
    let table = page
        .nth_by_class(LISTING_TABLE_CLASS, 0)
        .ok_or_else(|| ExtractError::listing("listing", "ticker_data table not found"))?;

    let mut entries = Vec::new();
    for (i, tr) in descendants(table, "tr").into_iter().enumerate().skip(1) {
        let cells = descendants(tr, "td");
        if cells.len() < 4 {
            debug!(row = i, cells = cells.len(), "skipping short listing row");
            continue;
        }
        let Some(href) = first_descendant(cells[0], "a[href]").and_then(|a| a.value().attr("href"))
        else {
            debug!(row = i, "skipping listing row without a fund link");
            continue;
        };
        let Ok(url) = base.join(href.trim()) else {
            debug!(row = i, href, "skipping listing row with an unresolvable link");
            continue;
        };
        entries.push(ListingEntry {
            name: text(cells[0]),
            symbol: text(cells[1]),
            fund_type: text(cells[2]),
            objective: text(cells[3]),
            url: url.into(),
        });
    }
    Ok(entries)
}

/// The absolute URL of the next listing page, if the page links one.
pub fn next_page_url(page: &PageIndex, opts: &Options) -> Option<String> {
    let anchor = page.nth_by_class(NEXT_PAGE_CLASS, 0)?;
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    Some(opts.resolve(href))
}
