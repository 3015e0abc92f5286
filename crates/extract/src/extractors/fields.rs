// ABOUTME: Per-field extractors for fund detail pages: name, symbol, timestamp, classification, price...
// ABOUTME: Each extractor is a pure function of the PageIndex and returns None when the field is absent.

//! Field extractors.
//!
//! Every function here takes the indexed page explicitly and never fails:
//! a missing fragment or text of the wrong shape yields `None` for that field
//! only. Structural checks (classification container, snapshot table) live in
//! the record assembler.

use chrono::FixedOffset;

use crate::dom::page_index::{children, descendants, first_descendant, text};
use crate::dom::PageIndex;
use crate::model::{Classification, ExtendedProfile, PriceQuote, Trend, TrendDirection};
use crate::text::{available, normalize, parse_decimal, strip_tokens};
use crate::time_parse::{
    eastern_to_target, parse_profile_date, parse_time_of_day, parse_us_date, DATE_FORMAT,
};

pub const NAME_CLASS: &str = "ticker_header_top";
pub const SYMBOL_CLASS: &str = "ticker_header";
pub const FINE_PRINT_CLASS: &str = "fine_print";
pub const EXCHANGE_TYPE_CLASS: &str = "exchange_type";
pub const PRICE_CLASS: &str = "price";
pub const PRICE_METHOD_CLASS: &str = "price_method_value";
pub const TRENDING_UP_CLASS: &str = "trending_up";
pub const TRENDING_DOWN_CLASS: &str = "trending_down";
pub const TRENDING_NONE_CLASS: &str = "trending_none";
pub const PROFILE_CLASS: &str = "profile_no_margin";
pub const EXTENDED_PROFILE_ID: &str = "extended_profile";

/// Literal markers removed from the "As of ..." line.
const AS_OF_MARKERS: [&str; 3] = ["As of ", "ET on ", "."];
/// Labels removed from the telephone cell.
const PHONE_MARKERS: [&str; 4] = ["Tel", "Phone", ":", "+"];

/// Fund name: the first `h2` under the first `.ticker_header_top`.
pub fn name(page: &PageIndex) -> Option<String> {
    let header = page.nth_by_class(NAME_CLASS, 0)?;
    first_descendant(header, "h2").map(text)
}

/// Ticker symbol: the first `h3` under the first `.ticker_header`.
pub fn symbol(page: &PageIndex) -> Option<String> {
    let header = page.nth_by_class(SYMBOL_CLASS, 0)?;
    first_descendant(header, "h3").map(text)
}

/// Last-updated timestamp, converted from US Eastern to `target`.
///
/// The fine print reads like `As of 16:00:00 ET on 10/17/2014.`; after the
/// markers are stripped exactly two tokens must remain.
pub fn last_updated(page: &PageIndex, target: FixedOffset) -> Option<String> {
    let fine_print = page.nth_by_class(FINE_PRINT_CLASS, 0)?;
    let stripped = strip_tokens(&text(fine_print), &AS_OF_MARKERS);
    parse_as_of(&stripped, target)
}

fn parse_as_of(stripped: &str, target: FixedOffset) -> Option<String> {
    let tokens: Vec<&str> = stripped.split(' ').collect();
    let [time, date] = tokens.as_slice() else {
        return None;
    };
    let local = parse_us_date(date)?.and_time(parse_time_of_day(time)?);
    eastern_to_target(local, target)
}

/// The container the classification is read from. Its absence is structural.
pub fn has_classification_container(page: &PageIndex) -> bool {
    page.nth_by_class(EXCHANGE_TYPE_CLASS, 0).is_some()
}

/// Exchange classification: second `span` of each `li` in the first `ul`.
///
/// All-or-nothing: anything other than exactly four entries yields `None`.
pub fn classification(page: &PageIndex) -> Option<Classification> {
    let container = page.nth_by_class(EXCHANGE_TYPE_CLASS, 0)?;
    let list = first_descendant(container, "ul")?;
    let values = children(list, "li")
        .into_iter()
        .map(|li| descendants(li, "span").get(1).map(|span| text(*span)))
        .collect::<Option<Vec<String>>>()?;
    Classification::from_values(values)
}

/// Price and currency from the first `span.price`.
pub fn price(page: &PageIndex, default_currency: &str) -> Option<PriceQuote> {
    let span = page.nth_by_tag_and_class("span", PRICE_CLASS, 0)?;
    parse_price(&text(span), default_currency)
}

fn parse_price(s: &str, default_currency: &str) -> Option<PriceQuote> {
    let normalized = normalize(s);
    let mut tokens = normalized.split(' ').filter(|t| !t.is_empty());
    let value = tokens.next()?;
    let currency = tokens.next().unwrap_or(default_currency);
    Some(PriceQuote {
        value: parse_decimal(value),
        currency: currency.to_string(),
    })
}

/// Pricing method, shown only on money market pages.
pub fn price_method(page: &PageIndex, classification: Option<&Classification>) -> Option<String> {
    if !classification.is_some_and(Classification::is_money_market) {
        return None;
    }
    let span = page.nth_by_tag_and_class("span", PRICE_METHOD_CLASS, 0)?;
    non_empty(text(span)).map(|method| method.to_lowercase())
}

/// Latest price movement. Money market funds never carry one.
pub fn trend(page: &PageIndex, classification: Option<&Classification>) -> Trend {
    if classification.is_some_and(Classification::is_money_market) {
        return Trend::absent();
    }
    let probes = [
        (TRENDING_UP_CLASS, TrendDirection::Up),
        (TRENDING_DOWN_CLASS, TrendDirection::Down),
        (TRENDING_NONE_CLASS, TrendDirection::Flat),
    ];
    for (class, direction) in probes {
        let Some(span) = page.nth_by_tag_and_class("span", class, 0) else {
            continue;
        };
        if direction == TrendDirection::Flat {
            return Trend::flat();
        }
        return parse_trend(&text(span), direction);
    }
    Trend::absent()
}

fn parse_trend(s: &str, direction: TrendDirection) -> Trend {
    let mut tokens = s.split(' ');
    Trend {
        direction: Some(direction),
        value: tokens.next().and_then(parse_decimal),
        percentage: tokens.next().and_then(parse_decimal),
    }
}

/// Profile paragraph: the first `p.profile_no_margin`.
pub fn profile(page: &PageIndex) -> Option<String> {
    let paragraph = page.nth_by_tag_and_class("p", PROFILE_CLASS, 0)?;
    non_empty(text(paragraph))
}

/// Free-text fields keep whatever the page prints, `-` included.
fn non_empty(normalized: String) -> Option<String> {
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Inception date, telephone, managers and website from `#extended_profile`.
pub fn extended_profile(page: &PageIndex) -> ExtendedProfile {
    let Some(container) = page.by_id(EXTENDED_PROFILE_ID) else {
        return ExtendedProfile::default();
    };
    let cells = descendants(container, "td");
    let cell_text = |i: usize| cells.get(i).map(|cell| text(*cell));

    ExtendedProfile {
        inception_date: cell_text(0).and_then(|s| inception_date(&s)),
        telephone: cell_text(1)
            .map(|s| strip_tokens(&s, &PHONE_MARKERS))
            .and_then(|s| available(&s)),
        managers: cell_text(2).and_then(|s| available(&s)),
        website: cells
            .get(3)
            .and_then(|cell| first_descendant(*cell, "a[href]"))
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string),
    }
}

fn inception_date(s: &str) -> Option<String> {
    let text = available(s)?;
    parse_profile_date(&text).map(|date| date.format(DATE_FORMAT).to_string())
}
