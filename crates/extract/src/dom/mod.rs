// ABOUTME: DOM access layer for fund pages: whole-word class queries over a parsed document.
// ABOUTME: Includes the PageIndex query primitive and a compiled selector cache.

//! DOM access module.
//!
//! Submodules:
//! - `page_index`: class/tag/id queries returning `None` instead of failing.
//! - `compiled`: cache of parsed `scraper::Selector`s for scoped tag lookups.

pub mod compiled;
pub mod page_index;

pub use page_index::PageIndex;
