// ABOUTME: PageIndex wraps a parsed HTML document and answers whole-word class queries.
// ABOUTME: Every query returns None on no match or out-of-range index; nothing here panics.

//! The sole DOM access primitive used by the field extractors.
//!
//! Class matching follows the XPath idiom
//! `contains(concat(' ', normalize-space(@class), ' '), ' token ')`:
//! the token must equal one whole whitespace-separated class name, so
//! `price` never matches an element classed `price_method_value`.

use scraper::{ElementRef, Html};

use crate::dom::compiled::get_or_compile;
use crate::text::normalize;

/// An immutable, indexed view over one parsed page.
#[derive(Debug)]
pub struct PageIndex {
    html: Html,
}

impl PageIndex {
    /// Parses a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
    }

    /// Every element carrying `token` as a whole class name, in document order.
    ///
    /// Returns `None` when nothing matches.
    pub fn by_class(&self, token: &str) -> Option<Vec<ElementRef<'_>>> {
        non_empty(self.elements().filter(|el| has_class(el, token)).collect())
    }

    /// The `index`-th element carrying `token`, or `None` if out of range.
    pub fn nth_by_class(&self, token: &str, index: usize) -> Option<ElementRef<'_>> {
        self.elements()
            .filter(|el| has_class(el, token))
            .nth(index)
    }

    /// Every `tag` element carrying `token`, in document order.
    pub fn by_tag_and_class(&self, tag: &str, token: &str) -> Option<Vec<ElementRef<'_>>> {
        non_empty(
            self.elements()
                .filter(|el| is_tag(el, tag) && has_class(el, token))
                .collect(),
        )
    }

    /// The `index`-th `tag` element carrying `token`, or `None` if out of range.
    pub fn nth_by_tag_and_class(
        &self,
        tag: &str,
        token: &str,
        index: usize,
    ) -> Option<ElementRef<'_>> {
        self.elements()
            .filter(|el| is_tag(el, tag) && has_class(el, token))
            .nth(index)
    }

    /// The first element whose `id` attribute equals `id`.
    pub fn by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|el| el.value().id() == Some(id))
    }
}

/// Descendants of `el` matching the CSS selector `css`, excluding `el` itself.
pub fn descendants<'a>(el: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Some(selector) = get_or_compile(css) else {
        return Vec::new();
    };
    el.select(&selector).filter(|found| *found != el).collect()
}

/// The first descendant of `el` matching `css`.
pub fn first_descendant<'a>(el: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    descendants(el, css).into_iter().next()
}

/// Direct element children of `el` named `tag`.
pub fn children<'a>(el: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| is_tag(child, tag))
        .collect()
}

/// The element's text content, whitespace-normalized.
pub fn text(el: ElementRef<'_>) -> String {
    normalize(&el.text().collect::<String>())
}

fn has_class(el: &ElementRef<'_>, token: &str) -> bool {
    el.value().classes().any(|class| class == token)
}

fn is_tag(el: &ElementRef<'_>, tag: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(tag)
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
