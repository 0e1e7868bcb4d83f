// src/extractors/cell.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a").expect("Failed to compile ANCHOR_SELECTOR")
});

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All descendant text of `element`, text nodes separated by a space, collapsed.
pub fn joined_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Renders one anchor as `"visible text | href"`.
/// Anchors with neither text nor href yield nothing.
pub fn link_line(anchor: ElementRef) -> Option<String> {
    let text = joined_text(anchor);
    let href = anchor.value().attr("href").unwrap_or("").trim();
    if text.is_empty() && href.is_empty() {
        return None;
    }
    Some(format!("{} | {}", text, href))
}

/// Link lines for every anchor below `element`, in document order.
pub fn link_lines(element: ElementRef) -> Vec<String> {
    element.select(&ANCHOR_SELECTOR).filter_map(link_line).collect()
}

/// Flat "text + links" view of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellContent {
    pub plain_text: String,
    pub links: Vec<String>,
}

impl CellContent {
    pub fn from_element(element: ElementRef) -> Self {
        Self {
            plain_text: joined_text(element),
            links: link_lines(element),
        }
    }

    /// Plain text followed by the link lines, joined with `" ; "`.
    pub fn render(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.links.len() + 1);
        if !self.plain_text.is_empty() {
            parts.push(&self.plain_text);
        }
        parts.extend(self.links.iter().map(String::as_str));
        parts.join(" ; ")
    }
}

/// Shorthand for `CellContent::from_element(element).render()`.
pub fn extract_cell(element: ElementRef) -> String {
    CellContent::from_element(element).render()
}
