// src/extractors/visible.rs

// --- Imports ---
use crate::extractors::cell::{joined_text, link_lines};
use crate::extractors::markup::inside_non_content;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// Every tag that can carry a readable line; matches come back in document order.
static TEXT_BEARING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, span, div, section, li, h1, h2, h3, h4, h5, h6")
        .expect("Failed to compile TEXT_BEARING_SELECTOR")
});

/// Tags followed by a blank separator line. Limited to h1-h4 on purpose:
/// h5/h6 carry names and captions on these pages, not section titles.
const SECTION_BREAK_TAGS: [&str; 5] = ["section", "h1", "h2", "h3", "h4"];

/// Readable lines of the document: each text-bearing node's collapsed text,
/// then one `"text | href"` line per link below it. Nested nodes repeat
/// their text, which is how the downstream consumer expects it.
pub fn extract_visible_text(document: &Html) -> Vec<String> {
    let mut lines = Vec::new();

    for element in document.select(&TEXT_BEARING_SELECTOR) {
        if inside_non_content(element) {
            continue;
        }

        let text = joined_text(element);
        if !text.is_empty() {
            lines.push(text);
        }
        lines.extend(link_lines(element));

        if SECTION_BREAK_TAGS.contains(&element.value().name()) {
            lines.push(String::new());
        }
    }

    tracing::debug!("Collected {} visible text lines", lines.len());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::markup::normalize;

    #[test]
    fn test_lines_links_and_section_breaks() {
        let document = normalize(
            r#"<section><h1>Title</h1><p>Hello <a href="/x">link</a></p></section>"#,
        );
        assert_eq!(
            extract_visible_text(&document),
            vec![
                "Title Hello link",
                "link | /x",
                "",
                "Title",
                "",
                "Hello link",
                "link | /x",
            ]
        );
    }

    #[test]
    fn test_empty_heading_still_breaks() {
        let document = normalize("<h2>  </h2><li>Item</li><h5>Minor</h5>");
        assert_eq!(extract_visible_text(&document), vec!["", "Item", "Minor"]);
    }

    #[test]
    fn test_tables_and_bare_text_are_not_lines() {
        let document = normalize("<table><tr><td>cell</td></tr></table>loose");
        assert!(extract_visible_text(&document).is_empty());
    }
}
