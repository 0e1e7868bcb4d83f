// src/extractors/markup.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use scraper::{node::Node, ElementRef, Html};

/// Subtrees that never carry readable content.
const NON_CONTENT_TAGS: [&str; 2] = ["script", "style"];

/// Rejects input that carries no markup at all (empty files, plain text dumps).
/// Anything with tags is accepted; the parser recovers from the rest.
pub fn ensure_markup(raw: &str) -> Result<(), ExtractError> {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(ExtractError::NotMarkup("input is empty".to_string()));
    }
    if !trimmed.contains('<') || !trimmed.contains('>') {
        return Err(ExtractError::NotMarkup(format!(
            "no tags found in {} bytes of input",
            raw.len()
        )));
    }
    Ok(())
}

/// Parses `raw` and detaches script/style subtrees and comment nodes.
/// Malformed markup is accepted as the parser repaired it.
pub fn normalize(raw: &str) -> Html {
    let mut document = Html::parse_document(raw);

    let doomed: Vec<_> = document
        .tree
        .root()
        .descendants()
        .filter(|node| match node.value() {
            Node::Comment(_) => true,
            Node::Element(element) => NON_CONTENT_TAGS.contains(&element.name()),
            _ => false,
        })
        .map(|node| node.id())
        .collect();

    tracing::trace!("Detaching {} script/style/comment nodes", doomed.len());
    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document
}

/// Boundary check plus normalization; the entry point every extractor uses.
pub fn parse_checked(raw: &str) -> Result<Html, ExtractError> {
    ensure_markup(raw)?;
    Ok(normalize(raw))
}

/// True when the element sits below a script or style node.
pub fn inside_non_content(element: ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| NON_CONTENT_TAGS.contains(&ancestor.value().name()))
}
