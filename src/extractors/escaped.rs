// src/extractors/escaped.rs

// --- Imports ---
use crate::extractors::table::{TableExtractor, TABLE_SELECTOR};
use crate::utils::error::ExtractError;
use html_escape::decode_html_entities;
use scraper::Html;

/// Attributes the content platform uses to carry embedded widgets.
pub const EMBEDDED_DOCUMENT_ATTRS: [&str; 6] = [
    "data-code",
    "data-html",
    "data-content",
    "data-src",
    "data-url",
    "aria-label",
];

/// Outcome of decoding one candidate payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubDocument {
    /// Rendered tables found inside the payload.
    Tables(Vec<String>),
    /// The payload parsed, but its tables held no cells.
    Absent,
}

/// Literal or entity-encoded `<table` start tag.
fn mentions_table(value: &str) -> bool {
    value.contains("<table") || value.contains("&lt;table")
}

pub struct EscapedTableExtractor<'t> {
    tables: &'t TableExtractor,
}

impl<'t> EscapedTableExtractor<'t> {
    pub fn new(tables: &'t TableExtractor) -> Self {
        Self { tables }
    }

    /// Decodes entities in `payload`, parses it as its own document and
    /// renders its tables with the regular table extractor.
    pub fn decode_candidate(&self, payload: &str) -> Result<SubDocument, ExtractError> {
        let decoded = decode_html_entities(payload);
        let inner = Html::parse_document(&decoded);

        let mut saw_table = false;
        let mut rendered = Vec::new();
        for table in inner.select(&TABLE_SELECTOR) {
            saw_table = true;
            let text = self.tables.table_to_text(table);
            if !text.is_empty() {
                rendered.push(text);
            }
        }

        if !saw_table {
            return Err(ExtractError::MalformedSubDocument(format!(
                "no table element after decoding {} bytes",
                decoded.len()
            )));
        }
        if rendered.is_empty() {
            Ok(SubDocument::Absent)
        } else {
            Ok(SubDocument::Tables(rendered))
        }
    }

    /// Raw payloads worth decoding: attribute values first, then text nodes,
    /// each in document order.
    fn candidates<'d>(&self, document: &'d Html) -> Vec<&'d str> {
        let mut payloads = Vec::new();

        for node in document.tree.root().descendants() {
            if let Some(element) = node.value().as_element() {
                for attr in EMBEDDED_DOCUMENT_ATTRS {
                    if let Some(value) = element.attr(attr) {
                        if mentions_table(value) {
                            payloads.push(value);
                        }
                    }
                }
            }
        }

        for node in document.tree.root().descendants() {
            if let Some(text) = node.value().as_text() {
                let raw: &str = text;
                if mentions_table(raw) {
                    payloads.push(raw);
                }
            }
        }

        payloads
    }

    /// Tables hidden inside attributes or text, deduplicated by exact text,
    /// first occurrence kept. A payload that fails to decode is skipped.
    pub fn extract(&self, document: &Html) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();

        for payload in self.candidates(document) {
            match self.decode_candidate(payload) {
                Ok(SubDocument::Tables(tables)) => {
                    for table in tables {
                        if !found.contains(&table) {
                            found.push(table);
                        }
                    }
                }
                Ok(SubDocument::Absent) => {
                    tracing::trace!("Embedded document carried only empty tables");
                }
                Err(e) => {
                    tracing::debug!("Skipping embedded document candidate: {}", e);
                }
            }
        }

        tracing::debug!("Extracted {} embedded tables", found.len());
        found
    }
}
