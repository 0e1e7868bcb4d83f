// src/records/assembly.rs
use crate::records::models::Entity;
use serde::Serialize;
use std::collections::HashSet;

/// Delimits rendered records.
pub const RECORD_SEPARATOR: &str = "----------------------------------------";

/// Keeps the first record for each identity, in discovery order.
/// Records with an empty identity are dropped.
pub fn dedupe_by_identity<T: Entity>(records: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();
    for record in records {
        let identity = record.identity();
        if identity.is_empty() {
            continue;
        }
        if seen.insert(identity.to_string()) {
            kept.push(record);
        } else {
            tracing::trace!("Dropping duplicate {} record '{}'", record.kind().as_str(), identity);
        }
    }
    kept
}

/// Each record as `separator / fields / separator / blank`.
pub fn render_records<T: Entity>(records: &[T]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for record in records {
        lines.push(RECORD_SEPARATOR.to_string());
        lines.extend(record.field_lines());
        lines.push(RECORD_SEPARATOR.to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Output of the generic cleaner, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedDocument {
    pub real_tables: Vec<String>,
    pub escaped_tables: Vec<String>,
    pub visible_text: Vec<String>,
}

impl CleanedDocument {
    /// Real tables, then escaped tables (each followed by a blank line), then
    /// the visible text. Leading and trailing whitespace is trimmed.
    pub fn render(&self) -> String {
        let mut blocks: Vec<String> = Vec::new();
        for table in self.real_tables.iter().chain(&self.escaped_tables) {
            blocks.push(table.clone());
            blocks.push(String::new());
        }
        blocks.push(self.visible_text.join("\n"));
        blocks.join("\n").trim().to_string()
    }

    pub fn table_count(&self) -> usize {
        self.real_tables.len() + self.escaped_tables.len()
    }
}
