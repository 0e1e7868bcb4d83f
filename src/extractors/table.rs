// src/extractors/table.rs

// --- Imports ---
use crate::extractors::cell::extract_cell;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Cells per logical row. The content platform sometimes serializes several
/// rows as one oversized `<tr>`; splitting every 5 cells recovers the known
/// table shapes. It is an approximation tuned to those pages, not a general repair.
pub const DEFAULT_ROW_CHUNK_SIZE: usize = 5;

// --- CSS Selectors (Lazy Static) ---
pub(crate) static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table").expect("Failed to compile TABLE_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("Failed to compile ROW_SELECTOR")
});

// Header and data cells are treated alike; document order is kept.
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("th, td").expect("Failed to compile CELL_SELECTOR")
});

// --- Data Structures ---
/// Rows of rendered cell texts, already repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTable {
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    /// One pipe-delimited line per row.
    pub fn render(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Splits `cells` into consecutive rows of at most `chunk_size` cells.
/// Rows at or below the limit pass through untouched.
pub fn repair_row(cells: Vec<String>, chunk_size: usize) -> Vec<Vec<String>> {
    let chunk_size = chunk_size.max(1);
    if cells.len() <= chunk_size {
        return vec![cells];
    }
    cells.chunks(chunk_size).map(|chunk| chunk.to_vec()).collect()
}

// --- Extractor ---
#[derive(Debug, Clone, Copy)]
pub struct TableExtractor {
    chunk_size: usize,
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_CHUNK_SIZE)
    }
}

impl TableExtractor {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size: chunk_size.max(1) }
    }

    /// Reads every row of `table`, skipping rows without cells.
    pub fn extract_table(&self, table: ElementRef) -> ExtractedTable {
        let mut rows = Vec::new();
        for row in table.select(&ROW_SELECTOR) {
            let cells: Vec<String> = row.select(&CELL_SELECTOR).map(extract_cell).collect();
            if cells.is_empty() {
                continue;
            }
            if cells.len() > self.chunk_size {
                tracing::trace!(
                    "Splitting merged row of {} cells into chunks of {}",
                    cells.len(),
                    self.chunk_size
                );
            }
            rows.extend(repair_row(cells, self.chunk_size));
        }
        ExtractedTable { rows }
    }

    pub fn table_to_text(&self, table: ElementRef) -> String {
        self.extract_table(table).render()
    }

    /// Renders every `<table>` of the document in discovery order, dropping empty ones.
    pub fn extract_tables(&self, document: &Html) -> Vec<String> {
        let tables: Vec<String> = document
            .select(&TABLE_SELECTOR)
            .map(|table| self.table_to_text(table))
            .filter(|text| !text.is_empty())
            .collect();
        tracing::debug!("Extracted {} tables", tables.len());
        tables
    }
}
