// src/extractors/mod.rs
pub mod cell;
pub mod escaped;
pub mod faculty;
pub mod fields;
pub mod markup;
pub mod phd;
pub mod postdoc;
pub mod research_group;
pub mod table;
pub mod visible;

use crate::records::{CleanedDocument, FacultyRecord, MemberRecord, ResearchGroupRecord};
use crate::utils::error::ExtractError;
use escaped::EscapedTableExtractor;
use table::{TableExtractor, DEFAULT_ROW_CHUNK_SIZE};

/// Institutional domain faculty addresses are matched against.
pub const DEFAULT_EMAIL_DOMAIN: &str = "iiserb.ac.in";

/// Tunables for the heuristics that are specific to the source platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Cells per row before a row is treated as several merged rows.
    pub row_chunk_size: usize,
    pub email_domain: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            row_chunk_size: DEFAULT_ROW_CHUNK_SIZE,
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
        }
    }
}

/// Entry point for every page kind. Each call parses its own document;
/// nothing is shared between calls.
pub struct SiteExtractor {
    config: ExtractorConfig,
    tables: TableExtractor,
}

impl SiteExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        let tables = TableExtractor::new(config.row_chunk_size);
        Self { config, tables }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Generic cleaner: real tables, escaped tables, then visible text.
    pub fn clean_document(&self, html_content: &str) -> Result<CleanedDocument, ExtractError> {
        let document = markup::parse_checked(html_content)?;

        let real_tables = self.tables.extract_tables(&document);
        let escaped_tables = EscapedTableExtractor::new(&self.tables).extract(&document);
        let visible_text = visible::extract_visible_text(&document);

        tracing::info!(
            "Cleaned document: {} tables, {} embedded tables, {} text lines",
            real_tables.len(),
            escaped_tables.len(),
            visible_text.len()
        );
        Ok(CleanedDocument {
            real_tables,
            escaped_tables,
            visible_text,
        })
    }

    pub fn extract_faculty(&self, html_content: &str) -> Result<Vec<FacultyRecord>, ExtractError> {
        let document = markup::parse_checked(html_content)?;
        let records = faculty::extract_faculty(&document, &self.config.email_domain);
        warn_if_empty(records.len(), "faculty");
        Ok(records)
    }

    pub fn extract_phd_students(&self, html_content: &str) -> Result<Vec<MemberRecord>, ExtractError> {
        let document = markup::parse_checked(html_content)?;
        let records = phd::extract_phd_students(&document);
        warn_if_empty(records.len(), "PhD student");
        Ok(records)
    }

    pub fn extract_postdocs(&self, html_content: &str) -> Result<Vec<MemberRecord>, ExtractError> {
        let document = markup::parse_checked(html_content)?;
        let records = postdoc::extract_postdocs(&document);
        warn_if_empty(records.len(), "postdoc");
        Ok(records)
    }

    pub fn extract_research_groups(
        &self,
        html_content: &str,
    ) -> Result<Vec<ResearchGroupRecord>, ExtractError> {
        let document = markup::parse_checked(html_content)?;
        let records = research_group::extract_research_groups(&document);
        warn_if_empty(records.len(), "research group");
        Ok(records)
    }
}

fn warn_if_empty(count: usize, label: &str) {
    if count == 0 {
        tracing::warn!("No {} records found; the page layout may have changed", label);
    }
}
