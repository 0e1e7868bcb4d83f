// src/main.rs
mod extractors;
mod fetch;
mod records;
mod storage;
mod utils;

use clap::{Parser, ValueEnum};
use extractors::{ExtractorConfig, SiteExtractor, DEFAULT_EMAIL_DOMAIN};
use records::{render_records, Entity};
use std::path::Path;
use storage::{OutputSummary, StorageManager};
use utils::AppError;

/// Layout family of the input page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PageKind {
    /// Tables, embedded tables and visible text of any page
    Generic,
    Faculty,
    Phd,
    Postdoc,
    ResearchGroup,
}

impl PageKind {
    fn as_str(&self) -> &'static str {
        match self {
            PageKind::Generic => "generic",
            PageKind::Faculty => "faculty",
            PageKind::Phd => "phd",
            PageKind::Postdoc => "postdoc",
            PageKind::ResearchGroup => "research-group",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Extracts people, groups and tables from department web pages
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a saved HTML page
    #[arg(short, long, conflicts_with = "url", required_unless_present = "url")]
    input: Option<String>,

    /// URL to fetch instead of reading a file
    #[arg(short, long)]
    url: Option<String>,

    /// Page layout to extract
    #[arg(short, long, value_enum, default_value_t = PageKind::Generic)]
    kind: PageKind,

    /// Output directory for cleaned files
    #[arg(short, long, default_value = "cleaned_html")]
    output_dir: String,

    /// Output file name (defaults to <stem>_clean.<ext>)
    #[arg(long)]
    output_name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Cells per table row before the row is split as merged rows
    #[arg(long, env = "ROW_CHUNK_SIZE", default_value_t = extractors::table::DEFAULT_ROW_CHUNK_SIZE,
          value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    row_chunk_size: usize,

    /// Institutional email domain recognised on faculty pages
    #[arg(long, env = "EMAIL_DOMAIN", default_value = DEFAULT_EMAIL_DOMAIN)]
    email_domain: String,

    /// Debug mode - save an annotated copy of the input page
    #[arg(short, long)]
    debug: bool,
}

/// Renders records in the requested format and returns them with their count.
fn render<T: Entity>(records: Vec<T>, format: OutputFormat) -> Result<(String, usize), AppError> {
    let body = match format {
        OutputFormat::Text => render_records(&records),
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
    };
    Ok((body, records.len()))
}

fn run_extraction(
    extractor: &SiteExtractor,
    kind: PageKind,
    html: &str,
    format: OutputFormat,
) -> Result<(String, usize), AppError> {
    match kind {
        PageKind::Generic => {
            let cleaned = extractor.clean_document(html)?;
            let body = match format {
                OutputFormat::Text => cleaned.render(),
                OutputFormat::Json => serde_json::to_string_pretty(&cleaned)?,
            };
            Ok((body, cleaned.table_count() + cleaned.visible_text.len()))
        }
        PageKind::Faculty => render(extractor.extract_faculty(html)?, format),
        PageKind::Phd => render(extractor.extract_phd_students(html)?, format),
        PageKind::Postdoc => render(extractor.extract_postdocs(html)?, format),
        PageKind::ResearchGroup => render(extractor.extract_research_groups(html)?, format),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Load the page
    let (source, html) = match (&args.input, &args.url) {
        (Some(path), _) => {
            if !Path::new(path).is_file() {
                return Err(AppError::Config(format!("Input file not found: {}", path)));
            }
            let bytes = std::fs::read(path)?;
            (path.clone(), String::from_utf8_lossy(&bytes).into_owned())
        }
        (None, Some(url)) => (url.clone(), fetch::client::download_page(url).await?),
        (None, None) => {
            return Err(AppError::Config("Either --input or --url is required".to_string()));
        }
    };
    tracing::info!("Loaded {} bytes from {}", html.len(), source);

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;
    let stem = storage::output_stem(&source);

    if args.debug {
        let debug_path = storage.debug_dir()?.join(format!("{}_annotated.html", stem));
        match utils::html_debug::create_debug_html(&html, &debug_path, &utils::html_debug::candidate_patterns()) {
            Ok(count) => tracing::info!("Created annotated debug HTML with {} markers: {}", count, debug_path.display()),
            Err(e) => tracing::warn!("Failed to create debug HTML: {}", e),
        }
    }

    // 5. Extract
    let extractor = SiteExtractor::new(ExtractorConfig {
        row_chunk_size: args.row_chunk_size,
        email_domain: args.email_domain.clone(),
    });
    tracing::debug!("Extractor config: {:?}", extractor.config());

    let (body, item_count) = run_extraction(&extractor, args.kind, &html, args.format)?;
    tracing::info!("Extracted {} items as {}", item_count, args.kind.as_str());

    // 6. Save output and metadata
    let file_name = args
        .output_name
        .clone()
        .unwrap_or_else(|| format!("{}_clean.{}", stem, args.format.extension()));
    let output_path = storage.save_output(&file_name, &body)?;

    let summary = OutputSummary {
        source: &source,
        page_kind: args.kind.as_str(),
        item_count,
    };
    if let Err(e) = storage.save_metadata(&stem, &output_path, &summary) {
        tracing::error!("Failed to save metadata: {}", e);
    }

    tracing::info!("Processing finished: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACULTY_PAGE: &str = r#"<html><body>
        <article><h6>Dr. A</h6><p>Professor</p><p>Email: a[at]iiserb.ac.in</p></article>
        <article><h6>Dr. A</h6><p>Assistant Professor</p></article>
    </body></html>"#;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["roster_extractor", "--input", "page.html", "--kind", "research-group"]).unwrap();
        assert_eq!(args.kind, PageKind::ResearchGroup);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.output_dir, "cleaned_html");

        assert!(Args::try_parse_from(["roster_extractor"]).is_err());
        assert!(Args::try_parse_from(["roster_extractor", "-i", "a.html", "-u", "https://x"]).is_err());
        assert!(Args::try_parse_from(["roster_extractor", "-i", "a.html", "--row-chunk-size", "0"]).is_err());
    }

    #[test]
    fn test_run_extraction_text_and_json() {
        let extractor = SiteExtractor::new(ExtractorConfig::default());

        let (text, count) = run_extraction(&extractor, PageKind::Faculty, FACULTY_PAGE, OutputFormat::Text).unwrap();
        assert_eq!(count, 1);
        assert!(text.contains("Name: Dr. A\nRole: Professor\nEmail(s): a@iiserb.ac.in"));
        assert!(!text.contains("Assistant"));

        let (json, _) = run_extraction(&extractor, PageKind::Faculty, FACULTY_PAGE, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["emails"][0], "a@iiserb.ac.in");
        assert!(value[0].get("phone").is_none());
    }

    #[test]
    fn test_run_extraction_rejects_non_markup() {
        let extractor = SiteExtractor::new(ExtractorConfig::default());
        let result = run_extraction(&extractor, PageKind::Generic, "%PDF-1.4 binary", OutputFormat::Text);
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
