// src/storage/mod.rs
use crate::utils::error::StorageError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What gets recorded next to each output file.
#[derive(Debug, Clone)]
pub struct OutputSummary<'a> {
    pub source: &'a str,
    pub page_kind: &'a str,
    pub item_count: usize,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the rendered output under the base directory.
    pub fn save_output(&self, file_name: &str, body: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);

        let mut file = fs::File::create(&file_path).map_err(StorageError::IoError)?;
        file.write_all(body.as_bytes()).map_err(StorageError::IoError)?;

        tracing::info!("Saved output to {}", file_path.display());
        Ok(file_path)
    }

    /// Writes `<stem>_meta.json` describing an output file.
    pub fn save_metadata(
        &self,
        stem: &str,
        output: &Path,
        summary: &OutputSummary,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", stem));

        let output_bytes = fs::metadata(output).map(|m| m.len()).unwrap_or(0);
        let metadata = serde_json::json!({
            "source": summary.source,
            "page_kind": summary.page_kind,
            "item_count": summary.item_count,
            "output_file": output.display().to_string(),
            "output_bytes": output_bytes,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// Creates (if needed) and returns the debug subdirectory.
    pub fn debug_dir(&self) -> Result<PathBuf, StorageError> {
        let dir = self.base_dir.join("debug");
        fs::create_dir_all(&dir).map_err(StorageError::IoError)?;
        Ok(dir)
    }
}

/// File stem for a source: the input file's stem, or the last path segment
/// of a URL (its host when the path is empty). Unsafe characters become `_`.
pub fn output_stem(source: &str) -> String {
    let raw = match source.split_once("://") {
        Some((_, rest)) => {
            let rest = rest.split(['?', '#']).next().unwrap_or("");
            let mut segments = rest.split('/').filter(|s| !s.is_empty());
            let host = segments.next().unwrap_or("");
            let last = segments.last().unwrap_or(host);
            last.rsplit_once('.')
                .filter(|(_, ext)| matches!(*ext, "html" | "htm" | "php"))
                .map(|(stem, _)| stem)
                .unwrap_or(last)
                .to_string()
        }
        None => Path::new(source)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let sanitized: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "page".to_string()
    } else {
        sanitized
    }
}
