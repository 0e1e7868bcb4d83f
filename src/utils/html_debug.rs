// src/utils/html_debug.rs
use crate::extractors::escaped::EMBEDDED_DOCUMENT_ATTRS;
use crate::utils::error::AppError;
use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Markers worth highlighting when checking why a page produced few records.
/// The embedded-table pattern is built from the attributes the escaped-table
/// extractor actually scans.
pub fn candidate_patterns() -> Vec<(String, &'static str)> {
    let embedded_attrs = EMBEDDED_DOCUMENT_ATTRS
        .iter()
        .map(|attr| regex::escape(attr))
        .collect::<Vec<_>>()
        .join("|");

    vec![
        (r#"<article\b[^>]*>"#.to_string(), "container"),
        (r#"<div[^>]*class="[^"]*\b(?:tyJCtd|research-container|one_half)\b[^"]*"[^>]*>"#.to_string(), "container"),
        (format!(r#"\b(?:{})="[^"]*(?:&lt;|<)table"#, embedded_attrs), "embedded"),
        (r"&lt;table".to_string(), "embedded"),
        (r"(?i)[\w.+-]+(?:@|\[at\]|\(at\))[\w-]+(?:\.[\w-]+)+".to_string(), "email"),
        (r"\+91[\s-]?\d{3}[\s-]?\d{3}[\s-]?\d{4}".to_string(), "phone"),
    ]
}

/// Saves a HTML document to a file with debug highlights.
/// Overlapping highlights keep the earlier one.
pub fn save_debug_html(html: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str(".highlight-container { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-embedded { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-email { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-phone { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n<pre>\n");

    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0);

    // The source is shown escaped so the markers themselves stay visible.
    let mut last_pos = 0;
    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos {
            continue;
        }
        debug_html.push_str(&html_escape::encode_text(&html[last_pos..start]));

        let css_class = match highlight_type {
            "container" => "highlight-container",
            "embedded" => "highlight-embedded",
            "email" => "highlight-email",
            "phone" => "highlight-phone",
            _ => "highlight-custom",
        };
        debug_html.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type
        ));
        debug_html.push_str(&html_escape::encode_text(&html[start..end]));
        debug_html.push_str("</span>");

        last_pos = end;
    }
    debug_html.push_str(&html_escape::encode_text(&html[last_pos..]));
    debug_html.push_str("\n</pre>\n</body>\n</html>");

    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Creates an annotated copy of `html` with every match of `patterns` highlighted.
pub fn create_debug_html<P: AsRef<str>>(html: &str, filename: &Path, patterns: &[(P, &str)]) -> Result<usize, AppError> {
    let mut highlights = Vec::new();

    for (pattern, highlight_type) in patterns {
        let pattern = pattern.as_ref();
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    tracing::debug!("Highlighting {} matches", highlights.len());
    save_debug_html(html, filename, &highlights)?;
    Ok(highlights.len())
}
