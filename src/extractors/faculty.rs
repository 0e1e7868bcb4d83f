// src/extractors/faculty.rs

// --- Imports ---
use crate::extractors::cell::joined_text;
use crate::extractors::fields::{self, Strategy};
use crate::records::{dedupe_by_identity, FacultyRecord};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

const NAME_STRATEGIES: [Strategy<String>; 2] = [fields::heading_name, fields::honorific_name];

/// Any text node mentioning this marks its parent as a candidate.
const EMAIL_MARKER: &str = "Email";

// --- CSS Selectors (Lazy Static) ---
// Department site: one <article> per person.
static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("article").expect("Failed to compile ARTICLE_SELECTOR")
});

// Hosted-site text boxes.
static SITES_BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.tyJCtd").expect("Failed to compile SITES_BLOCK_SELECTOR")
});

/// Builds a faculty record from one candidate block, or `None` when no name
/// can be found.
pub fn parse_faculty_block(block: ElementRef, email_domain: &str) -> Option<FacultyRecord> {
    let text = joined_text(block);
    if text.is_empty() {
        return None;
    }

    let Some(name) = fields::first_match(block, &NAME_STRATEGIES) else {
        tracing::trace!("Rejecting faculty candidate <{}> without a name", block.value().name());
        return None;
    };

    Some(FacultyRecord {
        name,
        role: fields::find_role(&text),
        emails: fields::scan_emails(&text, email_domain),
        phone: fields::find_phone(&text),
        research_areas: fields::research_after_marker(&text),
        homepage: fields::absolute_link(block),
    })
}

/// Candidate blocks in priority order: articles, site text boxes, then the
/// parent of every text node mentioning "Email".
pub fn candidate_blocks(document: &Html) -> Vec<ElementRef<'_>> {
    let mut blocks: Vec<ElementRef> = document.select(&ARTICLE_SELECTOR).collect();
    blocks.extend(document.select(&SITES_BLOCK_SELECTOR));

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let raw: &str = text;
        if !raw.contains(EMAIL_MARKER) {
            continue;
        }
        if let Some(parent) = node.parent().and_then(ElementRef::wrap) {
            blocks.push(parent);
        }
    }

    blocks
}

pub fn extract_faculty(document: &Html, email_domain: &str) -> Vec<FacultyRecord> {
    let candidates = candidate_blocks(document);
    tracing::debug!("Found {} faculty candidate blocks", candidates.len());

    let records = dedupe_by_identity(
        candidates
            .into_iter()
            .filter_map(|block| parse_faculty_block(block, email_domain)),
    );
    tracing::info!("Retained {} faculty records", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::markup::normalize;

    const DOMAIN: &str = "iiserb.ac.in";

    #[test]
    fn test_article_block() {
        let document = normalize(
            r#"<article>
                 <h6>Dr. Meera Iyer</h6>
                 <p>Associate Professor</p>
                 <p>Email: meera[at]iiserb.ac.in, miyer@iiserb.ac.in</p>
                 <p>Phone: +91 755 269 1234</p>
                 <a href="/people">People</a><a href="https://meera.example/">Homepage</a>
                 <p>Research Interests: Climate dynamics; Monsoons</p>
               </article>"#,
        );
        let records = extract_faculty(&document, DOMAIN);
        assert_eq!(records.len(), 1);

        let meera = &records[0];
        assert_eq!(meera.name, "Dr. Meera Iyer");
        assert_eq!(meera.role.as_deref(), Some("Associate Professor"));
        assert_eq!(meera.emails, vec!["meera@iiserb.ac.in", "miyer@iiserb.ac.in"]);
        assert_eq!(meera.phone.as_deref(), Some("+91 755 269 1234"));
        assert_eq!(meera.homepage.as_deref(), Some("https://meera.example/"));
        assert_eq!(meera.research_areas, vec!["Interests Climate dynamics", "Monsoons"]);
    }

    #[test]
    fn test_honorific_fallback_and_dedup_across_strategies() {
        let document = normalize(
            r#"<div class="tyJCtd"><span>Prof. Ravi Shankar</span><p>Professor</p>
                 <p>Email ravi(at)iiserb.ac.in</p></div>
               <div class="tyJCtd"><span>Prof. Ravi Shankar</span><p>Assistant Professor</p></div>"#,
        );
        let records = extract_faculty(&document, DOMAIN);
        assert_eq!(records.len(), 1, "duplicate name must collapse");
        assert_eq!(records[0].name, "Prof. Ravi Shankar");
        assert_eq!(records[0].role.as_deref(), Some("Professor"));
        assert_eq!(records[0].emails, vec!["ravi@iiserb.ac.in"]);
    }

    #[test]
    fn test_noise_blocks_yield_nothing() {
        let document = normalize(
            r#"<article><p>Welcome to the department. Contact the office for details.</p></article>
               <article>   </article>
               <div class="tyJCtd"><p>Email the webmaster for corrections</p></div>"#,
        );
        assert!(extract_faculty(&document, DOMAIN).is_empty());

        let selector = Selector::parse("article").unwrap();
        let noise = document.select(&selector).next().unwrap();
        assert_eq!(parse_faculty_block(noise, DOMAIN), None);
    }

    #[test]
    fn test_candidate_order() {
        let document = normalize(
            r#"<div class="tyJCtd"><h5>Second</h5></div><article><h5>First</h5></article>"#,
        );
        let names: Vec<String> = extract_faculty(&document, DOMAIN)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
