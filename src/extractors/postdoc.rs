// src/extractors/postdoc.rs

// --- Imports ---
use crate::extractors::cell::joined_text;
use crate::extractors::fields::{self, Strategy, ANCHOR_SELECTOR, PARAGRAPH_SELECTOR};
use crate::extractors::phd::{labeled_email, supervisor, year_of_joining};
use crate::records::{dedupe_by_identity, MemberRecord, RecordKind};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

const NAME_STRATEGIES: [Strategy<String>; 2] = [styled_heading_name, fields::heading_name];

// Department site: one third-width article per postdoc.
static POSTDOC_BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("article.one_third").expect("Failed to compile POSTDOC_BLOCK_SELECTOR")
});

static STYLED_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h6.heading").expect("Failed to compile STYLED_HEADING_SELECTOR")
});

fn styled_heading_name(block: ElementRef) -> Option<String> {
    block
        .select(&STYLED_HEADING_SELECTOR)
        .next()
        .map(joined_text)
        .filter(|name| !name.is_empty())
}

/// Builds a postdoc record from one article. Details live in its first paragraph.
pub fn parse_postdoc_block(block: ElementRef) -> Option<MemberRecord> {
    let name = fields::first_match(block, &NAME_STRATEGIES)?;

    let details = block.select(&PARAGRAPH_SELECTOR).next();
    let text = details.map(joined_text).unwrap_or_default();

    let email = details
        .and_then(|p| p.select(&ANCHOR_SELECTOR).find_map(fields::mailto_email))
        .or_else(|| labeled_email(&text));
    let homepage = details
        .and_then(fields::absolute_link)
        .or_else(|| fields::absolute_link(block));

    Some(MemberRecord {
        kind: RecordKind::Postdoc,
        name,
        year_of_joining: year_of_joining(&text),
        supervisor: supervisor(&text),
        emails: email.into_iter().collect(),
        homepage,
        image_url: fields::first_image(block),
    })
}

pub fn extract_postdocs(document: &Html) -> Vec<MemberRecord> {
    let blocks: Vec<ElementRef> = document.select(&POSTDOC_BLOCK_SELECTOR).collect();
    tracing::debug!("Found {} postdoc candidate blocks", blocks.len());

    let records = dedupe_by_identity(blocks.into_iter().filter_map(parse_postdoc_block));
    tracing::info!("Retained {} postdoc records", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::markup::normalize;

    #[test]
    fn test_postdoc_article() {
        let document = normalize(
            r#"<article class="one_third first">
                 <img src="/images/pd/sen.jpg">
                 <h6 class="heading">Dr. Priya Sen</h6>
                 <p>Year of Joining: 2023 Supervisor Name: Dr. Rao
                    Email: priya[At]iiserb.ac.in <a href="https://priya.example">Weblink</a></p>
               </article>"#,
        );
        let records = extract_postdocs(&document);
        assert_eq!(records.len(), 1);

        let priya = &records[0];
        assert_eq!(priya.kind, RecordKind::Postdoc);
        assert_eq!(priya.name, "Dr. Priya Sen");
        assert_eq!(priya.year_of_joining.as_deref(), Some("2023"));
        assert_eq!(priya.supervisor.as_deref(), Some("Dr. Rao"));
        assert_eq!(priya.emails, vec!["priya@iiserb.ac.in"]);
        assert_eq!(priya.homepage.as_deref(), Some("https://priya.example"));
        assert_eq!(priya.image_url.as_deref(), Some("/images/pd/sen.jpg"));
    }

    #[test]
    fn test_mailto_and_heading_fallback() {
        let document = normalize(
            r#"<article class="one_third"><h5>Arjun Das</h5>
                 <p>Email: <a href="mailto:arjun@iiserb.ac.in">mail</a></p></article>
               <article class="one_third"><p>Vacant position</p></article>
               <article class="one_third"><h6 class="heading">Arjun Das</h6></article>"#,
        );
        let records = extract_postdocs(&document);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Arjun Das");
        assert_eq!(records[0].emails, vec!["arjun@iiserb.ac.in"]);
        assert_eq!(records[0].year_of_joining, None);
        assert_eq!(records[0].homepage, None);
    }
}
